use anyhow::Result;
use sqlx::{Sqlite, SqliteConnection, SqlitePool, Transaction};

use crate::database::models::Shift;
use crate::database::types::{ShiftRow, collect_rows};
use crate::scheduling::TimeRange;

const SHIFT_COLUMNS: &str = "id, user_id, location_id, start_ms, end_ms, shift_type, \
     created_by, created_at, updated_at";

#[derive(Clone)]
pub struct ShiftRepository {
    pool: SqlitePool,
}

impl ShiftRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Write transaction holding the database write lock from its first
    /// statement, so a concurrent writer waits and then reads committed rows.
    pub async fn begin(&self) -> Result<Transaction<'static, Sqlite>> {
        Ok(self.pool.begin_with("BEGIN IMMEDIATE").await?)
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<Shift>> {
        let mut conn = self.pool.acquire().await?;
        Self::find_by_id_in(&mut conn, id).await
    }

    pub async fn find_by_id_in(conn: &mut SqliteConnection, id: &str) -> Result<Option<Shift>> {
        let row = sqlx::query_as::<_, ShiftRow>(&format!(
            "SELECT {} FROM shifts WHERE id = ?1",
            SHIFT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;

        row.map(Shift::try_from).transpose()
    }

    /// Shifts of a location lying entirely inside `window`.
    pub async fn find_by_location_within(
        &self,
        location_id: &str,
        window: &TimeRange,
    ) -> Result<Vec<Shift>> {
        let rows = sqlx::query_as::<_, ShiftRow>(&format!(
            "SELECT {} FROM shifts WHERE location_id = ?1 AND start_ms >= ?2 AND end_ms <= ?3 \
             ORDER BY start_ms, user_id",
            SHIFT_COLUMNS
        ))
        .bind(location_id)
        .bind(window.start.timestamp_millis())
        .bind(window.end.timestamp_millis())
        .fetch_all(&self.pool)
        .await?;

        collect_rows(rows)
    }

    /// Shifts of a user lying entirely inside `window`.
    pub async fn find_by_user_within(&self, user_id: &str, window: &TimeRange) -> Result<Vec<Shift>> {
        let rows = sqlx::query_as::<_, ShiftRow>(&format!(
            "SELECT {} FROM shifts WHERE user_id = ?1 AND start_ms >= ?2 AND end_ms <= ?3 \
             ORDER BY start_ms",
            SHIFT_COLUMNS
        ))
        .bind(user_id)
        .bind(window.start.timestamp_millis())
        .bind(window.end.timestamp_millis())
        .fetch_all(&self.pool)
        .await?;

        collect_rows(rows)
    }

    /// Shifts of any user whose interval intersects `range`.
    pub async fn find_intersecting(
        conn: &mut SqliteConnection,
        range: &TimeRange,
    ) -> Result<Vec<Shift>> {
        let rows = sqlx::query_as::<_, ShiftRow>(&format!(
            "SELECT {} FROM shifts WHERE start_ms < ?1 AND end_ms > ?2 ORDER BY start_ms",
            SHIFT_COLUMNS
        ))
        .bind(range.end.timestamp_millis())
        .bind(range.start.timestamp_millis())
        .fetch_all(&mut *conn)
        .await?;

        collect_rows(rows)
    }

    /// Shifts of one user whose interval intersects `range`.
    pub async fn find_user_intersecting(
        conn: &mut SqliteConnection,
        user_id: &str,
        range: &TimeRange,
    ) -> Result<Vec<Shift>> {
        let rows = sqlx::query_as::<_, ShiftRow>(&format!(
            "SELECT {} FROM shifts WHERE user_id = ?1 AND start_ms < ?2 AND end_ms > ?3 \
             ORDER BY start_ms",
            SHIFT_COLUMNS
        ))
        .bind(user_id)
        .bind(range.end.timestamp_millis())
        .bind(range.start.timestamp_millis())
        .fetch_all(&mut *conn)
        .await?;

        collect_rows(rows)
    }

    pub async fn insert(conn: &mut SqliteConnection, shift: &Shift) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO shifts (id, user_id, location_id, start_ms, end_ms, shift_type,
                                created_by, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
        )
        .bind(&shift.id)
        .bind(&shift.user_id)
        .bind(&shift.location_id)
        .bind(shift.start_time.timestamp_millis())
        .bind(shift.end_time.timestamp_millis())
        .bind(&shift.shift_type)
        .bind(&shift.created_by)
        .bind(shift.created_at)
        .bind(shift.updated_at)
        .execute(&mut *conn)
        .await?;

        Ok(())
    }

    pub async fn update(conn: &mut SqliteConnection, shift: &Shift) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE shifts
            SET user_id = ?1, location_id = ?2, start_ms = ?3, end_ms = ?4, shift_type = ?5,
                created_by = ?6, updated_at = ?7
            WHERE id = ?8
            "#,
        )
        .bind(&shift.user_id)
        .bind(&shift.location_id)
        .bind(shift.start_time.timestamp_millis())
        .bind(shift.end_time.timestamp_millis())
        .bind(&shift.shift_type)
        .bind(&shift.created_by)
        .bind(shift.updated_at)
        .bind(&shift.id)
        .execute(&mut *conn)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn delete(conn: &mut SqliteConnection, id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM shifts WHERE id = ?1")
            .bind(id)
            .execute(&mut *conn)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete every shift of a user; returns the distinct locations they were at.
    pub async fn delete_by_user(conn: &mut SqliteConnection, user_id: &str) -> Result<Vec<String>> {
        let locations = sqlx::query_scalar::<_, String>(
            "SELECT DISTINCT location_id FROM shifts WHERE user_id = ?1 AND location_id IS NOT NULL",
        )
        .bind(user_id)
        .fetch_all(&mut *conn)
        .await?;

        sqlx::query("DELETE FROM shifts WHERE user_id = ?1")
            .bind(user_id)
            .execute(&mut *conn)
            .await?;

        Ok(locations)
    }

    pub async fn delete_by_location(conn: &mut SqliteConnection, location_id: &str) -> Result<u64> {
        let result = sqlx::query("DELETE FROM shifts WHERE location_id = ?1")
            .bind(location_id)
            .execute(&mut *conn)
            .await?;

        Ok(result.rows_affected())
    }
}
