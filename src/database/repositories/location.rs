use anyhow::Result;
use sqlx::{SqliteConnection, SqlitePool};

use crate::database::models::Location;
use crate::database::types::{LocationRow, collect_rows};

const LOCATION_COLUMNS: &str = "id, location_name, address, company_name, contacts, \
     instructions, is_active, created_at, updated_at";

#[derive(Clone)]
pub struct LocationRepository {
    pool: SqlitePool,
}

impl LocationRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create_location(&self, location: &Location) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO locations (id, location_name, address, company_name, contacts,
                                   instructions, is_active, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
        )
        .bind(&location.id)
        .bind(&location.location_name)
        .bind(serde_json::to_string(&location.address)?)
        .bind(&location.company_name)
        .bind(serde_json::to_string(&location.contacts)?)
        .bind(serde_json::to_string(&location.instructions)?)
        .bind(location.is_active)
        .bind(location.created_at)
        .bind(location.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<Location>> {
        let row = sqlx::query_as::<_, LocationRow>(&format!(
            "SELECT {} FROM locations WHERE id = ?1",
            LOCATION_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Location::try_from).transpose()
    }

    pub async fn exists(&self, id: &str) -> Result<bool> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM locations WHERE id = ?1")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count > 0)
    }

    pub async fn get_all_locations(&self) -> Result<Vec<Location>> {
        let rows = sqlx::query_as::<_, LocationRow>(&format!(
            "SELECT {} FROM locations ORDER BY location_name",
            LOCATION_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        collect_rows(rows)
    }

    pub async fn update_location(&self, location: &Location) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE locations
            SET location_name = ?1, address = ?2, company_name = ?3, contacts = ?4,
                instructions = ?5, is_active = ?6, updated_at = ?7
            WHERE id = ?8
            "#,
        )
        .bind(&location.location_name)
        .bind(serde_json::to_string(&location.address)?)
        .bind(&location.company_name)
        .bind(serde_json::to_string(&location.contacts)?)
        .bind(serde_json::to_string(&location.instructions)?)
        .bind(location.is_active)
        .bind(location.updated_at)
        .bind(&location.id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn delete_location(conn: &mut SqliteConnection, id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM locations WHERE id = ?1")
            .bind(id)
            .execute(&mut *conn)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
