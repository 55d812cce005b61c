use anyhow::Result;
use chrono::Utc;
use sqlx::{SqliteConnection, SqlitePool};

use crate::database::models::User;
use crate::database::types::{UserRow, collect_rows};

const USER_COLUMNS: &str = "id, username, name, email, phone, address, password_hash, \
     is_admin_user, last_login, created_at, updated_at";

#[derive(Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create_user(&self, user: &User) -> Result<()> {
        let address = user.address.as_ref().map(serde_json::to_string).transpose()?;

        sqlx::query(
            r#"
            INSERT INTO users (id, username, name, email, phone, address, password_hash,
                               is_admin_user, last_login, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
            "#,
        )
        .bind(&user.id)
        .bind(&user.username)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.phone)
        .bind(address)
        .bind(&user.password_hash)
        .bind(user.is_admin_user)
        .bind(user.last_login)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {} FROM users WHERE id = ?1",
            USER_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(User::try_from).transpose()
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {} FROM users WHERE username = ?1",
            USER_COLUMNS
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        row.map(User::try_from).transpose()
    }

    pub async fn get_all_users(&self) -> Result<Vec<User>> {
        let rows = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {} FROM users ORDER BY name, username",
            USER_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        collect_rows(rows)
    }

    /// All user ids in ascending order; the roster used by shift generation.
    pub async fn get_user_ids(&self) -> Result<Vec<String>> {
        let ids = sqlx::query_scalar::<_, String>("SELECT id FROM users ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        Ok(ids)
    }

    /// Whether another user already uses `username` or `email`.
    pub async fn identity_taken(
        &self,
        username: &str,
        email: &str,
        exclude_id: Option<&str>,
    ) -> Result<bool> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM users WHERE (username = ?1 OR email = ?2) AND id != ?3",
        )
        .bind(username)
        .bind(email)
        .bind(exclude_id.unwrap_or(""))
        .fetch_one(&self.pool)
        .await?;

        Ok(count > 0)
    }

    pub async fn update_user(&self, user: &User) -> Result<bool> {
        let address = user.address.as_ref().map(serde_json::to_string).transpose()?;

        let result = sqlx::query(
            r#"
            UPDATE users
            SET username = ?1, name = ?2, email = ?3, phone = ?4, address = ?5,
                password_hash = ?6, is_admin_user = ?7, updated_at = ?8
            WHERE id = ?9
            "#,
        )
        .bind(&user.username)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.phone)
        .bind(address)
        .bind(&user.password_hash)
        .bind(user.is_admin_user)
        .bind(user.updated_at)
        .bind(&user.id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn record_login(&self, id: &str) -> Result<()> {
        sqlx::query("UPDATE users SET last_login = ?1 WHERE id = ?2")
            .bind(Utc::now())
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub async fn delete_user(conn: &mut SqliteConnection, id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?1")
            .bind(id)
            .execute(&mut *conn)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn count_users(&self) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
