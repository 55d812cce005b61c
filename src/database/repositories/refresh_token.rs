use anyhow::Result;
use chrono::{DateTime, Duration, Utc};
use rand::{Rng, distr::Alphanumeric};
use sqlx::SqlitePool;

use crate::database::models::RefreshToken;

const TOKEN_LENGTH: usize = 48;

#[derive(Clone)]
pub struct RefreshTokenRepository {
    pool: SqlitePool,
}

impl RefreshTokenRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn generate_token() -> String {
        rand::rng()
            .sample_iter(&Alphanumeric)
            .take(TOKEN_LENGTH)
            .map(char::from)
            .collect()
    }

    pub async fn create_token(&self, user_id: &str, ttl_days: i64) -> Result<RefreshToken> {
        let now = Utc::now();
        let token = RefreshToken {
            token: Self::generate_token(),
            user_id: user_id.to_string(),
            expires_at: now + Duration::days(ttl_days),
            revoked_at: None,
            created_at: now,
        };

        sqlx::query(
            r#"
            INSERT INTO refresh_tokens (token, user_id, expires_at, revoked_at, created_at)
            VALUES (?1, ?2, ?3, NULL, ?4)
            "#,
        )
        .bind(&token.token)
        .bind(&token.user_id)
        .bind(token.expires_at)
        .bind(token.created_at)
        .execute(&self.pool)
        .await?;

        Ok(token)
    }

    pub async fn find_token(&self, token: &str) -> Result<Option<RefreshToken>> {
        let token = sqlx::query_as::<_, RefreshToken>(
            "SELECT token, user_id, expires_at, revoked_at, created_at FROM refresh_tokens WHERE token = ?1",
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;

        Ok(token)
    }

    /// Revoke one token. Returns false when it was already revoked, so a token
    /// can be redeemed at most once.
    pub async fn revoke_token(&self, token: &str) -> Result<bool> {
        let result = sqlx::query(
            "UPDATE refresh_tokens SET revoked_at = ?1 WHERE token = ?2 AND revoked_at IS NULL",
        )
        .bind(Utc::now())
        .bind(token)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    pub async fn revoke_user_tokens(&self, user_id: &str) -> Result<u64> {
        let result = sqlx::query(
            "UPDATE refresh_tokens SET revoked_at = ?1 WHERE user_id = ?2 AND revoked_at IS NULL",
        )
        .bind(Utc::now())
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    /// Drop tokens that expired or were revoked before `cutoff`.
    pub async fn purge_stale(&self, cutoff: DateTime<Utc>) -> Result<u64> {
        let result = sqlx::query(
            "DELETE FROM refresh_tokens WHERE expires_at < ?1 OR revoked_at < ?1",
        )
        .bind(cutoff)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}

/// Background task removing stale refresh tokens every `interval_seconds`.
pub async fn cleanup_refresh_tokens(repository: RefreshTokenRepository, interval_seconds: u64) {
    let mut interval = tokio::time::interval(std::time::Duration::from_secs(interval_seconds));

    loop {
        interval.tick().await;
        match repository.purge_stale(Utc::now()).await {
            Ok(0) => {}
            Ok(removed) => log::debug!("Purged {} stale refresh token(s)", removed),
            Err(e) => log::warn!("Refresh token cleanup failed: {}", e),
        }
    }
}
