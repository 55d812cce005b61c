use actix_web::{HttpRequest, http::header, web::Data};
use bcrypt::{hash, verify};
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::database::models::{AuthResponse, LoginInput, User};
use crate::database::repositories::{RefreshTokenRepository, UserRepository};
use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // user id
    pub username: String,
    #[serde(rename = "isAdmin")]
    pub is_admin: bool,
    pub exp: usize,
}

impl Claims {
    pub fn user_id(&self) -> &str {
        &self.sub
    }
}

pub fn decode_claims(token: &str, secret: &str) -> AppResult<Claims> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )
    .map(|data| data.claims)
    .map_err(|e| {
        log::debug!("Rejected access token: {}", e);
        AppError::Unauthorized("Invalid or expired token".to_string())
    })
}

/// Decode the bearer token of `req` with the registered [`Config`].
pub fn claims_from_request(req: &HttpRequest) -> AppResult<Claims> {
    let config = req
        .app_data::<Data<Config>>()
        .ok_or_else(|| AppError::internal_server_error_message("Configuration not registered"))?;

    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or_else(|| {
            AppError::Unauthorized("Missing or invalid authorization header".to_string())
        })?;

    decode_claims(token, &config.jwt_secret)
}

#[derive(Clone)]
pub struct AuthService {
    user_repository: UserRepository,
    refresh_token_repository: RefreshTokenRepository,
    config: Config,
}

impl AuthService {
    pub fn new(
        config: Config,
        user_repository: UserRepository,
        refresh_token_repository: RefreshTokenRepository,
    ) -> Self {
        Self {
            user_repository,
            refresh_token_repository,
            config,
        }
    }

    pub async fn login(&self, request: LoginInput) -> AppResult<AuthResponse> {
        let invalid = || AppError::Unauthorized("Invalid username or password".to_string());

        let user = self
            .user_repository
            .find_by_username(request.username.trim())
            .await?
            .ok_or_else(invalid)?;

        if !self.verify_password(&request.password, &user.password_hash) {
            log::warn!("Failed login attempt for {}", user.username);
            return Err(invalid());
        }

        self.user_repository.record_login(&user.id).await?;
        log::info!("User {} logged in", user.username);

        self.issue_tokens(user).await
    }

    /// Exchange a refresh token for a new token pair. The presented token is
    /// revoked, so each refresh token works once.
    pub async fn refresh(&self, refresh_token: &str) -> AppResult<AuthResponse> {
        let stored = self
            .refresh_token_repository
            .find_token(refresh_token)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Invalid refresh token".to_string()))?;

        if !stored.is_usable(Utc::now()) {
            return Err(AppError::Unauthorized(
                "Refresh token expired or revoked".to_string(),
            ));
        }

        // A concurrent refresh may have revoked it since the lookup
        if !self.refresh_token_repository.revoke_token(&stored.token).await? {
            return Err(AppError::Unauthorized(
                "Refresh token expired or revoked".to_string(),
            ));
        }

        let user = self
            .user_repository
            .find_by_id(&stored.user_id)
            .await?
            .ok_or_else(|| AppError::Unauthorized("User no longer exists".to_string()))?;

        self.issue_tokens(user).await
    }

    pub async fn logout(&self, user_id: &str) -> AppResult<u64> {
        let revoked = self
            .refresh_token_repository
            .revoke_user_tokens(user_id)
            .await?;
        log::info!("Revoked {} refresh token(s) for user {}", revoked, user_id);
        Ok(revoked)
    }

    pub fn hash_password(&self, password: &str) -> AppResult<String> {
        hash(password, self.config.bcrypt_cost).map_err(|e| {
            log::error!("Failed to hash password: {}", e);
            AppError::internal_server_error_message("Failed to hash password")
        })
    }

    fn verify_password(&self, password: &str, password_hash: &str) -> bool {
        // Seeded accounts carry an unusable hash that bcrypt cannot parse
        verify(password, password_hash).unwrap_or(false)
    }

    pub fn generate_access_token(&self, user: &User) -> AppResult<String> {
        let expiration = (Utc::now() + Duration::minutes(self.config.access_token_minutes))
            .timestamp() as usize;

        let claims = Claims {
            sub: user.id.clone(),
            username: user.username.clone(),
            is_admin: user.is_admin_user,
            exp: expiration,
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.config.jwt_secret.as_bytes()),
        )
        .map_err(|e| {
            log::error!("Failed to sign access token: {}", e);
            AppError::internal_server_error_message("Failed to sign access token")
        })
    }

    async fn issue_tokens(&self, user: User) -> AppResult<AuthResponse> {
        let access_token = self.generate_access_token(&user)?;
        let refresh_token = self
            .refresh_token_repository
            .create_token(&user.id, self.config.refresh_token_days)
            .await?;

        Ok(AuthResponse {
            access_token,
            refresh_token: refresh_token.token,
            user: user.into(),
        })
    }

    /// Create the bootstrap admin account when it is configured and missing.
    pub async fn ensure_admin(&self) -> AppResult<Option<User>> {
        let (Some(username), Some(password)) = (
            self.config.admin_username.as_deref(),
            self.config.admin_password.as_deref(),
        ) else {
            return Ok(None);
        };

        if self.user_repository.find_by_username(username).await?.is_some() {
            log::debug!("Admin account {} already present", username);
            return Ok(None);
        }

        let now = Utc::now();
        let admin = User {
            id: uuid::Uuid::new_v4().to_string(),
            username: username.to_string(),
            name: "Administrator".to_string(),
            email: format!("{}@shiftboard.local", username),
            phone: None,
            address: None,
            password_hash: self.hash_password(password)?,
            is_admin_user: true,
            last_login: None,
            created_at: now,
            updated_at: now,
        };

        self.user_repository.create_user(&admin).await?;
        log::info!("Created admin account {}", username);
        Ok(Some(admin))
    }
}
