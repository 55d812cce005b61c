use actix_web::{FromRequest, HttpRequest, dev::Payload, web::Data};
use futures_util::future::LocalBoxFuture;

use crate::database::models::User;
use crate::database::repositories::UserRepository;
use crate::error::{AppError, AppResult};
use crate::services::auth::claims_from_request;

/// The authenticated caller, loaded fresh from storage on every request so
/// role changes and deletions apply before the access token expires.
#[derive(Debug, Clone)]
pub struct UserContext {
    pub user: User,
}

impl UserContext {
    pub fn user_id(&self) -> &str {
        &self.user.id
    }

    pub fn is_admin(&self) -> bool {
        self.user.is_admin_user
    }

    pub fn requires_admin(&self) -> AppResult<()> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(AppError::Forbidden("Admin access required".to_string()))
        }
    }

    /// Users may act on their own records; admins on anyone's.
    pub fn requires_self_or_admin(&self, user_id: &str) -> AppResult<()> {
        if self.user_id() == user_id || self.is_admin() {
            Ok(())
        } else {
            Err(AppError::Forbidden(
                "You can only modify your own account".to_string(),
            ))
        }
    }
}

impl FromRequest for UserContext {
    type Error = AppError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let claims = claims_from_request(req);
        let users = req.app_data::<Data<UserRepository>>().cloned();

        Box::pin(async move {
            let claims = claims?;
            let users = users.ok_or_else(|| {
                AppError::internal_server_error_message("User repository not registered")
            })?;

            let user = users
                .find_by_id(claims.user_id())
                .await?
                .ok_or_else(|| AppError::Unauthorized("User no longer exists".to_string()))?;

            Ok(UserContext { user })
        })
    }
}
