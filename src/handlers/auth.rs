use actix_web::{HttpResponse, Result, web};

use crate::database::models::{LoginInput, RefreshTokenInput, User};
use crate::handlers::shared::ApiResponse;
use crate::services::{AuthService, UserContext};

pub async fn login(
    auth_service: web::Data<AuthService>,
    request: web::Json<LoginInput>,
) -> Result<HttpResponse> {
    let response = auth_service.login(request.into_inner()).await?;

    Ok(ApiResponse::success(response))
}

pub async fn refresh(
    auth_service: web::Data<AuthService>,
    request: web::Json<RefreshTokenInput>,
) -> Result<HttpResponse> {
    let response = auth_service.refresh(&request.refresh_token).await?;

    Ok(ApiResponse::success(response))
}

pub async fn logout(
    user_context: UserContext,
    auth_service: web::Data<AuthService>,
) -> Result<HttpResponse> {
    auth_service.logout(user_context.user_id()).await?;

    Ok(ApiResponse::<()>::success_message("Logged out"))
}

pub async fn me(user_context: UserContext) -> Result<HttpResponse> {
    Ok(ApiResponse::<User>::success(user_context.user))
}
