use actix_web::{HttpResponse, Result, web};

use crate::database::models::{NewUserInput, UpdateUserInput, User};
use crate::database::repositories::UserRepository;
use crate::error::AppError;
use crate::handlers::shared::ApiResponse;
use crate::services::{AuthService, ScheduleService, UserContext};

pub async fn list_users(
    _user_context: UserContext,
    user_repo: web::Data<UserRepository>,
) -> Result<HttpResponse> {
    let users = user_repo.get_all_users().await.map_err(|e| {
        log::error!("Failed to list users: {}", e);
        AppError::from(e)
    })?;

    Ok(ApiResponse::success(users))
}

pub async fn get_user(
    _user_context: UserContext,
    user_repo: web::Data<UserRepository>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let user_id = path.into_inner();

    let user = user_repo
        .find_by_id(&user_id)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::not_found(format!("User {}", user_id)))?;

    Ok(ApiResponse::success(user))
}

pub async fn create_user(
    user_context: UserContext,
    auth_service: web::Data<AuthService>,
    user_repo: web::Data<UserRepository>,
    input: web::Json<NewUserInput>,
) -> Result<HttpResponse> {
    user_context.requires_admin()?;

    let input = input.into_inner();
    input.validate().map_err(AppError::BadRequest)?;

    if user_repo
        .identity_taken(&input.username, &input.email, None)
        .await
        .map_err(AppError::from)?
    {
        return Err(AppError::Conflict("Username or email already in use".to_string()).into());
    }

    let password_hash = auth_service.hash_password(&input.password)?;
    let user = User::new(input, password_hash);

    user_repo.create_user(&user).await.map_err(|e| {
        log::error!("Failed to create user {}: {}", user.username, e);
        AppError::from(e)
    })?;

    log::info!(
        "User {} created by {}",
        user.username,
        user_context.user.username
    );
    Ok(ApiResponse::created(user))
}

pub async fn update_user(
    user_context: UserContext,
    auth_service: web::Data<AuthService>,
    user_repo: web::Data<UserRepository>,
    input: web::Json<UpdateUserInput>,
) -> Result<HttpResponse> {
    let mut input = input.into_inner();
    user_context.requires_self_or_admin(&input.user_id)?;
    input.validate().map_err(AppError::BadRequest)?;

    if input.is_admin_user.is_some() && !user_context.is_admin() {
        return Err(AppError::Forbidden("Only admins can change admin rights".to_string()).into());
    }

    let mut user = user_repo
        .find_by_id(&input.user_id)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::not_found(format!("User {}", input.user_id)))?;

    let username = input.username.as_deref().unwrap_or(&user.username);
    let email = input.email.as_deref().unwrap_or(&user.email);
    if user_repo
        .identity_taken(username, email, Some(user.id.as_str()))
        .await
        .map_err(AppError::from)?
    {
        return Err(AppError::Conflict("Username or email already in use".to_string()).into());
    }

    if let Some(password) = input.password.take() {
        user.password_hash = auth_service.hash_password(&password)?;
    }
    input.apply_to(&mut user);

    user_repo.update_user(&user).await.map_err(|e| {
        log::error!("Failed to update user {}: {}", user.id, e);
        AppError::from(e)
    })?;

    Ok(ApiResponse::success(user))
}

pub async fn delete_user(
    user_context: UserContext,
    schedule_service: web::Data<ScheduleService>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    user_context.requires_admin()?;

    let user_id = path.into_inner();
    if user_id == user_context.user_id() {
        return Err(AppError::BadRequest("You cannot delete your own account".to_string()).into());
    }

    schedule_service.delete_user_with_shifts(&user_id).await?;

    Ok(ApiResponse::<()>::success_message("User deleted"))
}
