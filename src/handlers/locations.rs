use actix_web::{HttpResponse, Result, web};

use crate::database::models::LocationInput;
use crate::database::repositories::LocationRepository;
use crate::error::AppError;
use crate::handlers::shared::ApiResponse;
use crate::services::{ScheduleService, UserContext};

pub async fn list_locations(
    _user_context: UserContext,
    location_repo: web::Data<LocationRepository>,
) -> Result<HttpResponse> {
    let locations = location_repo.get_all_locations().await.map_err(|e| {
        log::error!("Failed to list locations: {}", e);
        AppError::from(e)
    })?;

    Ok(ApiResponse::success(locations))
}

pub async fn get_location(
    _user_context: UserContext,
    location_repo: web::Data<LocationRepository>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let location_id = path.into_inner();

    let location = location_repo
        .find_by_id(&location_id)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::not_found(format!("Location {}", location_id)))?;

    Ok(ApiResponse::success(location))
}

pub async fn create_location(
    user_context: UserContext,
    location_repo: web::Data<LocationRepository>,
    input: web::Json<LocationInput>,
) -> Result<HttpResponse> {
    user_context.requires_admin()?;

    let input = input.into_inner();
    input.validate().map_err(AppError::BadRequest)?;

    let location = input.into_location(uuid::Uuid::new_v4().to_string());
    location_repo.create_location(&location).await.map_err(|e| {
        log::error!("Failed to create location {}: {}", location.location_name, e);
        AppError::from(e)
    })?;

    log::info!("Location {} created", location.id);
    Ok(ApiResponse::created(location))
}

pub async fn update_location(
    user_context: UserContext,
    location_repo: web::Data<LocationRepository>,
    path: web::Path<String>,
    input: web::Json<LocationInput>,
) -> Result<HttpResponse> {
    user_context.requires_admin()?;

    let location_id = path.into_inner();
    let input = input.into_inner();
    input.validate().map_err(AppError::BadRequest)?;

    let mut location = location_repo
        .find_by_id(&location_id)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::not_found(format!("Location {}", location_id)))?;

    input.apply_to(&mut location);
    location_repo.update_location(&location).await.map_err(|e| {
        log::error!("Failed to update location {}: {}", location_id, e);
        AppError::from(e)
    })?;

    Ok(ApiResponse::success(location))
}

pub async fn delete_location(
    user_context: UserContext,
    schedule_service: web::Data<ScheduleService>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    user_context.requires_admin()?;

    let removed = schedule_service
        .delete_location_with_shifts(&path.into_inner())
        .await?;

    Ok(ApiResponse::<()>::success_message(&format!(
        "Location deleted along with {} shift(s)",
        removed
    )))
}
