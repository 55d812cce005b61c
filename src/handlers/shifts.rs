use actix_web::{HttpResponse, Result, web};

use crate::database::models::{ShiftInput, TimeRangeInput, UpdateShiftInput};
use crate::error::AppError;
use crate::handlers::shared::ApiResponse;
use crate::services::{ScheduleService, UserContext};

pub async fn get_shift(
    _user_context: UserContext,
    schedule_service: web::Data<ScheduleService>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let shift = schedule_service.get_shift(&path.into_inner()).await?;

    Ok(ApiResponse::success(shift))
}

pub async fn create_shift(
    user_context: UserContext,
    schedule_service: web::Data<ScheduleService>,
    input: web::Json<ShiftInput>,
) -> Result<HttpResponse> {
    let shift = schedule_service
        .create_shift(input.into_inner(), user_context.user_id())
        .await?;

    Ok(ApiResponse::created(shift))
}

pub async fn update_shift(
    _user_context: UserContext,
    schedule_service: web::Data<ScheduleService>,
    input: web::Json<UpdateShiftInput>,
) -> Result<HttpResponse> {
    let shift = schedule_service.update_shift(input.into_inner()).await?;

    Ok(ApiResponse::success(shift))
}

pub async fn delete_shift(
    _user_context: UserContext,
    schedule_service: web::Data<ScheduleService>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let shift = schedule_service.delete_shift(&path.into_inner()).await?;

    Ok(ApiResponse::success_with_message(shift, "Shift deleted"))
}

pub async fn remove_shift_range(
    _user_context: UserContext,
    schedule_service: web::Data<ScheduleService>,
    path: web::Path<String>,
    input: web::Json<TimeRangeInput>,
) -> Result<HttpResponse> {
    let window = input.range().map_err(AppError::from)?;
    let removal = schedule_service
        .remove_range(&path.into_inner(), window)
        .await?;

    Ok(ApiResponse::success(removal))
}

pub async fn get_user_shifts(
    _user_context: UserContext,
    schedule_service: web::Data<ScheduleService>,
    path: web::Path<String>,
    input: web::Json<TimeRangeInput>,
) -> Result<HttpResponse> {
    let window = input.window().map_err(AppError::from)?;
    let shifts = schedule_service
        .shifts_for_user(&path.into_inner(), window)
        .await?;

    Ok(ApiResponse::success(shifts))
}

pub async fn get_location_shifts(
    _user_context: UserContext,
    schedule_service: web::Data<ScheduleService>,
    path: web::Path<String>,
    input: web::Json<TimeRangeInput>,
) -> Result<HttpResponse> {
    let window = input.window().map_err(AppError::from)?;
    let shifts = schedule_service
        .shifts_for_location(&path.into_inner(), window)
        .await?;

    Ok(ApiResponse::success(shifts))
}
