use axum::{
    extract::{Path, State},
    Json,
};
use fitclub_core::models::booking::{ClassListing, MemberRequest, ScheduleClassRequest, SlotRequest};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    middleware::error_handling::{AppError, OutcomeResponse},
    ApiState,
};

#[axum::debug_handler]
pub async fn schedule_class(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<ScheduleClassRequest>,
) -> Result<OutcomeResponse, AppError> {
    let request = payload.into_new_class()?;
    let outcome = state.bookings.schedule_class(request).await?;
    Ok(outcome.into())
}

#[axum::debug_handler]
pub async fn list_classes(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Vec<ClassListing>>, AppError> {
    let classes = fitclub_db::repositories::classes::list_scheduled_classes(&state.db_pool).await?;
    Ok(Json(classes))
}

#[axum::debug_handler]
pub async fn update_class_schedule(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<SlotRequest>,
) -> Result<OutcomeResponse, AppError> {
    let interval = payload.interval()?;
    let outcome = state.bookings.update_class_schedule(id, interval).await?;
    Ok(outcome.into())
}

#[axum::debug_handler]
pub async fn cancel_class(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<OutcomeResponse, AppError> {
    let outcome = state.bookings.cancel_class(id).await?;
    Ok(outcome.into())
}

#[axum::debug_handler]
pub async fn register(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<MemberRequest>,
) -> Result<OutcomeResponse, AppError> {
    let outcome = state.bookings.register_for_class(payload.member_id, id).await?;
    Ok(outcome.into())
}

#[axum::debug_handler]
pub async fn drop_registration(
    State(state): State<Arc<ApiState>>,
    Path((id, member_id)): Path<(Uuid, Uuid)>,
) -> Result<OutcomeResponse, AppError> {
    let outcome = state.bookings.drop_class(member_id, id).await?;
    Ok(outcome.into())
}
