use axum::{
    extract::{Path, State},
    Json,
};
use fitclub_core::models::{
    booking::{MaintenanceStatusRequest, SlotRequest},
    maintenance::MaintenanceWindow,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    middleware::error_handling::{AppError, OutcomeResponse},
    ApiState,
};

#[axum::debug_handler]
pub async fn schedule_maintenance(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<SlotRequest>,
) -> Result<OutcomeResponse, AppError> {
    let interval = payload.interval()?;
    let outcome = state.bookings.schedule_maintenance(interval).await?;
    Ok(outcome.into())
}

#[axum::debug_handler]
pub async fn list_maintenance(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Vec<MaintenanceWindow>>, AppError> {
    let windows =
        fitclub_db::repositories::maintenance::list_scheduled_maintenance(&state.db_pool).await?;
    Ok(Json(windows))
}

#[axum::debug_handler]
pub async fn reschedule_maintenance(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<SlotRequest>,
) -> Result<OutcomeResponse, AppError> {
    let interval = payload.interval()?;
    let outcome = state.bookings.reschedule_maintenance(id, interval).await?;
    Ok(outcome.into())
}

#[axum::debug_handler]
pub async fn update_status(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<MaintenanceStatusRequest>,
) -> Result<OutcomeResponse, AppError> {
    let outcome = state.bookings.update_maintenance_status(id, payload.status).await?;
    Ok(outcome.into())
}
