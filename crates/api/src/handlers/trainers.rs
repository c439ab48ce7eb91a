use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::Local;
use fitclub_core::models::{
    booking::{ScheduleItem, UnavailabilityRequest},
    trainer::{Specialization, Trainer},
};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    middleware::error_handling::{AppError, OutcomeResponse},
    ApiState,
};

#[derive(Debug, Deserialize)]
pub struct TrainerQuery {
    /// Display label such as `Weight Loss`, matched case-insensitively.
    pub specialization: Option<String>,
}

#[axum::debug_handler]
pub async fn list_trainers(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<TrainerQuery>,
) -> Result<Json<Vec<Trainer>>, AppError> {
    let specialization = query
        .specialization
        .as_deref()
        .map(str::parse::<Specialization>)
        .transpose()?;

    let trainers =
        fitclub_db::repositories::trainers::trainers_by_specialization(&state.db_pool, specialization)
            .await?;
    Ok(Json(trainers))
}

#[axum::debug_handler]
pub async fn upcoming_sessions(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<ScheduleItem>>, AppError> {
    let now = Local::now().naive_local();
    let sessions =
        fitclub_db::repositories::trainers::upcoming_sessions(&state.db_pool, id, now).await?;
    Ok(Json(sessions))
}

#[axum::debug_handler]
pub async fn declare_unavailability(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UnavailabilityRequest>,
) -> Result<OutcomeResponse, AppError> {
    let interval = payload.interval()?;
    let outcome = state.bookings.declare_unavailability(id, interval).await?;
    Ok(outcome.into())
}

#[axum::debug_handler]
pub async fn update_unavailability(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UnavailabilityRequest>,
) -> Result<OutcomeResponse, AppError> {
    let interval = payload.interval()?;
    let outcome = state.bookings.update_unavailability(id, interval).await?;
    Ok(outcome.into())
}
