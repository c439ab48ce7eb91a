use axum::{
    extract::{Path, State},
    Json,
};
use fitclub_core::models::booking::{BookSessionRequest, MemberRequest, SlotRequest};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    middleware::error_handling::{AppError, OutcomeResponse},
    ApiState,
};

#[axum::debug_handler]
pub async fn book_session(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<BookSessionRequest>,
) -> Result<OutcomeResponse, AppError> {
    let interval = payload.slot.interval()?;
    let outcome = state
        .bookings
        .book_private_session(payload.member_id, payload.trainer_id, interval)
        .await?;
    Ok(outcome.into())
}

#[axum::debug_handler]
pub async fn reschedule_session(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<SlotRequest>,
) -> Result<OutcomeResponse, AppError> {
    let interval = payload.interval()?;
    let outcome = state.bookings.reschedule_session(id, interval).await?;
    Ok(outcome.into())
}

/// The member id in the body must own the session.
#[axum::debug_handler]
pub async fn cancel_session(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<MemberRequest>,
) -> Result<OutcomeResponse, AppError> {
    let outcome = state.bookings.cancel_session(payload.member_id, id).await?;
    Ok(outcome.into())
}
