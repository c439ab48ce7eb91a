use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use fitclub_core::{
    errors::ClubError,
    models::payment::{Payment, UpdatePaymentStatusRequest},
};
use std::sync::Arc;
use uuid::Uuid;

use crate::{middleware::error_handling::AppError, ApiState};

#[axum::debug_handler]
pub async fn list_unprocessed(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Vec<Payment>>, AppError> {
    let payments = fitclub_db::repositories::payments::list_unprocessed_payments(&state.db_pool).await?;
    Ok(Json(payments))
}

#[axum::debug_handler]
pub async fn update_status(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdatePaymentStatusRequest>,
) -> Result<StatusCode, AppError> {
    let updated =
        fitclub_db::repositories::payments::update_payment_status(&state.db_pool, id, payload.status)
            .await?;

    if !updated {
        return Err(ClubError::NotFound(format!("Payment with ID {} not found", id)).into());
    }
    Ok(StatusCode::NO_CONTENT)
}
