//! # Error Handling Middleware
//!
//! Maps domain errors and booking outcomes to HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use fitclub_core::errors::ClubError;
use fitclub_core::models::booking::{BookingOutcome, RejectReason};
use serde_json::json;

/// Application error wrapper that provides HTTP status code mapping.
///
/// Storage failures are logged here and answered with a 500;
/// their details stay out of the response body.
#[derive(Debug)]
pub struct AppError(pub ClubError);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            ClubError::NotFound(_) => (StatusCode::NOT_FOUND, self.0.to_string()),
            ClubError::Validation(_) => (StatusCode::BAD_REQUEST, self.0.to_string()),
            ClubError::Storage(_) => {
                tracing::error!("Request failed: {:?}", self.0);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<ClubError> for AppError {
    fn from(err: ClubError) -> Self {
        AppError(err)
    }
}

impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        AppError(ClubError::Storage(err))
    }
}

/// A booking decision rendered as a response.
///
/// Approvals are `200`, a missing referenced record is `404` and every other
/// rejection is `409 Conflict`. The body is the serialized outcome.
#[derive(Debug)]
pub struct OutcomeResponse(pub BookingOutcome);

impl OutcomeResponse {
    pub fn status(&self) -> StatusCode {
        match self.0.reason() {
            None => StatusCode::OK,
            Some(RejectReason::NotFound) => StatusCode::NOT_FOUND,
            Some(_) => StatusCode::CONFLICT,
        }
    }
}

impl From<BookingOutcome> for OutcomeResponse {
    fn from(outcome: BookingOutcome) -> Self {
        OutcomeResponse(outcome)
    }
}

impl IntoResponse for OutcomeResponse {
    fn into_response(self) -> Response {
        (self.status(), Json(self.0)).into_response()
    }
}

pub fn map_error(err: ClubError) -> Response {
    AppError(err).into_response()
}
