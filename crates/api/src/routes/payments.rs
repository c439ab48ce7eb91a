use axum::{
    routing::{get, put},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/payments/unprocessed",
            get(handlers::payments::list_unprocessed),
        )
        .route("/api/payments/:id/status", put(handlers::payments::update_status))
}
