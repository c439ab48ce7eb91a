use axum::{
    routing::{post, put},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/sessions", post(handlers::sessions::book_session))
        .route(
            "/api/sessions/:id/schedule",
            put(handlers::sessions::reschedule_session),
        )
        .route("/api/sessions/:id/cancel", post(handlers::sessions::cancel_session))
}
