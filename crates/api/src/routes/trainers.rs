use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/trainers", get(handlers::trainers::list_trainers))
        .route(
            "/api/trainers/:id/sessions",
            get(handlers::trainers::upcoming_sessions),
        )
        .route(
            "/api/trainers/:id/unavailability",
            post(handlers::trainers::declare_unavailability),
        )
        .route(
            "/api/unavailability/:id",
            put(handlers::trainers::update_unavailability),
        )
}
