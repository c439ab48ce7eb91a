use axum::{
    routing::{delete, post, put},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/classes",
            post(handlers::classes::schedule_class).get(handlers::classes::list_classes),
        )
        .route(
            "/api/classes/:id/schedule",
            put(handlers::classes::update_class_schedule),
        )
        .route("/api/classes/:id/cancel", post(handlers::classes::cancel_class))
        .route("/api/classes/:id/registrations", post(handlers::classes::register))
        .route(
            "/api/classes/:id/registrations/:member_id",
            delete(handlers::classes::drop_registration),
        )
}
