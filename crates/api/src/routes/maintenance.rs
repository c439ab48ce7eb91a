use axum::{
    routing::{post, put},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/maintenance",
            post(handlers::maintenance::schedule_maintenance)
                .get(handlers::maintenance::list_maintenance),
        )
        .route(
            "/api/maintenance/:id/schedule",
            put(handlers::maintenance::reschedule_maintenance),
        )
        .route(
            "/api/maintenance/:id/status",
            put(handlers::maintenance::update_status),
        )
}
