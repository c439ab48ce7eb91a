use axum::{
    routing::{get, put},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/members", get(handlers::members::search_members))
        .route("/api/members/:id", get(handlers::members::get_member))
        .route(
            "/api/members/:id/schedule",
            get(handlers::members::member_schedule),
        )
        .route(
            "/api/members/:id/goals",
            get(handlers::members::list_goals).post(handlers::members::add_goal),
        )
        .route(
            "/api/members/:id/goals/:goal_id",
            put(handlers::members::update_goal),
        )
        .route(
            "/api/members/:id/metrics",
            get(handlers::members::list_metrics).post(handlers::members::add_metric),
        )
        .route(
            "/api/members/:id/metrics/:metric_id",
            put(handlers::members::update_metric),
        )
}
