use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use fitclub_core::{
    errors::ClubError,
    models::{
        booking::ScheduleItem,
        member::{
            FitnessGoal, HealthMetric, Member, MemberSearchQuery, NewGoalRequest,
            NewMetricRequest, UpdateGoalRequest, UpdateMetricRequest,
        },
    },
};
use fitclub_db::repositories::members;
use std::sync::Arc;
use uuid::Uuid;

use crate::{middleware::error_handling::AppError, ApiState};

fn member_not_found(id: Uuid) -> AppError {
    ClubError::NotFound(format!("Member with ID {} not found", id)).into()
}

#[axum::debug_handler]
pub async fn member_schedule(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<ScheduleItem>>, AppError> {
    let schedule = members::member_schedule(&state.db_pool, id).await?;
    Ok(Json(schedule))
}

#[axum::debug_handler]
pub async fn get_member(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Member>, AppError> {
    let member = members::find_member(&state.db_pool, id)
        .await?
        .ok_or_else(|| member_not_found(id))?;
    Ok(Json(member))
}

#[axum::debug_handler]
pub async fn search_members(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<MemberSearchQuery>,
) -> Result<Json<Vec<Member>>, AppError> {
    let fragment = query.fragment()?;
    let found = members::search_members(&state.db_pool, fragment).await?;
    Ok(Json(found))
}

#[axum::debug_handler]
pub async fn add_goal(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<NewGoalRequest>,
) -> Result<(StatusCode, Json<FitnessGoal>), AppError> {
    payload.validate()?;
    let goal = members::add_fitness_goal(&state.db_pool, id, &payload.goal_type, &payload.target_value)
        .await?
        .ok_or_else(|| member_not_found(id))?;
    Ok((StatusCode::CREATED, Json(goal)))
}

#[axum::debug_handler]
pub async fn update_goal(
    State(state): State<Arc<ApiState>>,
    Path((id, goal_id)): Path<(Uuid, Uuid)>,
    Json(payload): Json<UpdateGoalRequest>,
) -> Result<Json<FitnessGoal>, AppError> {
    payload.validate()?;
    let goal = members::update_fitness_goal(&state.db_pool, id, goal_id, &payload.target_value)
        .await?
        .ok_or_else(|| ClubError::NotFound(format!("Fitness goal with ID {} not found", goal_id)))?;
    Ok(Json(goal))
}

#[axum::debug_handler]
pub async fn list_goals(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<FitnessGoal>>, AppError> {
    let goals = members::fitness_goals(&state.db_pool, id).await?;
    Ok(Json(goals))
}

#[axum::debug_handler]
pub async fn add_metric(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<NewMetricRequest>,
) -> Result<(StatusCode, Json<HealthMetric>), AppError> {
    payload.validate()?;
    let metric = members::add_health_metric(&state.db_pool, id, &payload.metric_type, &payload.metric_value)
        .await?
        .ok_or_else(|| member_not_found(id))?;
    Ok((StatusCode::CREATED, Json(metric)))
}

#[axum::debug_handler]
pub async fn update_metric(
    State(state): State<Arc<ApiState>>,
    Path((id, metric_id)): Path<(Uuid, Uuid)>,
    Json(payload): Json<UpdateMetricRequest>,
) -> Result<Json<HealthMetric>, AppError> {
    payload.validate()?;
    let metric = members::update_health_metric(&state.db_pool, id, metric_id, &payload.metric_value)
        .await?
        .ok_or_else(|| ClubError::NotFound(format!("Health metric with ID {} not found", metric_id)))?;
    Ok(Json(metric))
}

#[axum::debug_handler]
pub async fn list_metrics(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<HealthMetric>>, AppError> {
    let metrics = members::health_metrics(&state.db_pool, id).await?;
    Ok(Json(metrics))
}
