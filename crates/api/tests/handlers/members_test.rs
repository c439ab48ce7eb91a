use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::test_utils::TestContext;

#[tokio::test]
async fn blank_search_name_is_a_bad_request() {
    let ctx = TestContext::new().await;

    let response = ctx.server.get("/api/members").add_query_param("name", "   ").await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert!(response.json::<Value>()["error"].is_string());
}

#[tokio::test]
async fn search_without_name_is_rejected_by_the_extractor() {
    let ctx = TestContext::new().await;

    let response = ctx.server.get("/api/members").await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn empty_goal_fields_are_a_bad_request() {
    let ctx = TestContext::new().await;

    let response = ctx
        .server
        .post(&format!("/api/members/{}/goals", ctx.members[0]))
        .json(&json!({ "goal_type": "", "target_value": "10k under 50 minutes" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn empty_goal_update_is_a_bad_request() {
    let ctx = TestContext::new().await;

    let response = ctx
        .server
        .put(&format!("/api/members/{}/goals/{}", ctx.members[0], Uuid::new_v4()))
        .json(&json!({ "target_value": " " }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn empty_metric_value_is_a_bad_request() {
    let ctx = TestContext::new().await;

    let created = ctx
        .server
        .post(&format!("/api/members/{}/metrics", ctx.members[1]))
        .json(&json!({ "metric_type": "Weight", "metric_value": "" }))
        .await;
    assert_eq!(created.status_code(), StatusCode::BAD_REQUEST);

    let updated = ctx
        .server
        .put(&format!("/api/members/{}/metrics/{}", ctx.members[1], Uuid::new_v4()))
        .json(&json!({ "metric_value": "" }))
        .await;
    assert_eq!(updated.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn goal_without_target_is_rejected_by_the_extractor() {
    let ctx = TestContext::new().await;

    let response = ctx
        .server
        .post(&format!("/api/members/{}/goals", ctx.members[0]))
        .json(&json!({ "goal_type": "Strength" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
}
