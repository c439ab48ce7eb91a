use axum::http::StatusCode;
use fitclub_core::models::{
    booking::{BookingOutcome, RejectReason},
    class::BookingStatus,
    maintenance::MaintenanceStatus,
};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::test_utils::{at, TestContext, CLASS_CAPACITY};

async fn schedule_yoga(ctx: &TestContext, hour: u32) -> Uuid {
    let response = ctx
        .server
        .post("/api/classes")
        .json(&json!({
            "name": "Sunrise Flow",
            "activity": "yoga",
            "room_id": ctx.studio,
            "trainer_id": ctx.yoga_trainer,
            "start": at(hour, 0),
            "duration_minutes": 60,
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    response
        .json::<BookingOutcome>()
        .approved_id()
        .expect("class approved")
}

#[tokio::test]
async fn health_reports_ok() {
    let ctx = TestContext::new().await;

    let response = ctx.server.get("/health").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>(), json!({ "status": "ok" }));
}

#[tokio::test]
async fn scheduling_into_a_booked_room_is_a_conflict() {
    let ctx = TestContext::new().await;
    schedule_yoga(&ctx, 9).await;

    let response = ctx
        .server
        .post("/api/classes")
        .json(&json!({
            "name": "Lift",
            "activity": "strength",
            "room_id": ctx.studio,
            "trainer_id": ctx.strength_trainer,
            "start": at(9, 30),
            "duration_minutes": 45,
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::CONFLICT);
    assert_eq!(
        response.json::<Value>(),
        json!({ "outcome": "rejected", "reason": "room_conflict" })
    );
}

#[tokio::test]
async fn unknown_trainer_is_not_found() {
    let ctx = TestContext::new().await;

    let response = ctx
        .server
        .post("/api/classes")
        .json(&json!({
            "name": "Ghost class",
            "activity": "cardio",
            "room_id": ctx.gym,
            "trainer_id": Uuid::new_v4(),
            "start": at(11, 0),
            "duration_minutes": 30,
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(
        response.json::<BookingOutcome>(),
        BookingOutcome::rejected(RejectReason::NotFound)
    );
}

#[tokio::test]
async fn non_positive_duration_is_a_bad_request() {
    let ctx = TestContext::new().await;

    let response = ctx
        .server
        .post("/api/classes")
        .json(&json!({
            "name": "Instant",
            "activity": "cardio",
            "room_id": ctx.gym,
            "trainer_id": ctx.strength_trainer,
            "start": at(11, 0),
            "duration_minutes": 0,
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert!(response.json::<Value>()["error"].is_string());
}

#[tokio::test]
async fn unknown_activity_is_rejected_by_the_extractor() {
    let ctx = TestContext::new().await;

    let response = ctx
        .server
        .post("/api/classes")
        .json(&json!({
            "name": "Pilates",
            "activity": "pilates",
            "room_id": ctx.gym,
            "trainer_id": ctx.strength_trainer,
            "start": at(11, 0),
            "duration_minutes": 30,
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn registrations_stop_at_capacity() {
    let ctx = TestContext::new().await;
    let class_id = schedule_yoga(&ctx, 9).await;
    let path = format!("/api/classes/{}/registrations", class_id);

    for member in ctx.members.iter().take(CLASS_CAPACITY as usize) {
        let response = ctx.server.post(&path).json(&json!({ "member_id": member })).await;
        assert_eq!(response.status_code(), StatusCode::OK);
    }

    let overflow = ctx
        .server
        .post(&path)
        .json(&json!({ "member_id": ctx.members[CLASS_CAPACITY as usize] }))
        .await;
    assert_eq!(overflow.status_code(), StatusCode::CONFLICT);
    assert_eq!(
        overflow.json::<BookingOutcome>().reason(),
        Some(RejectReason::CapacityExceeded)
    );
}

#[tokio::test]
async fn dropping_a_registration_frees_the_spot() {
    let ctx = TestContext::new().await;
    let class_id = schedule_yoga(&ctx, 9).await;
    let member = ctx.members[0];

    ctx.server
        .post(&format!("/api/classes/{}/registrations", class_id))
        .json(&json!({ "member_id": member }))
        .await;

    let path = format!("/api/classes/{}/registrations/{}", class_id, member);
    let dropped = ctx.server.delete(&path).await;
    assert_eq!(dropped.status_code(), StatusCode::OK);
    assert!(ctx.store.entries_for_class(class_id).await.is_empty());

    let again = ctx.server.delete(&path).await;
    assert_eq!(again.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn cancelling_a_class_removes_registrations() {
    let ctx = TestContext::new().await;
    let class_id = schedule_yoga(&ctx, 9).await;
    ctx.server
        .post(&format!("/api/classes/{}/registrations", class_id))
        .json(&json!({ "member_id": ctx.members[1] }))
        .await;

    let response = ctx.server.post(&format!("/api/classes/{}/cancel", class_id)).await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let class = ctx.store.class(class_id).await.expect("class kept");
    assert_eq!(class.status, BookingStatus::Cancelled);
    assert!(ctx.store.entries_for_class(class_id).await.is_empty());
}

#[tokio::test]
async fn moving_a_class_onto_itself_is_allowed() {
    let ctx = TestContext::new().await;
    let class_id = schedule_yoga(&ctx, 9).await;

    let response = ctx
        .server
        .put(&format!("/api/classes/{}/schedule", class_id))
        .json(&json!({ "start": at(9, 30), "duration_minutes": 60 }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let class = ctx.store.class(class_id).await.expect("class kept");
    assert_eq!(class.interval.start, at(9, 30));
}

#[tokio::test]
async fn private_session_clashing_with_a_class_is_a_trainer_conflict() {
    let ctx = TestContext::new().await;
    schedule_yoga(&ctx, 9).await;

    let response = ctx
        .server
        .post("/api/sessions")
        .json(&json!({
            "member_id": ctx.members[0],
            "trainer_id": ctx.yoga_trainer,
            "start": at(9, 45),
            "duration_minutes": 30,
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::CONFLICT);
    assert_eq!(
        response.json::<BookingOutcome>().reason(),
        Some(RejectReason::TrainerConflict)
    );
}

#[tokio::test]
async fn session_can_only_be_cancelled_by_its_member() {
    let ctx = TestContext::new().await;
    let booked = ctx
        .server
        .post("/api/sessions")
        .json(&json!({
            "member_id": ctx.members[0],
            "trainer_id": ctx.strength_trainer,
            "start": at(15, 0),
            "duration_minutes": 60,
        }))
        .await;
    let session_id = booked.json::<BookingOutcome>().approved_id().expect("session approved");
    let path = format!("/api/sessions/{}/cancel", session_id);

    let stranger = ctx.server.post(&path).json(&json!({ "member_id": ctx.members[1] })).await;
    assert_eq!(stranger.status_code(), StatusCode::NOT_FOUND);

    let owner = ctx.server.post(&path).json(&json!({ "member_id": ctx.members[0] })).await;
    assert_eq!(owner.status_code(), StatusCode::OK);
    let entry = ctx.store.schedule_entry(session_id).await.expect("entry kept");
    assert_eq!(entry.status, BookingStatus::Cancelled);
}

#[tokio::test]
async fn maintenance_over_an_equipment_class_is_refused() {
    let ctx = TestContext::new().await;
    schedule_yoga(&ctx, 9).await;

    let response = ctx
        .server
        .post("/api/maintenance")
        .json(&json!({ "start": at(8, 30), "duration_minutes": 60 }))
        .await;

    assert_eq!(response.status_code(), StatusCode::CONFLICT);
    assert_eq!(
        response.json::<BookingOutcome>().reason(),
        Some(RejectReason::EquipmentConflict)
    );
}

#[tokio::test]
async fn completing_maintenance_updates_its_status() {
    let ctx = TestContext::new().await;
    let scheduled = ctx
        .server
        .post("/api/maintenance")
        .json(&json!({ "start": at(6, 0), "duration_minutes": 120 }))
        .await;
    let window_id = scheduled.json::<BookingOutcome>().approved_id().expect("window approved");

    let response = ctx
        .server
        .put(&format!("/api/maintenance/{}/status", window_id))
        .json(&json!({ "status": "completed" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let window = ctx.store.maintenance(window_id).await.expect("window kept");
    assert_eq!(window.status, MaintenanceStatus::Completed);
}

#[tokio::test]
async fn declared_unavailability_blocks_bookings() {
    let ctx = TestContext::new().await;
    let declared = ctx
        .server
        .post(&format!("/api/trainers/{}/unavailability", ctx.strength_trainer))
        .json(&json!({ "start": at(12, 0), "end": at(14, 0) }))
        .await;
    assert_eq!(declared.status_code(), StatusCode::OK);

    let response = ctx
        .server
        .post("/api/sessions")
        .json(&json!({
            "member_id": ctx.members[2],
            "trainer_id": ctx.strength_trainer,
            "start": at(13, 0),
            "duration_minutes": 30,
        }))
        .await;

    assert_eq!(
        response.json::<BookingOutcome>().reason(),
        Some(RejectReason::TrainerConflict)
    );
}

#[tokio::test]
async fn inverted_unavailability_is_a_bad_request() {
    let ctx = TestContext::new().await;

    let response = ctx
        .server
        .post(&format!("/api/trainers/{}/unavailability", ctx.yoga_trainer))
        .json(&json!({ "start": at(14, 0), "end": at(12, 0) }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}
