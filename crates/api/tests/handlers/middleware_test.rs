use axum::{http::StatusCode, response::IntoResponse};
use fitclub_api::middleware::error_handling::{map_error, AppError, OutcomeResponse};
use fitclub_core::{
    errors::ClubError,
    models::booking::{BookingOutcome, RejectReason},
};
use pretty_assertions::assert_eq;
use rstest::rstest;
use uuid::Uuid;

#[rstest]
#[case(ClubError::NotFound("class".to_string()), StatusCode::NOT_FOUND)]
#[case(ClubError::Validation("bad interval".to_string()), StatusCode::BAD_REQUEST)]
#[case(ClubError::Storage(eyre::eyre!("connection reset")), StatusCode::INTERNAL_SERVER_ERROR)]
fn errors_map_to_status(#[case] error: ClubError, #[case] expected: StatusCode) {
    assert_eq!(map_error(error).status(), expected);
}

#[rstest]
#[case(BookingOutcome::approved(Uuid::nil()), StatusCode::OK)]
#[case(BookingOutcome::rejected(RejectReason::NotFound), StatusCode::NOT_FOUND)]
#[case(BookingOutcome::rejected(RejectReason::RoomConflict), StatusCode::CONFLICT)]
#[case(BookingOutcome::rejected(RejectReason::TrainerConflict), StatusCode::CONFLICT)]
#[case(BookingOutcome::rejected(RejectReason::EquipmentConflict), StatusCode::CONFLICT)]
#[case(BookingOutcome::rejected(RejectReason::CapacityExceeded), StatusCode::CONFLICT)]
fn outcomes_map_to_status(#[case] outcome: BookingOutcome, #[case] expected: StatusCode) {
    assert_eq!(OutcomeResponse(outcome).into_response().status(), expected);
}

#[test]
fn eyre_reports_become_storage_errors() {
    let error: AppError = eyre::eyre!("pool timed out").into();
    assert!(matches!(error.0, ClubError::Storage(_)));
}

#[test_log::test(tokio::test)]
async fn storage_details_stay_out_of_the_body() {
    let response = map_error(ClubError::Storage(eyre::eyre!("password authentication failed")));

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body, serde_json::json!({ "error": "Internal server error" }));
}
