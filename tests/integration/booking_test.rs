//! Integration tests for booking and cancelling class occurrences.

mod helpers;

use helpers::{TestApp, date, next_monday};
use http::StatusCode;
use studiohub_entity::attendance::AttendanceStatus;

#[tokio::test]
async fn test_capacity_scenario_cancel_frees_seat() {
    let app = TestApp::new().await;
    let session = app.create_session(0, 2).await;
    let a = app.client("a@studio.test").await;
    let b = app.client("b@studio.test").await;
    let c = app.client("c@studio.test").await;

    let booked_a = app.book(&a, session, next_monday()).await;
    assert_eq!(booked_a.status, StatusCode::OK);
    assert_eq!(booked_a.body["status"], "PLANNED");
    assert_eq!(booked_a.body["class_date"], "2025-03-10");
    assert_eq!(booked_a.body["start_time"], "18:00:00");

    assert_eq!(app.book(&b, session, next_monday()).await.status, StatusCode::OK);

    let full = app.book(&c, session, next_monday()).await;
    assert_eq!(full.status, StatusCode::BAD_REQUEST);
    assert_eq!(full.code(), "CONFLICT");
    assert_eq!(full.detail(), "Class is full");

    let canceled = app.cancel(&a, booked_a.id("attendance_id")).await;
    assert_eq!(canceled.status, StatusCode::OK);
    assert_eq!(canceled.body["status"], "CANCELED");

    assert_eq!(app.book(&c, session, next_monday()).await.status, StatusCode::OK);
}

#[tokio::test]
async fn test_weekday_mismatch_creates_nothing() {
    let app = TestApp::new().await;
    let session = app.create_session(0, 10).await;
    let a = app.client("a@studio.test").await;

    let response = app.book(&a, session, date(2025, 3, 11)).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.code(), "INVALID_REQUEST");
    assert_eq!(
        response.detail(),
        "class_date does not match class_session weekday"
    );
    assert_eq!(app.store.attendance_count().await, 0);
}

#[tokio::test]
async fn test_double_booking_is_rejected() {
    let app = TestApp::new().await;
    let session = app.create_session(0, 10).await;
    let a = app.client("a@studio.test").await;

    assert_eq!(app.book(&a, session, next_monday()).await.status, StatusCode::OK);
    let again = app.book(&a, session, next_monday()).await;

    assert_eq!(again.status, StatusCode::BAD_REQUEST);
    assert_eq!(again.code(), "CONFLICT");
    assert_eq!(again.detail(), "You are already booked for this class and date");
    assert_eq!(app.store.attendance_count().await, 1);
}

#[tokio::test]
async fn test_unknown_session_is_not_found() {
    let app = TestApp::new().await;
    let a = app.client("a@studio.test").await;

    let response = app.book(&a, 424242, next_monday()).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.code(), "NOT_FOUND");
}

#[tokio::test]
async fn test_malformed_body_is_bad_request() {
    let app = TestApp::new().await;
    let a = app.client("a@studio.test").await;

    let bad_date = app
        .request(
            "POST",
            "/api/me/classes/book",
            Some(serde_json::json!({ "class_session_id": 1, "class_date": "next monday" })),
            Some(&a.token),
        )
        .await;
    assert_eq!(bad_date.status, StatusCode::BAD_REQUEST);
    assert_eq!(bad_date.code(), "INVALID_REQUEST");

    let bad_id = app
        .request(
            "POST",
            "/api/me/classes/book",
            Some(serde_json::json!({ "class_session_id": 0, "class_date": "2025-03-10" })),
            Some(&a.token),
        )
        .await;
    assert_eq!(bad_id.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_cancel_twice_returns_canceled_both_times() {
    let app = TestApp::new().await;
    let session = app.create_session(0, 10).await;
    let a = app.client("a@studio.test").await;
    let id = app.book(&a, session, next_monday()).await.id("attendance_id");

    let first = app.cancel(&a, id).await;
    let second = app.cancel(&a, id).await;

    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(second.status, StatusCode::OK);
    assert_eq!(first.body, second.body);
    assert_eq!(second.body["status"], "CANCELED");
}

#[tokio::test]
async fn test_cancel_someone_elses_booking_is_not_found() {
    let app = TestApp::new().await;
    let session = app.create_session(0, 10).await;
    let owner = app.client("owner@studio.test").await;
    let intruder = app.client("intruder@studio.test").await;
    let id = app.book(&owner, session, next_monday()).await.id("attendance_id");

    let response = app.cancel(&intruder, id).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.detail(), "Attendance not found");
}

#[tokio::test]
async fn test_cancel_attended_is_rejected() {
    let app = TestApp::new().await;
    let session = app.create_session(0, 10).await;
    let a = app.client("a@studio.test").await;
    let id = app.book(&a, session, next_monday()).await.id("attendance_id");
    app.store
        .set_attendance_status(id, AttendanceStatus::Attended)
        .await
        .unwrap();

    let response = app.cancel(&a, id).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.code(), "INVALID_REQUEST");
    assert_eq!(response.detail(), "Cannot cancel already attended class");
}

#[tokio::test]
async fn test_require_active_policy_consumes_visits() {
    let app = TestApp::with_policy("require_active").await;
    let session = app.create_session(0, 10).await;
    let a = app.client("a@studio.test").await;

    let refused = app.book(&a, session, next_monday()).await;
    assert_eq!(refused.status, StatusCode::BAD_REQUEST);
    assert_eq!(refused.code(), "INVALID_REQUEST");

    let membership_id = app.sell_membership(a.id, Some(2)).await;
    let booked = app.book(&a, session, next_monday()).await;
    assert_eq!(booked.status, StatusCode::OK);

    let memberships = app
        .request("GET", "/api/me/memberships", None, Some(&a.token))
        .await;
    assert_eq!(memberships.status, StatusCode::OK);
    assert_eq!(memberships.body["active"][0]["id"], membership_id);
    assert_eq!(memberships.body["active"][0]["visits_used"], 1);
    assert_eq!(memberships.body["active"][0]["visits_remaining"], 1);

    app.cancel(&a, booked.id("attendance_id")).await;
    let memberships = app
        .request("GET", "/api/me/memberships", None, Some(&a.token))
        .await;
    assert_eq!(memberships.body["active"][0]["visits_remaining"], 2);
}
