//! Integration tests for the my-classes and calendar views.

mod helpers;

use helpers::{TestApp, date, next_monday};
use http::StatusCode;

#[tokio::test]
async fn test_my_classes_buckets() {
    let app = TestApp::new().await;
    let monday = app.create_session(0, 10).await;
    let a = app.client("a@studio.test").await;

    let past = app.book(&a, monday, date(2025, 3, 3)).await.id("attendance_id");
    let upcoming = app.book(&a, monday, next_monday()).await.id("attendance_id");
    let dropped = app.book(&a, monday, date(2025, 3, 17)).await.id("attendance_id");
    app.cancel(&a, dropped).await;

    let response = app.request("GET", "/api/me/classes", None, Some(&a.token)).await;

    assert_eq!(response.status, StatusCode::OK);
    let ids = |bucket: &str| -> Vec<i64> {
        response.body[bucket]
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["attendance_id"].as_i64().unwrap())
            .collect()
    };
    assert_eq!(ids("upcoming"), vec![upcoming]);
    assert_eq!(ids("history"), vec![past, dropped]);
}

#[tokio::test]
async fn test_my_classes_only_shows_own_bookings() {
    let app = TestApp::new().await;
    let monday = app.create_session(0, 10).await;
    let a = app.client("a@studio.test").await;
    let b = app.client("b@studio.test").await;
    app.book(&b, monday, next_monday()).await;

    let response = app.request("GET", "/api/me/classes", None, Some(&a.token)).await;

    assert_eq!(response.body["upcoming"].as_array().unwrap().len(), 0);
    assert_eq!(response.body["history"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_calendar_groups_range_by_date() {
    let app = TestApp::new().await;
    let monday = app.create_session(0, 10).await;
    let wednesday = app.create_session(2, 10).await;
    let a = app.client("a@studio.test").await;

    app.book(&a, monday, next_monday()).await;
    app.book(&a, wednesday, date(2025, 3, 12)).await;
    app.book(&a, monday, date(2025, 3, 17)).await;
    app.book(&a, monday, date(2025, 3, 24)).await;

    let response = app
        .request(
            "GET",
            "/api/me/calendar?start_date=2025-03-10&end_date=2025-03-17",
            None,
            Some(&a.token),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["start_date"], "2025-03-10");
    assert_eq!(response.body["end_date"], "2025-03-17");
    let days = response.body["days"].as_array().unwrap();
    let dates: Vec<&str> = days.iter().map(|d| d["date"].as_str().unwrap()).collect();
    assert_eq!(dates, vec!["2025-03-10", "2025-03-12", "2025-03-17"]);
    assert!(days.iter().all(|d| d["classes"].as_array().unwrap().len() == 1));
}

#[tokio::test]
async fn test_calendar_rejects_inverted_range() {
    let app = TestApp::new().await;
    let a = app.client("a@studio.test").await;

    let response = app
        .request(
            "GET",
            "/api/me/calendar?start_date=2025-03-17&end_date=2025-03-10",
            None,
            Some(&a.token),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.code(), "INVALID_REQUEST");
}

#[tokio::test]
async fn test_calendar_requires_both_dates() {
    let app = TestApp::new().await;
    let a = app.client("a@studio.test").await;

    let response = app
        .request(
            "GET",
            "/api/me/calendar?start_date=2025-03-17",
            None,
            Some(&a.token),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}
