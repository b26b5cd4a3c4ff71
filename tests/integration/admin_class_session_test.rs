//! Integration tests for class session administration and the public schedule.

mod helpers;

use helpers::{TestApp, next_monday};
use http::StatusCode;
use serde_json::{Value, json};

fn session_body(app: &TestApp, weekday: i64, capacity: i64) -> Value {
    json!({
        "location_id": app.catalog.location_id,
        "program_type_id": app.catalog.program_type_id,
        "trainer_id": app.catalog.trainer_id,
        "weekday": weekday,
        "start_time": "07:00:00",
        "end_time": "08:00:00",
        "capacity": capacity,
    })
}

#[tokio::test]
async fn test_client_cannot_manage_sessions() {
    let app = TestApp::new().await;
    let client = app.client("a@studio.test").await;

    let response = app
        .request(
            "POST",
            "/api/admin/class-sessions",
            Some(session_body(&app, 0, 10)),
            Some(&client.token),
        )
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.code(), "AUTHORIZATION");
}

#[tokio::test]
async fn test_create_get_and_list() {
    let app = TestApp::new().await;
    let admin = app.admin().await;

    let created = app
        .request(
            "POST",
            "/api/admin/class-sessions",
            Some(session_body(&app, 3, 15)),
            Some(&admin.token),
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.body["is_active"], true);
    let id = created.id("id");

    let fetched = app
        .request(
            "GET",
            &format!("/api/admin/class-sessions/{id}"),
            None,
            Some(&admin.token),
        )
        .await;
    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(fetched.body["capacity"], 15);

    let listed = app
        .request(
            "GET",
            "/api/admin/class-sessions?weekday=3",
            None,
            Some(&admin.token),
        )
        .await;
    assert_eq!(listed.body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_list_hides_deactivated_sessions_unless_asked() {
    let app = TestApp::new().await;
    let admin = app.admin().await;
    let running = app.create_session(0, 10).await;
    let retired = app.create_session(2, 10).await;
    app.request(
        "POST",
        &format!("/api/admin/class-sessions/{retired}/cancel"),
        None,
        Some(&admin.token),
    )
    .await;

    let list = |query: &'static str| {
        let app = &app;
        let token = admin.token.clone();
        async move {
            let response = app
                .request(
                    "GET",
                    &format!("/api/admin/class-sessions{query}"),
                    None,
                    Some(&token),
                )
                .await;
            assert_eq!(response.status, StatusCode::OK);
            response
                .body
                .as_array()
                .unwrap()
                .iter()
                .map(|s| s["id"].as_i64().unwrap())
                .collect::<Vec<_>>()
        }
    };

    assert_eq!(list("").await, vec![running]);
    assert_eq!(list("?include_inactive=true").await, vec![running, retired]);
    assert_eq!(list("?is_active=false").await, vec![retired]);
}

#[tokio::test]
async fn test_create_rejects_invalid_shape_and_references() {
    let app = TestApp::new().await;
    let admin = app.admin().await;

    let bad_weekday = app
        .request(
            "POST",
            "/api/admin/class-sessions",
            Some(session_body(&app, 7, 10)),
            Some(&admin.token),
        )
        .await;
    assert_eq!(bad_weekday.status, StatusCode::BAD_REQUEST);

    let mut inverted = session_body(&app, 1, 10);
    inverted["end_time"] = json!("06:00:00");
    let response = app
        .request(
            "POST",
            "/api/admin/class-sessions",
            Some(inverted),
            Some(&admin.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.detail(), "end_time must be after start_time");

    let mut unknown_trainer = session_body(&app, 1, 10);
    unknown_trainer["trainer_id"] = json!(99999);
    let response = app
        .request(
            "POST",
            "/api/admin/class-sessions",
            Some(unknown_trainer),
            Some(&admin.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_patch_updates_only_given_fields() {
    let app = TestApp::new().await;
    let admin = app.admin().await;
    let id = app.create_session(0, 10).await;

    let response = app
        .request(
            "PATCH",
            &format!("/api/admin/class-sessions/{id}"),
            Some(json!({ "capacity": 25, "membership_plan_id": app.catalog.plan_id })),
            Some(&admin.token),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["capacity"], 25);
    assert_eq!(response.body["membership_plan_id"], app.catalog.plan_id);
    assert_eq!(response.body["weekday"], 0);

    let cleared = app
        .request(
            "PATCH",
            &format!("/api/admin/class-sessions/{id}"),
            Some(json!({ "membership_plan_id": null })),
            Some(&admin.token),
        )
        .await;
    assert_eq!(cleared.body["membership_plan_id"], Value::Null);
    assert_eq!(cleared.body["capacity"], 25);
}

#[tokio::test]
async fn test_deactivated_session_cannot_be_booked_and_keeps_history() {
    let app = TestApp::new().await;
    let admin = app.admin().await;
    let client = app.client("a@studio.test").await;
    let id = app.create_session(0, 10).await;
    let booked = app.book(&client, id, next_monday()).await;
    assert_eq!(booked.status, StatusCode::OK);

    let path = format!("/api/admin/class-sessions/{id}/cancel");
    let first = app.request("POST", &path, None, Some(&admin.token)).await;
    let second = app.request("POST", &path, None, Some(&admin.token)).await;
    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(second.status, StatusCode::OK);
    assert_eq!(second.body["is_active"], false);

    let other = app.client("b@studio.test").await;
    let refused = app.book(&other, id, next_monday()).await;
    assert_eq!(refused.status, StatusCode::NOT_FOUND);

    let classes = app
        .request("GET", "/api/me/classes", None, Some(&client.token))
        .await;
    assert_eq!(classes.body["upcoming"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_delete_only_when_never_booked() {
    let app = TestApp::new().await;
    let admin = app.admin().await;
    let client = app.client("a@studio.test").await;
    let unused = app.create_session(0, 10).await;
    let booked = app.create_session(0, 10).await;
    app.book(&client, booked, next_monday()).await;

    let deleted = app
        .request(
            "DELETE",
            &format!("/api/admin/class-sessions/{unused}"),
            None,
            Some(&admin.token),
        )
        .await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);

    let refused = app
        .request(
            "DELETE",
            &format!("/api/admin/class-sessions/{booked}"),
            None,
            Some(&admin.token),
        )
        .await;
    assert_eq!(refused.status, StatusCode::BAD_REQUEST);
    assert_eq!(refused.code(), "CONFLICT");
    assert_eq!(app.store.attendance_count().await, 1);

    let missing = app
        .request(
            "DELETE",
            &format!("/api/admin/class-sessions/{unused}"),
            None,
            Some(&admin.token),
        )
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_public_schedule() {
    let app = TestApp::new().await;
    let admin = app.admin().await;
    let evening = app.create_session(0, 10).await;
    let hidden = app.create_session(1, 10).await;
    app.request(
        "POST",
        &format!("/api/admin/class-sessions/{hidden}/cancel"),
        None,
        Some(&admin.token),
    )
    .await;

    let response = app
        .request(
            "GET",
            &format!("/api/schedule?location_id={}", app.catalog.location_id),
            None,
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let sessions = response.body.as_array().unwrap();
    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0]["id"], evening);

    let missing_location = app.request("GET", "/api/schedule", None, None).await;
    assert_eq!(missing_location.status, StatusCode::BAD_REQUEST);

    let unknown = app
        .request("GET", "/api/schedule?location_id=999999", None, None)
        .await;
    assert_eq!(unknown.status, StatusCode::NOT_FOUND);
}
