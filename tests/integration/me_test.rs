//! Integration tests for the client's memberships and profile endpoints.

mod helpers;

use helpers::{TestApp, date};
use http::StatusCode;
use serde_json::{Value, json};

use studiohub_entity::membership::MembershipStatus;
use studiohub_entity::membership::model::CreateMembership;

fn ids(list: &Value) -> Vec<i64> {
    list.as_array()
        .unwrap()
        .iter()
        .map(|m| m["id"].as_i64().unwrap())
        .collect()
}

#[tokio::test]
async fn test_memberships_split_into_active_and_history() {
    let app = TestApp::new().await;
    let a = app.client("a@studio.test").await;
    let current = app.sell_membership(a.id, Some(8)).await;
    let lapsed = app
        .store
        .add_membership(CreateMembership {
            user_id: a.id,
            membership_plan_id: app.catalog.plan_id,
            start_date: date(2025, 2, 1),
            end_date: date(2025, 2, 28),
            total_visits: Some(8),
        })
        .await
        .id;
    let frozen = app
        .store
        .add_membership(CreateMembership {
            user_id: a.id,
            membership_plan_id: app.catalog.plan_id,
            start_date: date(2025, 2, 15),
            end_date: date(2025, 4, 15),
            total_visits: None,
        })
        .await
        .id;
    app.store
        .set_membership_status(frozen, MembershipStatus::Frozen)
        .await;

    let response = app
        .request("GET", "/api/me/memberships", None, Some(&a.token))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(ids(&response.body["active"]), vec![current]);
    assert_eq!(response.body["active"][0]["visits_remaining"], 8);
    assert_eq!(ids(&response.body["history"]), vec![frozen, lapsed]);
    assert_eq!(response.body["history"][0]["status"], "FROZEN");
    assert_eq!(response.body["history"][0]["visits_remaining"], Value::Null);
}

#[tokio::test]
async fn test_memberships_empty_for_new_client() {
    let app = TestApp::new().await;
    let a = app.client("a@studio.test").await;

    let response = app
        .request("GET", "/api/me/memberships", None, Some(&a.token))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["active"], json!([]));
    assert_eq!(response.body["history"], json!([]));
}

#[tokio::test]
async fn test_get_profile() {
    let app = TestApp::new().await;
    let a = app.client("a@studio.test").await;

    let response = app
        .request("GET", "/api/me/profile", None, Some(&a.token))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["id"], a.id);
    assert_eq!(response.body["email"], "a@studio.test");
    assert_eq!(response.body["role"], "CLIENT");
    assert_eq!(response.body["phone"], Value::Null);
}

#[tokio::test]
async fn test_patch_profile_keeps_omitted_fields() {
    let app = TestApp::new().await;
    let a = app.client("a@studio.test").await;

    let renamed = app
        .request(
            "PATCH",
            "/api/me/profile",
            Some(json!({ "full_name": "Ana Client" })),
            Some(&a.token),
        )
        .await;
    assert_eq!(renamed.status, StatusCode::OK);
    assert_eq!(renamed.body["full_name"], "Ana Client");

    let with_phone = app
        .request(
            "PATCH",
            "/api/me/profile",
            Some(json!({ "phone": "+1 555 0100" })),
            Some(&a.token),
        )
        .await;
    assert_eq!(with_phone.body["phone"], "+1 555 0100");
    assert_eq!(with_phone.body["full_name"], "Ana Client");

    let fetched = app
        .request("GET", "/api/me/profile", None, Some(&a.token))
        .await;
    assert_eq!(fetched.body, with_phone.body);
}

#[tokio::test]
async fn test_patch_profile_rejects_blank_name() {
    let app = TestApp::new().await;
    let a = app.client("a@studio.test").await;

    let response = app
        .request(
            "PATCH",
            "/api/me/profile",
            Some(json!({ "full_name": "" })),
            Some(&a.token),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.code(), "INVALID_REQUEST");
}

#[tokio::test]
async fn test_profile_requires_token() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/api/me/profile", None, None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}
