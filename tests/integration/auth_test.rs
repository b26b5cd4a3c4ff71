//! Integration tests for authentication and health endpoints.

mod helpers;

use helpers::TestApp;
use http::StatusCode;

#[tokio::test]
async fn test_missing_token_is_unauthorized() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/api/me/classes", None, None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.code(), "AUTHENTICATION");
}

#[tokio::test]
async fn test_garbage_token_is_unauthorized() {
    let app = TestApp::new().await;

    let response = app
        .request("GET", "/api/me/classes", None, Some("not-a-jwt"))
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_inactive_user_is_unauthorized() {
    let app = TestApp::new().await;
    let user = app.client("gone@studio.test").await;
    app.store.set_user_active(user.id, false).await;

    let response = app
        .request("GET", "/api/me/classes", None, Some(&user.token))
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.detail(), "Could not validate credentials");
}

#[tokio::test]
async fn test_token_for_unknown_user_is_unauthorized() {
    let app = TestApp::new().await;
    let token = app
        .encoder
        .issue_access_token(
            987654,
            studiohub_entity::user::UserRole::Client,
            chrono::Utc::now(),
        )
        .unwrap();

    let response = app
        .request("GET", "/api/me/classes", None, Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_health_endpoints_need_no_auth() {
    let app = TestApp::new().await;

    let health = app.request("GET", "/api/health", None, None).await;
    assert_eq!(health.status, StatusCode::OK);
    assert_eq!(health.body["status"], "ok");

    let db = app.request("GET", "/api/health/db", None, None).await;
    assert_eq!(db.status, StatusCode::OK);
    assert_eq!(db.body["database"], "connected");
}
