//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use chrono::{NaiveDate, NaiveTime, Utc};
use http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use studiohub_api::{AppState, build_app};
use studiohub_auth::jwt::JwtEncoder;
use studiohub_core::FixedClock;
use studiohub_core::config::AppConfig;
use studiohub_database::store::ClassSessionStore;
use studiohub_database::{MemoryStore, Stores};
use studiohub_entity::class_session::CreateClassSession;
use studiohub_entity::membership::model::CreateMembership;
use studiohub_entity::user::UserRole;
use studiohub_entity::user::model::CreateUser;

/// "Today" for every integration test: Wednesday 2025-03-05.
pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 5).unwrap()
}

/// The Monday after [`today`].
pub fn next_monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Catalog rows every class session needs.
#[derive(Debug, Clone, Copy)]
pub struct Catalog {
    pub location_id: i64,
    pub program_type_id: i64,
    pub trainer_id: i64,
    pub plan_id: i64,
}

/// A seeded user and a valid bearer token for it.
#[derive(Debug, Clone)]
pub struct TestUser {
    pub id: i64,
    pub token: String,
}

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// In-memory store behind the router
    pub store: MemoryStore,
    /// Clock injected into the services
    pub clock: Arc<FixedClock>,
    /// Token issuer sharing the app's secret
    pub encoder: JwtEncoder,
    /// Seeded catalog
    pub catalog: Catalog,
}

impl TestApp {
    /// Create a new test application with the lenient membership policy
    pub async fn new() -> Self {
        Self::with_policy("lenient").await
    }

    /// Create a new test application with the given membership policy
    pub async fn with_policy(policy: &str) -> Self {
        let config = AppConfig::from_toml(&format!(
            r#"
            [database]
            url = "postgres://unused@localhost/studiohub_test"

            [auth]
            jwt_secret = "integration-test-secret"

            [booking]
            membership_policy = "{policy}"

            [logging]
            format = "pretty"
            "#
        ))
        .expect("Failed to parse test config");

        let store = MemoryStore::new();
        let clock = Arc::new(FixedClock::at_date(today()));
        let encoder = JwtEncoder::new(&config.auth);

        let location = store.add_location("Downtown").await;
        let program = store.add_program_type("Yoga").await;
        let trainer = store.add_trainer("Ana Trainer").await;
        let plan = store.add_membership_plan("Monthly", location.id).await;
        let catalog = Catalog {
            location_id: location.id,
            program_type_id: program.id,
            trainer_id: trainer.id,
            plan_id: plan.id,
        };

        let state = AppState::new(config, Stores::memory(store.clone()), clock.clone());
        let router = build_app(state);

        Self {
            router,
            store,
            clock,
            encoder,
            catalog,
        }
    }

    /// Seed an active user and mint an access token for it.
    ///
    /// Tokens are issued against the wall clock because the decoder checks
    /// `exp` against real time.
    pub async fn create_user(&self, email: &str, role: UserRole) -> TestUser {
        let user = self
            .store
            .add_user(CreateUser {
                email: email.to_string(),
                full_name: Some(email.to_string()),
                role,
            })
            .await;
        let token = self
            .encoder
            .issue_access_token(user.id, user.role, Utc::now())
            .expect("Failed to issue token");
        TestUser { id: user.id, token }
    }

    pub async fn client(&self, email: &str) -> TestUser {
        self.create_user(email, UserRole::Client).await
    }

    pub async fn admin(&self) -> TestUser {
        self.create_user("admin@studio.test", UserRole::Admin).await
    }

    /// Seed a class session straight into the store.
    pub async fn create_session(&self, weekday: i16, capacity: i32) -> i64 {
        self.store
            .create_session(
                &CreateClassSession {
                    location_id: self.catalog.location_id,
                    program_type_id: self.catalog.program_type_id,
                    trainer_id: self.catalog.trainer_id,
                    membership_plan_id: None,
                    weekday,
                    start_time: NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
                    end_time: NaiveTime::from_hms_opt(19, 0, 0).unwrap(),
                    capacity,
                    is_active: true,
                },
                Utc::now(),
            )
            .await
            .expect("Failed to seed class session")
            .id
    }

    /// Sell a membership covering March 2025.
    pub async fn sell_membership(&self, user_id: i64, total_visits: Option<i32>) -> i64 {
        self.store
            .add_membership(CreateMembership {
                user_id,
                membership_plan_id: self.catalog.plan_id,
                start_date: date(2025, 3, 1),
                end_date: date(2025, 3, 31),
                total_visits,
            })
            .await
            .id
    }

    /// POST /api/me/classes/book
    pub async fn book(&self, user: &TestUser, session_id: i64, class_date: NaiveDate) -> TestResponse {
        self.request(
            "POST",
            "/api/me/classes/book",
            Some(serde_json::json!({
                "class_session_id": session_id,
                "class_date": class_date,
            })),
            Some(&user.token),
        )
        .await
    }

    /// POST /api/me/classes/cancel
    pub async fn cancel(&self, user: &TestUser, attendance_id: i64) -> TestResponse {
        self.request(
            "POST",
            "/api/me/classes/cancel",
            Some(serde_json::json!({ "attendance_id": attendance_id })),
            Some(&user.token),
        )
        .await
    }

    /// Make an HTTP request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {token}"));
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}

/// Simplified test response
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}

impl TestResponse {
    /// The `code` field of an error body.
    pub fn code(&self) -> &str {
        self.body["code"].as_str().unwrap_or_default()
    }

    /// The `detail` field of an error body.
    pub fn detail(&self) -> &str {
        self.body["detail"].as_str().unwrap_or_default()
    }

    pub fn id(&self, field: &str) -> i64 {
        self.body[field]
            .as_i64()
            .unwrap_or_else(|| panic!("missing {field} in {}", self.body))
    }
}
