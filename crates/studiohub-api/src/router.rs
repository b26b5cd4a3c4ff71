//! Route definitions for the StudioHub HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`.
//! The router receives `AppState` and passes it to all handlers via Axum's `State` extractor.

use axum::{
    Router,
    routing::{get, post},
};

use crate::handlers;
use crate::state::AppState;

/// Build the API router with all routes, without the outer middleware stack.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(me_routes())
        .merge(schedule_routes())
        .merge(admin_routes())
        .merge(health_routes());

    Router::new().nest("/api", api_routes).with_state(state)
}

/// Client self-service: bookings, calendar, memberships, profile
fn me_routes() -> Router<AppState> {
    Router::new()
        .route("/me/classes", get(handlers::me::my_classes))
        .route("/me/classes/book", post(handlers::me::book_class))
        .route("/me/classes/cancel", post(handlers::me::cancel_class))
        .route("/me/calendar", get(handlers::me::my_calendar))
        .route("/me/memberships", get(handlers::me::my_memberships))
        .route(
            "/me/profile",
            get(handlers::me::profile).patch(handlers::me::update_profile),
        )
}

/// Public timetable
fn schedule_routes() -> Router<AppState> {
    Router::new().route("/schedule", get(handlers::schedule::location_schedule))
}

/// Admin-only endpoints
fn admin_routes() -> Router<AppState> {
    use handlers::admin::class_sessions;

    Router::new()
        .route(
            "/admin/class-sessions",
            get(class_sessions::list_sessions).post(class_sessions::create_session),
        )
        .route(
            "/admin/class-sessions/{id}",
            get(class_sessions::get_session)
                .patch(class_sessions::update_session)
                .delete(class_sessions::delete_session),
        )
        .route(
            "/admin/class-sessions/{id}/cancel",
            post(class_sessions::deactivate_session),
        )
}

/// Health endpoints
fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/health/db", get(handlers::health::database_health))
}
