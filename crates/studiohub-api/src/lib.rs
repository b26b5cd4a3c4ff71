//! # studiohub-api
//!
//! HTTP API layer for StudioHub built on Axum.
//!
//! Provides the REST endpoints, middleware (logging, CORS), extractors, DTOs,
//! and the mapping from `AppError` to `{detail, code}` responses.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::build_app;
pub use error::ApiError;
pub use state::AppState;
