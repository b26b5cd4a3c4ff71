//! Health check handlers.

use axum::Json;
use axum::extract::State;

use crate::dto::response::{DatabaseHealthResponse, HealthResponse};
use crate::error::ApiError;
use crate::state::AppState;

/// GET /api/health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// GET /api/health/db
pub async fn database_health(
    State(state): State<AppState>,
) -> Result<Json<DatabaseHealthResponse>, ApiError> {
    state.stores.health.health_check().await?;
    Ok(Json(DatabaseHealthResponse {
        status: "ok".to_string(),
        database: "connected".to_string(),
    }))
}
