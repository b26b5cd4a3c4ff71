//! Admin class session management handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use studiohub_entity::class_session::ClassSession;

use crate::dto::request::{
    ClassSessionListQuery, CreateClassSessionRequest, UpdateClassSessionRequest,
};
use crate::error::ApiError;
use crate::extractors::{ApiPath, ApiQuery, AuthUser, ValidJson};
use crate::middleware::rbac::require_admin;
use crate::state::AppState;

/// GET /api/admin/class-sessions
pub async fn list_sessions(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiQuery(query): ApiQuery<ClassSessionListQuery>,
) -> Result<Json<Vec<ClassSession>>, ApiError> {
    require_admin(&state, &auth)?;
    let sessions = state.class_session_service.list(&query.into()).await?;
    Ok(Json(sessions))
}

/// GET /api/admin/class-sessions/{id}
pub async fn get_session(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<ClassSession>, ApiError> {
    require_admin(&state, &auth)?;
    Ok(Json(state.class_session_service.get(id).await?))
}

/// POST /api/admin/class-sessions
pub async fn create_session(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidJson(req): ValidJson<CreateClassSessionRequest>,
) -> Result<(StatusCode, Json<ClassSession>), ApiError> {
    require_admin(&state, &auth)?;
    let session = state
        .class_session_service
        .create(&auth, req.into())
        .await?;
    Ok((StatusCode::CREATED, Json(session)))
}

/// PATCH /api/admin/class-sessions/{id}
pub async fn update_session(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<i64>,
    ValidJson(req): ValidJson<UpdateClassSessionRequest>,
) -> Result<Json<ClassSession>, ApiError> {
    require_admin(&state, &auth)?;
    let session = state
        .class_session_service
        .update(&auth, id, req.into())
        .await?;
    Ok(Json(session))
}

/// POST /api/admin/class-sessions/{id}/cancel
pub async fn deactivate_session(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<ClassSession>, ApiError> {
    require_admin(&state, &auth)?;
    Ok(Json(state.class_session_service.deactivate(&auth, id).await?))
}

/// DELETE /api/admin/class-sessions/{id}
pub async fn delete_session(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<i64>,
) -> Result<StatusCode, ApiError> {
    require_admin(&state, &auth)?;
    state.class_session_service.delete(&auth, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
