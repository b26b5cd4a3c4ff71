//! Public schedule handler.

use axum::Json;
use axum::extract::State;

use studiohub_entity::class_session::ClassSession;

use crate::dto::request::ScheduleQuery;
use crate::error::ApiError;
use crate::extractors::ApiQuery;
use crate::state::AppState;

/// GET /api/schedule
pub async fn location_schedule(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ScheduleQuery>,
) -> Result<Json<Vec<ClassSession>>, ApiError> {
    let sessions = state
        .schedule_service
        .for_location(query.location_id, query.program_type_id)
        .await?;
    Ok(Json(sessions))
}
