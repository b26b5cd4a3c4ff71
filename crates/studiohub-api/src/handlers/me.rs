//! Client self-service handlers: bookings, calendar, memberships, profile.

use axum::Json;
use axum::extract::State;

use studiohub_service::booking::{BookedClass, MyCalendar, MyClasses};
use studiohub_service::membership::MyMemberships;
use studiohub_service::user::Profile;

use crate::dto::request::{BookRequest, CalendarQuery, CancelRequest, UpdateProfileRequest};
use crate::error::ApiError;
use crate::extractors::{ApiQuery, AuthUser, ValidJson};
use crate::state::AppState;

/// POST /api/me/classes/book
pub async fn book_class(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidJson(req): ValidJson<BookRequest>,
) -> Result<Json<BookedClass>, ApiError> {
    let booked = state.booking_service.book(&auth, req.into()).await?;
    Ok(Json(booked))
}

/// POST /api/me/classes/cancel
pub async fn cancel_class(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidJson(req): ValidJson<CancelRequest>,
) -> Result<Json<BookedClass>, ApiError> {
    let canceled = state
        .booking_service
        .cancel(&auth, req.attendance_id)
        .await?;
    Ok(Json(canceled))
}

/// GET /api/me/classes
pub async fn my_classes(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<MyClasses>, ApiError> {
    Ok(Json(state.booking_service.my_classes(&auth).await?))
}

/// GET /api/me/calendar
pub async fn my_calendar(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiQuery(query): ApiQuery<CalendarQuery>,
) -> Result<Json<MyCalendar>, ApiError> {
    let calendar = state
        .booking_service
        .calendar(&auth, query.start_date, query.end_date)
        .await?;
    Ok(Json(calendar))
}

/// GET /api/me/memberships
pub async fn my_memberships(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<MyMemberships>, ApiError> {
    Ok(Json(state.membership_service.list_mine(&auth).await?))
}

/// GET /api/me/profile
pub async fn profile(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Profile>, ApiError> {
    Ok(Json(state.user_service.get_profile(&auth).await?))
}

/// PATCH /api/me/profile
pub async fn update_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidJson(req): ValidJson<UpdateProfileRequest>,
) -> Result<Json<Profile>, ApiError> {
    let profile = state
        .user_service
        .update_profile(&auth, req.into())
        .await?;
    Ok(Json(profile))
}
