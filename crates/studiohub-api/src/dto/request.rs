//! Request DTOs with validation.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

use studiohub_entity::class_session::{ClassSessionFilter, CreateClassSession, UpdateClassSession};
use studiohub_entity::user::model::UpdateProfile;
use studiohub_service::booking::BookClassRequest;

/// Book class request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct BookRequest {
    /// Session to book.
    #[validate(range(min = 1, message = "class_session_id must be positive"))]
    pub class_session_id: i64,
    /// Concrete date of the occurrence.
    pub class_date: NaiveDate,
}

impl From<BookRequest> for BookClassRequest {
    fn from(req: BookRequest) -> Self {
        Self {
            class_session_id: req.class_session_id,
            class_date: req.class_date,
        }
    }
}

/// Cancel booking request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CancelRequest {
    #[validate(range(min = 1, message = "attendance_id must be positive"))]
    pub attendance_id: i64,
}

/// Profile update request body. Omitted fields stay unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, max = 255, message = "full_name must be 1-255 characters"))]
    pub full_name: Option<String>,
    #[validate(length(min = 1, max = 50, message = "phone must be 1-50 characters"))]
    pub phone: Option<String>,
}

impl From<UpdateProfileRequest> for UpdateProfile {
    fn from(req: UpdateProfileRequest) -> Self {
        Self {
            full_name: req.full_name,
            phone: req.phone,
        }
    }
}

/// Calendar query parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarQuery {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Public schedule query parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleQuery {
    pub location_id: i64,
    pub program_type_id: Option<i64>,
}

/// Admin class session list filters.
///
/// Deactivated sessions are hidden unless `include_inactive=true` or an
/// explicit `is_active` is given.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClassSessionListQuery {
    pub location_id: Option<i64>,
    pub program_type_id: Option<i64>,
    pub trainer_id: Option<i64>,
    pub weekday: Option<i16>,
    pub is_active: Option<bool>,
    #[serde(default)]
    pub include_inactive: bool,
}

impl From<ClassSessionListQuery> for ClassSessionFilter {
    fn from(q: ClassSessionListQuery) -> Self {
        let is_active = match (q.is_active, q.include_inactive) {
            (Some(flag), _) => Some(flag),
            (None, true) => None,
            (None, false) => Some(true),
        };
        Self {
            location_id: q.location_id,
            program_type_id: q.program_type_id,
            trainer_id: q.trainer_id,
            weekday: q.weekday,
            is_active,
        }
    }
}

/// Create class session request (admin).
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateClassSessionRequest {
    pub location_id: i64,
    pub program_type_id: i64,
    pub trainer_id: i64,
    pub membership_plan_id: Option<i64>,
    /// 0 = Monday through 6 = Sunday.
    #[validate(range(min = 0, max = 6, message = "weekday must be between 0 and 6"))]
    pub weekday: i16,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    #[validate(range(min = 1, message = "capacity must be greater than 0"))]
    pub capacity: i32,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

impl From<CreateClassSessionRequest> for CreateClassSession {
    fn from(req: CreateClassSessionRequest) -> Self {
        Self {
            location_id: req.location_id,
            program_type_id: req.program_type_id,
            trainer_id: req.trainer_id,
            membership_plan_id: req.membership_plan_id,
            weekday: req.weekday,
            start_time: req.start_time,
            end_time: req.end_time,
            capacity: req.capacity,
            is_active: req.is_active,
        }
    }
}

/// Partial class session update (admin).
///
/// An explicit `"membership_plan_id": null` clears the plan; omitting the
/// field leaves it unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateClassSessionRequest {
    pub location_id: Option<i64>,
    pub program_type_id: Option<i64>,
    pub trainer_id: Option<i64>,
    #[serde(default, deserialize_with = "present")]
    pub membership_plan_id: Option<Option<i64>>,
    #[validate(range(min = 0, max = 6, message = "weekday must be between 0 and 6"))]
    pub weekday: Option<i16>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    #[validate(range(min = 1, message = "capacity must be greater than 0"))]
    pub capacity: Option<i32>,
    pub is_active: Option<bool>,
}

/// Marks a field as present, even when its value is `null`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl From<UpdateClassSessionRequest> for UpdateClassSession {
    fn from(req: UpdateClassSessionRequest) -> Self {
        Self {
            location_id: req.location_id,
            program_type_id: req.program_type_id,
            trainer_id: req.trainer_id,
            membership_plan_id: req.membership_plan_id,
            weekday: req.weekday,
            start_time: req.start_time,
            end_time: req.end_time,
            capacity: req.capacity,
            is_active: req.is_active,
        }
    }
}
