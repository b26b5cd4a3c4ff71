//! Class session entity model.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::weekday::weekday_index;

/// A recurring weekly time slot at a location.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ClassSession {
    /// Unique class session identifier.
    pub id: i64,
    /// Location the class runs at.
    pub location_id: i64,
    /// Program taught.
    pub program_type_id: i64,
    /// Trainer running the class.
    pub trainer_id: i64,
    /// Plan that grants access, when restricted to one.
    pub membership_plan_id: Option<i64>,
    /// Day of week, 0 = Monday through 6 = Sunday.
    pub weekday: i16,
    /// Local start time.
    pub start_time: NaiveTime,
    /// Local end time, strictly after `start_time`.
    pub end_time: NaiveTime,
    /// Seats per occurrence.
    pub capacity: i32,
    /// Inactive sessions cannot be booked and are hidden from the schedule.
    pub is_active: bool,
    /// When the session was created.
    pub created_at: DateTime<Utc>,
    /// When the session was last modified.
    pub updated_at: DateTime<Utc>,
}

impl ClassSession {
    /// Whether the session runs on `date`.
    pub fn occurs_on(&self, date: NaiveDate) -> bool {
        weekday_index(date) == self.weekday
    }
}

/// Data required to create a class session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateClassSession {
    pub location_id: i64,
    pub program_type_id: i64,
    pub trainer_id: i64,
    pub membership_plan_id: Option<i64>,
    pub weekday: i16,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub capacity: i32,
    pub is_active: bool,
}

/// Partial update of a class session. `None` leaves a field unchanged.
///
/// `membership_plan_id` is doubly optional: `Some(None)` clears the plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateClassSession {
    pub location_id: Option<i64>,
    pub program_type_id: Option<i64>,
    pub trainer_id: Option<i64>,
    pub membership_plan_id: Option<Option<i64>>,
    pub weekday: Option<i16>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub capacity: Option<i32>,
    pub is_active: Option<bool>,
}

impl UpdateClassSession {
    /// Applies the update on top of an existing session.
    pub fn apply_to(&self, session: &ClassSession) -> ClassSession {
        let mut merged = session.clone();
        if let Some(v) = self.location_id {
            merged.location_id = v;
        }
        if let Some(v) = self.program_type_id {
            merged.program_type_id = v;
        }
        if let Some(v) = self.trainer_id {
            merged.trainer_id = v;
        }
        if let Some(v) = self.membership_plan_id {
            merged.membership_plan_id = v;
        }
        if let Some(v) = self.weekday {
            merged.weekday = v;
        }
        if let Some(v) = self.start_time {
            merged.start_time = v;
        }
        if let Some(v) = self.end_time {
            merged.end_time = v;
        }
        if let Some(v) = self.capacity {
            merged.capacity = v;
        }
        if let Some(v) = self.is_active {
            merged.is_active = v;
        }
        merged
    }

    /// Whether the update carries no field at all.
    pub fn is_empty(&self) -> bool {
        self.location_id.is_none()
            && self.program_type_id.is_none()
            && self.trainer_id.is_none()
            && self.membership_plan_id.is_none()
            && self.weekday.is_none()
            && self.start_time.is_none()
            && self.end_time.is_none()
            && self.capacity.is_none()
            && self.is_active.is_none()
    }
}

/// Filters for listing class sessions. Every field is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClassSessionFilter {
    pub location_id: Option<i64>,
    pub program_type_id: Option<i64>,
    pub trainer_id: Option<i64>,
    pub weekday: Option<i16>,
    pub is_active: Option<bool>,
}

impl ClassSessionFilter {
    /// Whether `session` passes every set filter.
    pub fn matches(&self, session: &ClassSession) -> bool {
        self.location_id.is_none_or(|v| session.location_id == v)
            && self.program_type_id.is_none_or(|v| session.program_type_id == v)
            && self.trainer_id.is_none_or(|v| session.trainer_id == v)
            && self.weekday.is_none_or(|v| session.weekday == v)
            && self.is_active.is_none_or(|v| session.is_active == v)
    }
}
