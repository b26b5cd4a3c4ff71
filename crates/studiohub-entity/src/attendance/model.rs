//! Attendance entity model.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::status::AttendanceStatus;

/// One user's claim on one occurrence of a class session.
///
/// `(user_id, class_session_id, class_date)` is unique.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Attendance {
    /// Unique attendance identifier.
    pub id: i64,
    /// Booking user.
    pub user_id: i64,
    /// Booked session.
    pub class_session_id: i64,
    /// Membership that paid for the visit, if any.
    pub membership_id: Option<i64>,
    /// Concrete date of the occurrence.
    pub class_date: NaiveDate,
    /// Current status.
    pub status: AttendanceStatus,
    /// When the booking was made.
    pub created_at: DateTime<Utc>,
    /// Last status change; equals `created_at` until the first transition.
    pub updated_at: DateTime<Utc>,
}

/// An attendance joined with the time window of its session.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AttendanceDetail {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub attendance: Attendance,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

/// Row to insert for a new booking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAttendance {
    pub user_id: i64,
    pub class_session_id: i64,
    pub class_date: NaiveDate,
    /// When the booking is made; comes from the injected clock.
    pub booked_at: DateTime<Utc>,
}
