//! Attendance status enumeration and transitions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// State of one booking of one class occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "attendance_status", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum AttendanceStatus {
    /// Booked; the occurrence has not been resolved yet.
    Planned,
    /// The client showed up.
    Attended,
    /// The client did not show up.
    Missed,
    /// The client withdrew.
    Canceled,
}

/// Outcome of asking a status to move to `Canceled`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelTransition {
    /// A write is required.
    Apply,
    /// Already canceled; nothing to persist.
    Noop,
    /// The transition is not allowed.
    Forbidden,
}

impl AttendanceStatus {
    /// Whether this attendance occupies a seat.
    pub fn holds_seat(&self) -> bool {
        !matches!(self, Self::Canceled)
    }

    /// Classifies a cancellation request against the current status.
    pub fn cancel_transition(&self) -> CancelTransition {
        match self {
            Self::Attended => CancelTransition::Forbidden,
            Self::Canceled => CancelTransition::Noop,
            Self::Planned | Self::Missed => CancelTransition::Apply,
        }
    }

    /// Return the status as its wire string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Planned => "PLANNED",
            Self::Attended => "ATTENDED",
            Self::Missed => "MISSED",
            Self::Canceled => "CANCELED",
        }
    }
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AttendanceStatus {
    type Err = studiohub_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "PLANNED" => Ok(Self::Planned),
            "ATTENDED" => Ok(Self::Attended),
            "MISSED" => Ok(Self::Missed),
            "CANCELED" => Ok(Self::Canceled),
            _ => Err(studiohub_core::AppError::invalid_request(format!(
                "Invalid attendance status: '{s}'"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancel_transitions() {
        assert_eq!(
            AttendanceStatus::Planned.cancel_transition(),
            CancelTransition::Apply
        );
        assert_eq!(
            AttendanceStatus::Canceled.cancel_transition(),
            CancelTransition::Noop
        );
        assert_eq!(
            AttendanceStatus::Attended.cancel_transition(),
            CancelTransition::Forbidden
        );
    }

    #[test]
    fn test_holds_seat() {
        assert!(AttendanceStatus::Planned.holds_seat());
        assert!(AttendanceStatus::Attended.holds_seat());
        assert!(AttendanceStatus::Missed.holds_seat());
        assert!(!AttendanceStatus::Canceled.holds_seat());
    }

    #[test]
    fn test_parse() {
        assert_eq!(
            "canceled".parse::<AttendanceStatus>().unwrap(),
            AttendanceStatus::Canceled
        );
        assert!("cancelled".parse::<AttendanceStatus>().is_err());
    }
}
