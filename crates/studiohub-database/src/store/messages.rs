//! Client-facing messages for booking rule violations.
//!
//! Shared so the fast-path checks in the service and the locked re-checks in
//! the stores report identical errors.

pub const SESSION_UNAVAILABLE: &str = "ClassSession not found or inactive";
pub const WEEKDAY_MISMATCH: &str = "class_date does not match class_session weekday";
pub const ALREADY_BOOKED: &str = "You are already booked for this class and date";
pub const CLASS_FULL: &str = "Class is full";
pub const NO_MEMBERSHIP: &str = "No active membership with remaining visits covers this date";
pub const ATTENDANCE_NOT_FOUND: &str = "Attendance not found";
pub const ALREADY_ATTENDED: &str = "Cannot cancel already attended class";
pub const SESSION_HAS_ATTENDANCES: &str =
    "ClassSession has attendances; deactivate it instead of deleting";
