//! Attendance (booking) entities.

pub mod model;
pub mod status;

pub use model::{Attendance, AttendanceDetail, NewAttendance};
pub use status::AttendanceStatus;
