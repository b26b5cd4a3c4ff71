//! Shape rules every stored class session satisfies.

use studiohub_core::error::AppError;
use studiohub_entity::class_session::weekday::is_valid_weekday;
use studiohub_entity::class_session::{ClassSession, CreateClassSession};

/// The fields the shape rules look at.
#[derive(Debug, Clone, Copy)]
pub struct SessionShape {
    pub weekday: i16,
    pub start_time: chrono::NaiveTime,
    pub end_time: chrono::NaiveTime,
    pub capacity: i32,
}

impl From<&CreateClassSession> for SessionShape {
    fn from(data: &CreateClassSession) -> Self {
        Self {
            weekday: data.weekday,
            start_time: data.start_time,
            end_time: data.end_time,
            capacity: data.capacity,
        }
    }
}

impl From<&ClassSession> for SessionShape {
    fn from(session: &ClassSession) -> Self {
        Self {
            weekday: session.weekday,
            start_time: session.start_time,
            end_time: session.end_time,
            capacity: session.capacity,
        }
    }
}

/// Rejects a weekday outside 0..=6, an empty or inverted time window, and a
/// non-positive capacity.
pub fn validate_shape(shape: SessionShape) -> Result<(), AppError> {
    if !is_valid_weekday(shape.weekday) {
        return Err(AppError::invalid_request(
            "weekday must be between 0 (Monday) and 6 (Sunday)",
        ));
    }
    if shape.end_time <= shape.start_time {
        return Err(AppError::invalid_request("end_time must be after start_time"));
    }
    if shape.capacity <= 0 {
        return Err(AppError::invalid_request("capacity must be greater than 0"));
    }
    Ok(())
}
