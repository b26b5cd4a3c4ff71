//! Class session administration and the public schedule.

pub mod schedule;
pub mod service;
pub mod validation;

pub use schedule::ScheduleService;
pub use service::ClassSessionService;
