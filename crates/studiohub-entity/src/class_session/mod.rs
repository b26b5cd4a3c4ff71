//! Recurring weekly class session entities.

pub mod model;
pub mod weekday;

pub use model::{ClassSession, ClassSessionFilter, CreateClassSession, UpdateClassSession};
pub use weekday::weekday_index;
