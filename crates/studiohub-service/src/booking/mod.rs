//! Client bookings: reserving, canceling, and listing class attendances.

pub mod service;
pub mod views;

pub use service::{BookClassRequest, BookingService};
pub use views::{BookedClass, CalendarDay, MyCalendar, MyClasses};
