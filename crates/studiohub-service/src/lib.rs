//! # studiohub-service
//!
//! Business logic service layer for StudioHub. Each service validates its
//! input, orchestrates the store traits from `studiohub-database`, and
//! returns views or domain errors.
//!
//! Services follow constructor injection: stores and the clock are provided
//! at construction time via `Arc` references. Role checks happen in the
//! calling layer before a service method runs.

pub mod booking;
pub mod class_session;
pub mod context;
pub mod membership;
pub mod user;

pub use booking::BookingService;
pub use class_session::{ClassSessionService, ScheduleService};
pub use context::RequestContext;
pub use membership::MembershipService;
pub use user::UserService;
