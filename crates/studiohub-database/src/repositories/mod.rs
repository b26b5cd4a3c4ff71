//! Concrete PostgreSQL repository implementations for all StudioHub entities.

pub mod attendance;
pub mod catalog;
pub mod class_session;
pub mod membership;
pub mod user;

pub use attendance::AttendanceRepository;
pub use catalog::CatalogRepository;
pub use class_session::ClassSessionRepository;
pub use membership::MembershipRepository;
pub use user::UserRepository;
