//! Membership plan and membership entities.

pub mod model;
pub mod plan;
pub mod status;

pub use model::Membership;
pub use plan::MembershipPlan;
pub use status::MembershipStatus;
