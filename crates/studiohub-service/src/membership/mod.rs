//! Client membership views.

pub mod service;

pub use service::{MembershipService, MembershipView, MyMemberships};
