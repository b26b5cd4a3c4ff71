//! Client profile self-service.

pub mod service;

pub use service::{Profile, UserService};
