//! # studiohub-auth
//!
//! Authentication and authorization primitives for StudioHub.
//!
//! ## Modules
//!
//! - `jwt`: access token creation and validation
//! - `rbac`: role checks performed by the HTTP layer before calling services

pub mod jwt;
pub mod rbac;

pub use jwt::{Claims, JwtDecoder, JwtEncoder};
pub use rbac::RbacEnforcer;
