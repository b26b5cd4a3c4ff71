//! # studiohub-core
//!
//! Core crate for StudioHub. Contains configuration schemas, the injected
//! clock abstraction, and the unified error system.
//!
//! This crate has **no** internal dependencies on other StudioHub crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;

pub use error::AppError;
pub use result::AppResult;
pub use traits::clock::{Clock, FixedClock, SystemClock};
