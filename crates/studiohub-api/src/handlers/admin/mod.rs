//! Admin-only handlers.

pub mod class_sessions;
