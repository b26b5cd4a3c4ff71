//! # studiohub-entity
//!
//! Domain entity models for StudioHub. Every struct in this crate
//! represents a database table row or a domain value object. All entities
//! derive `Debug`, `Clone`, `Serialize`, `Deserialize`, and database
//! entities additionally derive `sqlx::FromRow`.

pub mod attendance;
pub mod class_session;
pub mod membership;
pub mod studio;
pub mod user;
