//! Studio location entity.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A physical studio where classes take place.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Location {
    /// Unique location identifier.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Street address (optional).
    pub address: Option<String>,
}
