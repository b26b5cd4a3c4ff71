//! Program type entity.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A kind of class offered (yoga, stretching, ...).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ProgramType {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    /// Whether the program runs as a group class.
    pub is_group: bool,
}
