//! Trainer entity.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A trainer profile, optionally linked to a user account.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Trainer {
    pub id: i64,
    pub full_name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    /// Linked login account, when the trainer has one.
    pub user_id: Option<i64>,
}
