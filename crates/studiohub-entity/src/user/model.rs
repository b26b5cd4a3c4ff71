//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::role::UserRole;

/// A registered account: staff or client.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: i64,
    /// Unique e-mail address.
    pub email: String,
    /// Full name (optional).
    pub full_name: Option<String>,
    /// Phone number (optional).
    pub phone: Option<String>,
    /// User role (RBAC).
    pub role: UserRole,
    /// Whether the account may authenticate.
    pub is_active: bool,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Check if this user has admin privileges.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

/// Data required to create a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    /// E-mail address.
    pub email: String,
    /// Full name (optional).
    pub full_name: Option<String>,
    /// Assigned role.
    pub role: UserRole,
}

/// Self-service profile changes. `None` leaves a field as it is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateProfile {
    pub full_name: Option<String>,
    pub phone: Option<String>,
}

impl UpdateProfile {
    /// True when no field would change.
    pub fn is_empty(&self) -> bool {
        self.full_name.is_none() && self.phone.is_none()
    }
}
