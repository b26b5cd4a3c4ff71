//! User role enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Roles available in the RBAC system.
///
/// Roles are ordered by privilege level: SuperAdmin > Admin > Trainer > Client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum UserRole {
    /// Owner of the whole system.
    SuperAdmin,
    /// Studio administrator; manages schedules.
    Admin,
    /// Runs classes.
    Trainer,
    /// Books classes.
    Client,
}

impl UserRole {
    /// Return the privilege level (higher = more privileged).
    pub fn privilege_level(&self) -> u8 {
        match self {
            Self::SuperAdmin => 4,
            Self::Admin => 3,
            Self::Trainer => 2,
            Self::Client => 1,
        }
    }

    /// Check if this role has at least the given role's privileges.
    pub fn has_at_least(&self, other: &UserRole) -> bool {
        self.privilege_level() >= other.privilege_level()
    }

    /// Check if this role may administer the studio.
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::SuperAdmin | Self::Admin)
    }

    /// Return the role as its wire string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SuperAdmin => "SUPERADMIN",
            Self::Admin => "ADMIN",
            Self::Trainer => "TRAINER",
            Self::Client => "CLIENT",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = studiohub_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "SUPERADMIN" => Ok(Self::SuperAdmin),
            "ADMIN" => Ok(Self::Admin),
            "TRAINER" => Ok(Self::Trainer),
            "CLIENT" => Ok(Self::Client),
            _ => Err(studiohub_core::AppError::invalid_request(format!(
                "Invalid user role: '{s}'. Expected one of: SUPERADMIN, ADMIN, TRAINER, CLIENT"
            ))),
        }
    }
}
