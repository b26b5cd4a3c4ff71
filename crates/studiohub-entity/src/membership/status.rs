//! Membership status enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of a purchased membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "membership_status", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum MembershipStatus {
    /// Valid and usable.
    Active,
    /// Past its end date.
    Expired,
    /// Temporarily suspended.
    Frozen,
    /// Annulled.
    Canceled,
}

impl fmt::Display for MembershipStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Active => "ACTIVE",
            Self::Expired => "EXPIRED",
            Self::Frozen => "FROZEN",
            Self::Canceled => "CANCELED",
        };
        write!(f, "{s}")
    }
}
