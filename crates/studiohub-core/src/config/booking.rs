//! Booking rule configuration.

use serde::{Deserialize, Serialize};

/// How bookings interact with a client's memberships.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MembershipPolicy {
    /// Bookings never consult memberships; `membership_id` stays unset.
    #[default]
    Lenient,
    /// Bookings require an active membership with remaining visits and consume one.
    RequireActive,
}

/// Booking settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BookingConfig {
    /// Membership consumption policy.
    #[serde(default)]
    pub membership_policy: MembershipPolicy,
}
