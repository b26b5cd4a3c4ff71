//! Membership entity model.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::status::MembershipStatus;

/// A client's purchased instance of a membership plan.
///
/// `total_visits = None` means the membership is unlimited within its dates.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Membership {
    /// Unique membership identifier.
    pub id: i64,
    /// Owning user.
    pub user_id: i64,
    /// Plan this membership was sold from.
    pub membership_plan_id: i64,
    /// First valid day (inclusive).
    pub start_date: NaiveDate,
    /// Last valid day (inclusive).
    pub end_date: NaiveDate,
    /// Visit allowance, if limited.
    pub total_visits: Option<i32>,
    /// Visits consumed so far.
    pub visits_used: i32,
    /// Current status.
    pub status: MembershipStatus,
    /// When the membership was created.
    pub created_at: DateTime<Utc>,
}

impl Membership {
    /// Visits still available, or `None` for unlimited memberships.
    pub fn visits_remaining(&self) -> Option<i32> {
        self.total_visits
            .map(|total| (total - self.visits_used).max(0))
    }

    /// `ACTIVE` and not yet past its end date as of `today`.
    pub fn is_current(&self, today: NaiveDate) -> bool {
        self.status == MembershipStatus::Active && self.end_date >= today
    }

    /// Whether the membership covers a class on `date` and still has a visit to spend.
    pub fn can_cover(&self, date: NaiveDate) -> bool {
        self.status == MembershipStatus::Active
            && self.start_date <= date
            && date <= self.end_date
            && self.visits_remaining().is_none_or(|left| left > 0)
    }
}

/// Data required to sell a membership.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateMembership {
    pub user_id: i64,
    pub membership_plan_id: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_visits: Option<i32>,
}
