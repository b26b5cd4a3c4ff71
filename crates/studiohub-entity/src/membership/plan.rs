//! Membership plan entity.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A purchasable subscription template tied to one location.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MembershipPlan {
    /// Unique plan identifier.
    pub id: i64,
    /// Plan name.
    pub name: String,
    /// Marketing description (optional).
    pub description: Option<String>,
    /// Price in minor currency units.
    pub price: i32,
    /// Location the plan is valid at.
    pub location_id: i64,
}
