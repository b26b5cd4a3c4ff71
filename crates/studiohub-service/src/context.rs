//! Request context carrying the authenticated user.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use studiohub_entity::user::UserRole;

/// Context for the current authenticated request.
///
/// Built by the HTTP layer and passed into service methods so that every
/// operation knows *who* is acting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated user's ID.
    pub user_id: i64,
    /// The user's current role.
    pub role: UserRole,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(user_id: i64, role: UserRole, request_time: DateTime<Utc>) -> Self {
        Self {
            user_id,
            role,
            request_time,
        }
    }

    /// Returns whether the current user may administer the studio.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}
