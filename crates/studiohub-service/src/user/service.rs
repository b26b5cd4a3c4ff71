//! User self-service operations: viewing and editing the own profile.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use studiohub_core::error::AppError;
use studiohub_database::store::UserStore;
use studiohub_entity::user::model::UpdateProfile;
use studiohub_entity::user::{User, UserRole};

use crate::context::RequestContext;

/// Public view of the acting user's account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: i64,
    pub email: String,
    pub role: UserRole,
    pub full_name: Option<String>,
    pub phone: Option<String>,
}

impl From<User> for Profile {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            role: user.role,
            full_name: user.full_name,
            phone: user.phone,
        }
    }
}

/// Handles profile reads and updates for the authenticated user.
#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserStore>,
}

impl std::fmt::Debug for UserService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserService").finish_non_exhaustive()
    }
}

impl UserService {
    pub fn new(users: Arc<dyn UserStore>) -> Self {
        Self { users }
    }

    /// Gets the current user's profile.
    pub async fn get_profile(&self, ctx: &RequestContext) -> Result<Profile, AppError> {
        self.users
            .find_user(ctx.user_id)
            .await?
            .map(Profile::from)
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// Updates `full_name` and/or `phone`. An empty change set is a read.
    pub async fn update_profile(
        &self,
        ctx: &RequestContext,
        changes: UpdateProfile,
    ) -> Result<Profile, AppError> {
        if changes.is_empty() {
            return self.get_profile(ctx).await;
        }

        let user = self
            .users
            .update_profile(ctx.user_id, &changes)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        info!(user_id = user.id, "Profile updated");
        Ok(Profile::from(user))
    }
}
