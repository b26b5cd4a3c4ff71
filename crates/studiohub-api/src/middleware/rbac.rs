//! Role guards invoked by handlers before calling a service.

use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// Checks that the authenticated user is an Admin or SuperAdmin.
pub fn require_admin(state: &AppState, auth: &AuthUser) -> Result<(), ApiError> {
    state.rbac_enforcer.require_admin(&auth.role)?;
    Ok(())
}
