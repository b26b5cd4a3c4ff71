//! RBAC enforcement: checks whether a role may perform an operation.

use studiohub_core::error::AppError;
use studiohub_entity::user::UserRole;

/// Roles allowed to manage the studio schedule.
pub const ADMIN_ROLES: &[UserRole] = &[UserRole::SuperAdmin, UserRole::Admin];

/// Enforces role-based access control for staff-only operations.
#[derive(Debug, Clone, Default)]
pub struct RbacEnforcer;

impl RbacEnforcer {
    pub fn new() -> Self {
        Self
    }

    /// Allows `ADMIN` and `SUPERADMIN`.
    pub fn require_admin(&self, role: &UserRole) -> Result<(), AppError> {
        self.require_any(role, ADMIN_ROLES)
            .map_err(|_| AppError::authorization("Admin access required"))
    }

    /// Allows any of the listed roles.
    pub fn require_any(&self, role: &UserRole, allowed: &[UserRole]) -> Result<(), AppError> {
        if allowed.contains(role) {
            Ok(())
        } else {
            Err(AppError::authorization(format!(
                "Role '{role}' is not allowed to perform this action"
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_admin() {
        let rbac = RbacEnforcer::new();
        assert!(rbac.require_admin(&UserRole::SuperAdmin).is_ok());
        assert!(rbac.require_admin(&UserRole::Admin).is_ok());
        assert!(rbac.require_admin(&UserRole::Trainer).is_err());

        let err = rbac.require_admin(&UserRole::Client).unwrap_err();
        assert_eq!(err.message, "Admin access required");
    }

    #[test]
    fn test_require_any() {
        let rbac = RbacEnforcer::new();
        assert!(
            rbac.require_any(&UserRole::Trainer, &[UserRole::Trainer, UserRole::Admin])
                .is_ok()
        );
        assert!(rbac.require_any(&UserRole::Client, &[UserRole::Admin]).is_err());
    }
}
