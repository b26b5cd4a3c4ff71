//! Class session administration service.

use std::sync::Arc;

use tracing::{debug, info};

use studiohub_core::Clock;
use studiohub_core::error::AppError;
use studiohub_database::store::messages;
use studiohub_database::store::{AttendanceStore, CatalogStore, ClassSessionStore};
use studiohub_entity::class_session::{
    ClassSession, ClassSessionFilter, CreateClassSession, UpdateClassSession,
};

use super::validation::{SessionShape, validate_shape};
use crate::context::RequestContext;

/// Foreign keys of a session.
#[derive(Debug, Clone, Copy)]
struct References {
    location_id: i64,
    program_type_id: i64,
    trainer_id: i64,
    membership_plan_id: Option<i64>,
}

impl From<&CreateClassSession> for References {
    fn from(data: &CreateClassSession) -> Self {
        Self {
            location_id: data.location_id,
            program_type_id: data.program_type_id,
            trainer_id: data.trainer_id,
            membership_plan_id: data.membership_plan_id,
        }
    }
}

impl From<&ClassSession> for References {
    fn from(session: &ClassSession) -> Self {
        Self {
            location_id: session.location_id,
            program_type_id: session.program_type_id,
            trainer_id: session.trainer_id,
            membership_plan_id: session.membership_plan_id,
        }
    }
}

/// Which references must be looked up again.
#[derive(Debug, Clone, Copy)]
struct Changed {
    location: bool,
    program_type: bool,
    trainer: bool,
    plan: bool,
}

impl Changed {
    const ALL: Self = Self {
        location: true,
        program_type: true,
        trainer: true,
        plan: true,
    };

    fn from_update(patch: &UpdateClassSession) -> Self {
        Self {
            location: patch.location_id.is_some(),
            program_type: patch.program_type_id.is_some(),
            trainer: patch.trainer_id.is_some(),
            plan: patch.membership_plan_id.is_some(),
        }
    }
}

/// Creates, edits, deactivates, and deletes recurring class sessions.
///
/// Callers must have already verified that the user is an administrator.
#[derive(Clone)]
pub struct ClassSessionService {
    sessions: Arc<dyn ClassSessionStore>,
    attendances: Arc<dyn AttendanceStore>,
    catalog: Arc<dyn CatalogStore>,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for ClassSessionService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClassSessionService").finish_non_exhaustive()
    }
}

impl ClassSessionService {
    /// Creates a new class session service.
    pub fn new(
        sessions: Arc<dyn ClassSessionStore>,
        attendances: Arc<dyn AttendanceStore>,
        catalog: Arc<dyn CatalogStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            sessions,
            attendances,
            catalog,
            clock,
        }
    }

    /// Lists sessions matching `filter`.
    pub async fn list(&self, filter: &ClassSessionFilter) -> Result<Vec<ClassSession>, AppError> {
        self.sessions.list_sessions(filter).await
    }

    /// Gets a session by ID.
    pub async fn get(&self, id: i64) -> Result<ClassSession, AppError> {
        self.sessions
            .find_session(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("ClassSession {id} not found")))
    }

    /// Creates a session after validating its shape and references.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        data: CreateClassSession,
    ) -> Result<ClassSession, AppError> {
        validate_shape(SessionShape::from(&data))?;
        self.check_references(References::from(&data), Changed::ALL)
            .await?;

        let session = self.sessions.create_session(&data, self.clock.now()).await?;

        info!(
            admin_id = ctx.user_id,
            class_session_id = session.id,
            weekday = session.weekday,
            "Class session created"
        );

        Ok(session)
    }

    /// Applies a partial update. The merged session must satisfy the same
    /// rules as a new one; only references that the update touches are
    /// looked up again.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: i64,
        patch: UpdateClassSession,
    ) -> Result<ClassSession, AppError> {
        let current = self.get(id).await?;
        if patch.is_empty() {
            return Ok(current);
        }

        let merged = patch.apply_to(&current);
        validate_shape(SessionShape::from(&merged))?;
        self.check_references(References::from(&merged), Changed::from_update(&patch))
            .await?;

        let saved = self.sessions.save_session(&merged, self.clock.now()).await?;

        info!(admin_id = ctx.user_id, class_session_id = id, "Class session updated");
        Ok(saved)
    }

    /// Marks a session inactive so it can no longer be booked. Existing
    /// attendances are left untouched. Deactivating twice is a no-op.
    pub async fn deactivate(
        &self,
        ctx: &RequestContext,
        id: i64,
    ) -> Result<ClassSession, AppError> {
        let current = self.get(id).await?;
        if !current.is_active {
            debug!(class_session_id = id, "Class session already inactive");
            return Ok(current);
        }

        let inactive = ClassSession {
            is_active: false,
            ..current
        };
        let saved = self.sessions.save_session(&inactive, self.clock.now()).await?;

        info!(admin_id = ctx.user_id, class_session_id = id, "Class session deactivated");
        Ok(saved)
    }

    /// Permanently deletes a session that has never been booked.
    pub async fn delete(&self, ctx: &RequestContext, id: i64) -> Result<(), AppError> {
        self.get(id).await?;

        let booked = self.attendances.count_for_session(id).await?;
        if booked > 0 {
            debug!(class_session_id = id, attendances = booked, "Refusing to delete booked session");
            return Err(AppError::conflict(messages::SESSION_HAS_ATTENDANCES));
        }

        if !self.sessions.delete_session(id).await? {
            return Err(AppError::not_found(format!("ClassSession {id} not found")));
        }

        info!(admin_id = ctx.user_id, class_session_id = id, "Class session deleted");
        Ok(())
    }

    async fn check_references(&self, refs: References, changed: Changed) -> Result<(), AppError> {
        if changed.location && self.catalog.find_location(refs.location_id).await?.is_none() {
            return Err(AppError::not_found(format!(
                "Location {} not found",
                refs.location_id
            )));
        }
        if changed.program_type
            && self
                .catalog
                .find_program_type(refs.program_type_id)
                .await?
                .is_none()
        {
            return Err(AppError::not_found(format!(
                "ProgramType {} not found",
                refs.program_type_id
            )));
        }
        if changed.trainer && self.catalog.find_trainer(refs.trainer_id).await?.is_none() {
            return Err(AppError::not_found(format!(
                "Trainer {} not found",
                refs.trainer_id
            )));
        }

        let Some(plan_id) = refs.membership_plan_id else {
            return Ok(());
        };
        if !(changed.plan || changed.location) {
            return Ok(());
        }

        let plan = self
            .catalog
            .find_membership_plan(plan_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("MembershipPlan {plan_id} not found")))?;
        if plan.location_id != refs.location_id {
            return Err(AppError::invalid_request(
                "Membership plan belongs to a different location",
            ));
        }
        Ok(())
    }
}
