//! Storage seams consumed by the service layer.
//!
//! Every trait has two implementations: the sqlx repositories in
//! [`crate::repositories`] and the in-memory [`crate::memory::MemoryStore`].

pub mod messages;

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use studiohub_core::config::MembershipPolicy;
use studiohub_core::result::AppResult;
use studiohub_entity::attendance::{Attendance, AttendanceDetail, NewAttendance};
use studiohub_entity::class_session::{ClassSession, ClassSessionFilter, CreateClassSession};
use studiohub_entity::membership::{Membership, MembershipPlan};
use studiohub_entity::studio::{Location, ProgramType, Trainer};
use studiohub_entity::user::User;
use studiohub_entity::user::model::UpdateProfile;

use crate::connection::DatabasePool;
use crate::memory::MemoryStore;
use crate::repositories::{
    AttendanceRepository, CatalogRepository, ClassSessionRepository, MembershipRepository,
    UserRepository,
};

/// Reachability probe for the backing store.
#[async_trait]
pub trait StoreHealth: Send + Sync + 'static {
    async fn health_check(&self) -> AppResult<bool>;
}

/// Account lookups and self-service updates.
#[async_trait]
pub trait UserStore: Send + Sync + 'static {
    async fn find_user(&self, id: i64) -> AppResult<Option<User>>;

    /// Applies the given profile fields; returns `None` for an unknown user.
    async fn update_profile(&self, id: i64, changes: &UpdateProfile) -> AppResult<Option<User>>;
}

/// Read access to the entities a class session references.
#[async_trait]
pub trait CatalogStore: Send + Sync + 'static {
    async fn find_location(&self, id: i64) -> AppResult<Option<Location>>;
    async fn find_program_type(&self, id: i64) -> AppResult<Option<ProgramType>>;
    async fn find_trainer(&self, id: i64) -> AppResult<Option<Trainer>>;
    async fn find_membership_plan(&self, id: i64) -> AppResult<Option<MembershipPlan>>;
}

/// Persistence for recurring class sessions.
#[async_trait]
pub trait ClassSessionStore: Send + Sync + 'static {
    async fn find_session(&self, id: i64) -> AppResult<Option<ClassSession>>;

    /// Sessions passing `filter`, ordered by weekday, start time, then id.
    async fn list_sessions(&self, filter: &ClassSessionFilter) -> AppResult<Vec<ClassSession>>;

    async fn create_session(
        &self,
        data: &CreateClassSession,
        at: DateTime<Utc>,
    ) -> AppResult<ClassSession>;

    /// Overwrites every mutable column of `session.id` with the given values.
    async fn save_session(&self, session: &ClassSession, at: DateTime<Utc>)
    -> AppResult<ClassSession>;

    /// Deletes a session that has no attendances.
    ///
    /// Returns `false` when the session does not exist and a `Conflict` error
    /// when attendances still reference it.
    async fn delete_session(&self, id: i64) -> AppResult<bool>;
}

/// A booking to perform atomically.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingRequest {
    pub attendance: NewAttendance,
    pub policy: MembershipPolicy,
}

/// Result of an atomic cancellation attempt.
#[derive(Debug, Clone)]
pub enum CancelOutcome {
    /// The attendance moved to `CANCELED` in this call.
    Canceled(Attendance),
    /// It was already canceled; nothing was written.
    AlreadyCanceled(Attendance),
    /// Its status does not allow cancellation.
    NotCancelable(Attendance),
    /// No attendance with that id belongs to the user.
    NotFound,
}

/// Persistence for attendances, including the two write transactions.
#[async_trait]
pub trait AttendanceStore: Send + Sync + 'static {
    /// The caller's attendance joined with its session window.
    async fn find_detail(&self, id: i64, user_id: i64) -> AppResult<Option<AttendanceDetail>>;

    async fn find_booking(
        &self,
        user_id: i64,
        class_session_id: i64,
        class_date: NaiveDate,
    ) -> AppResult<Option<Attendance>>;

    /// Attendances of one occurrence that still hold a seat.
    async fn count_seated(&self, class_session_id: i64, class_date: NaiveDate) -> AppResult<i64>;

    /// Every attendance ever recorded against a session.
    async fn count_for_session(&self, class_session_id: i64) -> AppResult<i64>;

    /// A user's attendances, optionally bounded by an inclusive date range,
    /// ordered by class date, start time, then id.
    async fn list_details_for_user(
        &self,
        user_id: i64,
        range: Option<(NaiveDate, NaiveDate)>,
    ) -> AppResult<Vec<AttendanceDetail>>;

    /// Inserts a `PLANNED` attendance after re-checking, under a lock on the
    /// session, that it is still bookable, not a duplicate, and not full.
    /// Under [`MembershipPolicy::RequireActive`] a visit is consumed in the
    /// same transaction.
    async fn book(&self, request: &BookingRequest) -> AppResult<Attendance>;

    /// Moves the caller's attendance to `CANCELED`, refunding the membership
    /// visit of a `PLANNED` booking.
    async fn cancel(&self, id: i64, user_id: i64, at: DateTime<Utc>) -> AppResult<CancelOutcome>;
}

/// Read access to client memberships.
#[async_trait]
pub trait MembershipStore: Send + Sync + 'static {
    async fn find_membership(&self, id: i64) -> AppResult<Option<Membership>>;

    /// A user's memberships, newest start date first.
    async fn list_memberships_for_user(&self, user_id: i64) -> AppResult<Vec<Membership>>;
}

/// Every store the services need, behind trait objects.
#[derive(Clone)]
pub struct Stores {
    pub users: Arc<dyn UserStore>,
    pub catalog: Arc<dyn CatalogStore>,
    pub class_sessions: Arc<dyn ClassSessionStore>,
    pub attendances: Arc<dyn AttendanceStore>,
    pub memberships: Arc<dyn MembershipStore>,
    pub health: Arc<dyn StoreHealth>,
}

impl Stores {
    /// Stores backed by PostgreSQL repositories.
    pub fn postgres(db: &DatabasePool) -> Self {
        let pool = db.pool().clone();
        Self {
            users: Arc::new(UserRepository::new(pool.clone())),
            catalog: Arc::new(CatalogRepository::new(pool.clone())),
            class_sessions: Arc::new(ClassSessionRepository::new(pool.clone())),
            attendances: Arc::new(AttendanceRepository::new(pool.clone())),
            memberships: Arc::new(MembershipRepository::new(pool)),
            health: Arc::new(db.clone()),
        }
    }

    /// Stores backed by one shared in-memory state.
    pub fn memory(store: MemoryStore) -> Self {
        let shared = Arc::new(store);
        Self {
            users: shared.clone(),
            catalog: shared.clone(),
            class_sessions: shared.clone(),
            attendances: shared.clone(),
            memberships: shared.clone(),
            health: shared,
        }
    }
}

impl std::fmt::Debug for Stores {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stores").finish_non_exhaustive()
    }
}
