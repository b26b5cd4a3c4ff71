//! In-memory implementation of every store trait.
//!
//! One `tokio::sync::Mutex` guards the whole state, so each trait call is
//! atomic. Suitable for tests and single-node demos only.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use tokio::sync::Mutex;
use tracing::debug;

use studiohub_core::config::MembershipPolicy;
use studiohub_core::error::AppError;
use studiohub_core::result::AppResult;
use studiohub_entity::attendance::status::CancelTransition;
use studiohub_entity::attendance::{Attendance, AttendanceDetail, AttendanceStatus};
use studiohub_entity::class_session::{ClassSession, ClassSessionFilter, CreateClassSession};
use studiohub_entity::membership::model::CreateMembership;
use studiohub_entity::membership::{Membership, MembershipPlan, MembershipStatus};
use studiohub_entity::studio::{Location, ProgramType, Trainer};
use studiohub_entity::user::User;
use studiohub_entity::user::model::{CreateUser, UpdateProfile};

use crate::store::messages;
use crate::store::{
    AttendanceStore, BookingRequest, CancelOutcome, CatalogStore, ClassSessionStore,
    MembershipStore, StoreHealth, UserStore,
};

#[derive(Debug, Default)]
struct MemoryState {
    last_id: i64,
    users: BTreeMap<i64, User>,
    locations: BTreeMap<i64, Location>,
    program_types: BTreeMap<i64, ProgramType>,
    trainers: BTreeMap<i64, Trainer>,
    plans: BTreeMap<i64, MembershipPlan>,
    memberships: BTreeMap<i64, Membership>,
    sessions: BTreeMap<i64, ClassSession>,
    attendances: BTreeMap<i64, Attendance>,
}

impl MemoryState {
    fn next_id(&mut self) -> i64 {
        self.last_id += 1;
        self.last_id
    }

    fn detail(&self, attendance: &Attendance) -> Option<AttendanceDetail> {
        self.sessions
            .get(&attendance.class_session_id)
            .map(|session| AttendanceDetail {
                attendance: attendance.clone(),
                start_time: session.start_time,
                end_time: session.end_time,
            })
    }

    fn seated(&self, class_session_id: i64, class_date: NaiveDate) -> i64 {
        self.attendances
            .values()
            .filter(|a| {
                a.class_session_id == class_session_id
                    && a.class_date == class_date
                    && a.status.holds_seat()
            })
            .count() as i64
    }

    fn paying_membership(&self, user_id: i64, date: NaiveDate) -> Option<i64> {
        self.memberships
            .values()
            .filter(|m| m.user_id == user_id && m.can_cover(date))
            .min_by_key(|m| (m.end_date, m.id))
            .map(|m| m.id)
    }
}

/// Shared in-memory store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an active user.
    pub async fn add_user(&self, data: CreateUser) -> User {
        let mut state = self.state.lock().await;
        let user = User {
            id: state.next_id(),
            email: data.email,
            full_name: data.full_name,
            phone: None,
            role: data.role,
            is_active: true,
            created_at: Utc::now(),
        };
        state.users.insert(user.id, user.clone());
        user
    }

    /// Flips a user's `is_active` flag.
    pub async fn set_user_active(&self, id: i64, active: bool) {
        if let Some(user) = self.state.lock().await.users.get_mut(&id) {
            user.is_active = active;
        }
    }

    pub async fn add_location(&self, name: &str) -> Location {
        let mut state = self.state.lock().await;
        let location = Location {
            id: state.next_id(),
            name: name.to_string(),
            address: None,
        };
        state.locations.insert(location.id, location.clone());
        location
    }

    pub async fn add_program_type(&self, name: &str) -> ProgramType {
        let mut state = self.state.lock().await;
        let program = ProgramType {
            id: state.next_id(),
            name: name.to_string(),
            description: None,
            is_group: true,
        };
        state.program_types.insert(program.id, program.clone());
        program
    }

    pub async fn add_trainer(&self, full_name: &str) -> Trainer {
        let mut state = self.state.lock().await;
        let trainer = Trainer {
            id: state.next_id(),
            full_name: full_name.to_string(),
            phone: None,
            email: None,
            user_id: None,
        };
        state.trainers.insert(trainer.id, trainer.clone());
        trainer
    }

    pub async fn add_membership_plan(&self, name: &str, location_id: i64) -> MembershipPlan {
        let mut state = self.state.lock().await;
        let plan = MembershipPlan {
            id: state.next_id(),
            name: name.to_string(),
            description: None,
            price: 0,
            location_id,
        };
        state.plans.insert(plan.id, plan.clone());
        plan
    }

    /// Sells an `ACTIVE` membership with no visits used.
    pub async fn add_membership(&self, data: CreateMembership) -> Membership {
        let mut state = self.state.lock().await;
        let membership = Membership {
            id: state.next_id(),
            user_id: data.user_id,
            membership_plan_id: data.membership_plan_id,
            start_date: data.start_date,
            end_date: data.end_date,
            total_visits: data.total_visits,
            visits_used: 0,
            status: MembershipStatus::Active,
            created_at: Utc::now(),
        };
        state.memberships.insert(membership.id, membership.clone());
        membership
    }

    /// Overrides a membership's status (freeze, expire, annul).
    pub async fn set_membership_status(&self, id: i64, status: MembershipStatus) {
        if let Some(membership) = self.state.lock().await.memberships.get_mut(&id) {
            membership.status = status;
        }
    }

    /// Records a check-in outcome, as the front desk would.
    pub async fn set_attendance_status(&self, id: i64, status: AttendanceStatus) -> AppResult<()> {
        let mut state = self.state.lock().await;
        let attendance = state
            .attendances
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found(messages::ATTENDANCE_NOT_FOUND))?;
        attendance.status = status;
        Ok(())
    }

    /// Total number of attendance rows, whatever their status.
    pub async fn attendance_count(&self) -> usize {
        self.state.lock().await.attendances.len()
    }
}

#[async_trait]
impl StoreHealth for MemoryStore {
    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_user(&self, id: i64) -> AppResult<Option<User>> {
        Ok(self.state.lock().await.users.get(&id).cloned())
    }

    async fn update_profile(&self, id: i64, changes: &UpdateProfile) -> AppResult<Option<User>> {
        let mut state = self.state.lock().await;
        let Some(user) = state.users.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(full_name) = &changes.full_name {
            user.full_name = Some(full_name.clone());
        }
        if let Some(phone) = &changes.phone {
            user.phone = Some(phone.clone());
        }
        Ok(Some(user.clone()))
    }
}

#[async_trait]
impl CatalogStore for MemoryStore {
    async fn find_location(&self, id: i64) -> AppResult<Option<Location>> {
        Ok(self.state.lock().await.locations.get(&id).cloned())
    }

    async fn find_program_type(&self, id: i64) -> AppResult<Option<ProgramType>> {
        Ok(self.state.lock().await.program_types.get(&id).cloned())
    }

    async fn find_trainer(&self, id: i64) -> AppResult<Option<Trainer>> {
        Ok(self.state.lock().await.trainers.get(&id).cloned())
    }

    async fn find_membership_plan(&self, id: i64) -> AppResult<Option<MembershipPlan>> {
        Ok(self.state.lock().await.plans.get(&id).cloned())
    }
}

#[async_trait]
impl ClassSessionStore for MemoryStore {
    async fn find_session(&self, id: i64) -> AppResult<Option<ClassSession>> {
        Ok(self.state.lock().await.sessions.get(&id).cloned())
    }

    async fn list_sessions(&self, filter: &ClassSessionFilter) -> AppResult<Vec<ClassSession>> {
        let state = self.state.lock().await;
        let mut sessions: Vec<ClassSession> = state
            .sessions
            .values()
            .filter(|s| filter.matches(s))
            .cloned()
            .collect();
        sessions.sort_by_key(|s| (s.weekday, s.start_time, s.id));
        Ok(sessions)
    }

    async fn create_session(
        &self,
        data: &CreateClassSession,
        at: DateTime<Utc>,
    ) -> AppResult<ClassSession> {
        let mut state = self.state.lock().await;
        let session = ClassSession {
            id: state.next_id(),
            location_id: data.location_id,
            program_type_id: data.program_type_id,
            trainer_id: data.trainer_id,
            membership_plan_id: data.membership_plan_id,
            weekday: data.weekday,
            start_time: data.start_time,
            end_time: data.end_time,
            capacity: data.capacity,
            is_active: data.is_active,
            created_at: at,
            updated_at: at,
        };
        state.sessions.insert(session.id, session.clone());
        Ok(session)
    }

    async fn save_session(
        &self,
        session: &ClassSession,
        at: DateTime<Utc>,
    ) -> AppResult<ClassSession> {
        let mut state = self.state.lock().await;
        let stored = state
            .sessions
            .get_mut(&session.id)
            .ok_or_else(|| AppError::not_found(format!("ClassSession {} not found", session.id)))?;
        let created_at = stored.created_at;
        *stored = ClassSession {
            created_at,
            updated_at: at,
            ..session.clone()
        };
        Ok(stored.clone())
    }

    async fn delete_session(&self, id: i64) -> AppResult<bool> {
        let mut state = self.state.lock().await;
        if !state.sessions.contains_key(&id) {
            return Ok(false);
        }
        if state.attendances.values().any(|a| a.class_session_id == id) {
            return Err(AppError::conflict(messages::SESSION_HAS_ATTENDANCES));
        }
        state.sessions.remove(&id);
        Ok(true)
    }
}

#[async_trait]
impl AttendanceStore for MemoryStore {
    async fn find_detail(&self, id: i64, user_id: i64) -> AppResult<Option<AttendanceDetail>> {
        let state = self.state.lock().await;
        Ok(state
            .attendances
            .get(&id)
            .filter(|a| a.user_id == user_id)
            .and_then(|a| state.detail(a)))
    }

    async fn find_booking(
        &self,
        user_id: i64,
        class_session_id: i64,
        class_date: NaiveDate,
    ) -> AppResult<Option<Attendance>> {
        let state = self.state.lock().await;
        Ok(state
            .attendances
            .values()
            .find(|a| {
                a.user_id == user_id
                    && a.class_session_id == class_session_id
                    && a.class_date == class_date
            })
            .cloned())
    }

    async fn count_seated(&self, class_session_id: i64, class_date: NaiveDate) -> AppResult<i64> {
        Ok(self.state.lock().await.seated(class_session_id, class_date))
    }

    async fn count_for_session(&self, class_session_id: i64) -> AppResult<i64> {
        let state = self.state.lock().await;
        Ok(state
            .attendances
            .values()
            .filter(|a| a.class_session_id == class_session_id)
            .count() as i64)
    }

    async fn list_details_for_user(
        &self,
        user_id: i64,
        range: Option<(NaiveDate, NaiveDate)>,
    ) -> AppResult<Vec<AttendanceDetail>> {
        let state = self.state.lock().await;
        let mut details: Vec<AttendanceDetail> = state
            .attendances
            .values()
            .filter(|a| a.user_id == user_id)
            .filter(|a| range.is_none_or(|(from, to)| from <= a.class_date && a.class_date <= to))
            .filter_map(|a| state.detail(a))
            .collect();
        details.sort_by_key(|d| (d.attendance.class_date, d.start_time, d.attendance.id));
        Ok(details)
    }

    async fn book(&self, request: &BookingRequest) -> AppResult<Attendance> {
        let new = &request.attendance;
        let mut state = self.state.lock().await;

        let capacity = state
            .sessions
            .get(&new.class_session_id)
            .filter(|s| s.is_active)
            .map(|s| s.capacity)
            .ok_or_else(|| AppError::not_found(messages::SESSION_UNAVAILABLE))?;

        let duplicate = state.attendances.values().any(|a| {
            a.user_id == new.user_id
                && a.class_session_id == new.class_session_id
                && a.class_date == new.class_date
        });
        if duplicate {
            return Err(AppError::conflict(messages::ALREADY_BOOKED));
        }

        if state.seated(new.class_session_id, new.class_date) >= i64::from(capacity) {
            return Err(AppError::conflict(messages::CLASS_FULL));
        }

        let membership_id = match request.policy {
            MembershipPolicy::Lenient => None,
            MembershipPolicy::RequireActive => {
                let id = state
                    .paying_membership(new.user_id, new.class_date)
                    .ok_or_else(|| AppError::invalid_request(messages::NO_MEMBERSHIP))?;
                if let Some(membership) = state.memberships.get_mut(&id) {
                    membership.visits_used += 1;
                }
                Some(id)
            }
        };

        let attendance = Attendance {
            id: state.next_id(),
            user_id: new.user_id,
            class_session_id: new.class_session_id,
            membership_id,
            class_date: new.class_date,
            status: AttendanceStatus::Planned,
            created_at: new.booked_at,
            updated_at: new.booked_at,
        };
        state.attendances.insert(attendance.id, attendance.clone());
        debug!(attendance_id = attendance.id, "Stored booking in memory");
        Ok(attendance)
    }

    async fn cancel(&self, id: i64, user_id: i64, at: DateTime<Utc>) -> AppResult<CancelOutcome> {
        let mut state = self.state.lock().await;

        let Some(current) = state
            .attendances
            .get(&id)
            .filter(|a| a.user_id == user_id)
            .cloned()
        else {
            return Ok(CancelOutcome::NotFound);
        };

        match current.status.cancel_transition() {
            CancelTransition::Forbidden => return Ok(CancelOutcome::NotCancelable(current)),
            CancelTransition::Noop => return Ok(CancelOutcome::AlreadyCanceled(current)),
            CancelTransition::Apply => {}
        }

        if let (AttendanceStatus::Planned, Some(membership_id)) =
            (current.status, current.membership_id)
        {
            if let Some(membership) = state.memberships.get_mut(&membership_id) {
                membership.visits_used = (membership.visits_used - 1).max(0);
            }
        }

        let canceled = Attendance {
            status: AttendanceStatus::Canceled,
            updated_at: at,
            ..current
        };
        state.attendances.insert(id, canceled.clone());
        Ok(CancelOutcome::Canceled(canceled))
    }
}

#[async_trait]
impl MembershipStore for MemoryStore {
    async fn find_membership(&self, id: i64) -> AppResult<Option<Membership>> {
        Ok(self.state.lock().await.memberships.get(&id).cloned())
    }

    async fn list_memberships_for_user(&self, user_id: i64) -> AppResult<Vec<Membership>> {
        let state = self.state.lock().await;
        let mut memberships: Vec<Membership> = state
            .memberships
            .values()
            .filter(|m| m.user_id == user_id)
            .cloned()
            .collect();
        memberships.sort_by(|a, b| b.start_date.cmp(&a.start_date).then(b.id.cmp(&a.id)));
        Ok(memberships)
    }
}
