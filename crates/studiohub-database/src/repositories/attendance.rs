//! Attendance repository implementation.
//!
//! Booking and cancellation each run in a single transaction. Booking takes
//! a row lock on the class session so concurrent bookings of the same
//! session serialize on the capacity check.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{PgPool, Postgres, Transaction};
use tracing::debug;

use studiohub_core::config::MembershipPolicy;
use studiohub_core::error::{AppError, ErrorKind};
use studiohub_core::result::AppResult;
use studiohub_entity::attendance::status::CancelTransition;
use studiohub_entity::attendance::{Attendance, AttendanceDetail, AttendanceStatus};
use studiohub_entity::class_session::ClassSession;
use studiohub_entity::membership::Membership;

use crate::store::messages;
use crate::store::{AttendanceStore, BookingRequest, CancelOutcome};

const UNIQUE_BOOKING_CONSTRAINT: &str = "uq_attendance_user_session_date";

const DETAIL_COLUMNS: &str = "a.*, cs.start_time, cs.end_time";

/// Repository for attendance queries and booking transactions.
#[derive(Debug, Clone)]
pub struct AttendanceRepository {
    pool: PgPool,
}

impl AttendanceRepository {
    /// Create a new attendance repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn begin(&self) -> AppResult<Transaction<'static, Postgres>> {
        self.pool
            .begin()
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e))
    }

    /// Picks the membership that pays for a class on `date`: the one expiring
    /// soonest, then the oldest. The row stays locked until commit.
    async fn lock_paying_membership(
        tx: &mut Transaction<'static, Postgres>,
        user_id: i64,
        date: NaiveDate,
    ) -> AppResult<Option<Membership>> {
        sqlx::query_as::<_, Membership>(
            "SELECT * FROM memberships \
             WHERE user_id = $1 AND status = 'ACTIVE' \
               AND start_date <= $2 AND end_date >= $2 \
               AND (total_visits IS NULL OR visits_used < total_visits) \
             ORDER BY end_date, id LIMIT 1 FOR UPDATE",
        )
        .bind(user_id)
        .bind(date)
        .fetch_optional(&mut **tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to select membership", e))
    }
}

#[async_trait]
impl AttendanceStore for AttendanceRepository {
    async fn find_detail(&self, id: i64, user_id: i64) -> AppResult<Option<AttendanceDetail>> {
        sqlx::query_as::<_, AttendanceDetail>(&format!(
            "SELECT {DETAIL_COLUMNS} FROM attendances a \
             JOIN class_sessions cs ON cs.id = a.class_session_id \
             WHERE a.id = $1 AND a.user_id = $2"
        ))
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find attendance", e))
    }

    async fn find_booking(
        &self,
        user_id: i64,
        class_session_id: i64,
        class_date: NaiveDate,
    ) -> AppResult<Option<Attendance>> {
        sqlx::query_as::<_, Attendance>(
            "SELECT * FROM attendances \
             WHERE user_id = $1 AND class_session_id = $2 AND class_date = $3",
        )
        .bind(user_id)
        .bind(class_session_id)
        .bind(class_date)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find booking", e))
    }

    async fn count_seated(&self, class_session_id: i64, class_date: NaiveDate) -> AppResult<i64> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM attendances \
             WHERE class_session_id = $1 AND class_date = $2 AND status <> 'CANCELED'",
        )
        .bind(class_session_id)
        .bind(class_date)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count bookings", e))
    }

    async fn count_for_session(&self, class_session_id: i64) -> AppResult<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM attendances WHERE class_session_id = $1")
            .bind(class_session_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count attendances", e)
            })
    }

    async fn list_details_for_user(
        &self,
        user_id: i64,
        range: Option<(NaiveDate, NaiveDate)>,
    ) -> AppResult<Vec<AttendanceDetail>> {
        let (from, to) = match range {
            Some((from, to)) => (Some(from), Some(to)),
            None => (None, None),
        };

        sqlx::query_as::<_, AttendanceDetail>(&format!(
            "SELECT {DETAIL_COLUMNS} FROM attendances a \
             JOIN class_sessions cs ON cs.id = a.class_session_id \
             WHERE a.user_id = $1 \
               AND ($2::DATE IS NULL OR a.class_date >= $2) \
               AND ($3::DATE IS NULL OR a.class_date <= $3) \
             ORDER BY a.class_date, cs.start_time, a.id"
        ))
        .bind(user_id)
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list attendances", e))
    }

    async fn book(&self, request: &BookingRequest) -> AppResult<Attendance> {
        let new = &request.attendance;
        let mut tx = self.begin().await?;

        let session = sqlx::query_as::<_, ClassSession>(
            "SELECT * FROM class_sessions WHERE id = $1 FOR UPDATE",
        )
        .bind(new.class_session_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to lock class session", e))?
        .filter(|s| s.is_active)
        .ok_or_else(|| AppError::not_found(messages::SESSION_UNAVAILABLE))?;

        let duplicate: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM attendances \
             WHERE user_id = $1 AND class_session_id = $2 AND class_date = $3)",
        )
        .bind(new.user_id)
        .bind(new.class_session_id)
        .bind(new.class_date)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to check booking", e))?;
        if duplicate {
            return Err(AppError::conflict(messages::ALREADY_BOOKED));
        }

        let seated: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM attendances \
             WHERE class_session_id = $1 AND class_date = $2 AND status <> 'CANCELED'",
        )
        .bind(new.class_session_id)
        .bind(new.class_date)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count bookings", e))?;
        if seated >= i64::from(session.capacity) {
            return Err(AppError::conflict(messages::CLASS_FULL));
        }

        let membership_id = match request.policy {
            MembershipPolicy::Lenient => None,
            MembershipPolicy::RequireActive => {
                let membership = Self::lock_paying_membership(&mut tx, new.user_id, new.class_date)
                    .await?
                    .ok_or_else(|| AppError::invalid_request(messages::NO_MEMBERSHIP))?;

                sqlx::query("UPDATE memberships SET visits_used = visits_used + 1 WHERE id = $1")
                    .bind(membership.id)
                    .execute(&mut *tx)
                    .await
                    .map_err(|e| {
                        AppError::with_source(ErrorKind::Database, "Failed to consume visit", e)
                    })?;
                Some(membership.id)
            }
        };

        let attendance = sqlx::query_as::<_, Attendance>(
            "INSERT INTO attendances (user_id, class_session_id, membership_id, class_date, status, \
             created_at, updated_at) VALUES ($1, $2, $3, $4, $5, $6, $6) RETURNING *",
        )
        .bind(new.user_id)
        .bind(new.class_session_id)
        .bind(membership_id)
        .bind(new.class_date)
        .bind(AttendanceStatus::Planned)
        .bind(new.booked_at)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db)
                if db.is_unique_violation()
                    && db.constraint() == Some(UNIQUE_BOOKING_CONSTRAINT) =>
            {
                debug!(user_id = new.user_id, "Concurrent duplicate booking rejected by constraint");
                AppError::with_source(ErrorKind::Conflict, messages::ALREADY_BOOKED, e)
            }
            other => AppError::with_source(ErrorKind::Database, "Failed to insert attendance", other),
        })?;

        tx.commit()
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to commit booking", e))?;

        Ok(attendance)
    }

    async fn cancel(&self, id: i64, user_id: i64, at: DateTime<Utc>) -> AppResult<CancelOutcome> {
        let mut tx = self.begin().await?;

        let current = sqlx::query_as::<_, Attendance>(
            "SELECT * FROM attendances WHERE id = $1 AND user_id = $2 FOR UPDATE",
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to lock attendance", e))?;

        let Some(current) = current else {
            return Ok(CancelOutcome::NotFound);
        };

        match current.status.cancel_transition() {
            CancelTransition::Forbidden => return Ok(CancelOutcome::NotCancelable(current)),
            CancelTransition::Noop => return Ok(CancelOutcome::AlreadyCanceled(current)),
            CancelTransition::Apply => {}
        }

        let canceled = sqlx::query_as::<_, Attendance>(
            "UPDATE attendances SET status = $2, updated_at = $3 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(AttendanceStatus::Canceled)
        .bind(at)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to cancel attendance", e))?;

        if let (AttendanceStatus::Planned, Some(membership_id)) =
            (current.status, current.membership_id)
        {
            sqlx::query(
                "UPDATE memberships SET visits_used = GREATEST(visits_used - 1, 0) WHERE id = $1",
            )
            .bind(membership_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to refund visit", e))?;
        }

        tx.commit()
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to commit cancel", e))?;

        Ok(CancelOutcome::Canceled(canceled))
    }
}
