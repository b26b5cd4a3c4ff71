//! Booking service: book, cancel, and list a client's classes.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use studiohub_core::Clock;
use studiohub_core::config::MembershipPolicy;
use studiohub_core::error::AppError;
use studiohub_database::store::messages;
use studiohub_database::store::{
    AttendanceStore, BookingRequest, CancelOutcome, ClassSessionStore,
};
use studiohub_entity::attendance::status::CancelTransition;
use studiohub_entity::attendance::{AttendanceStatus, NewAttendance};

use super::views::{BookedClass, MyCalendar, MyClasses};
use crate::context::RequestContext;

/// Request to book one occurrence of a class session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookClassRequest {
    /// Session to book.
    pub class_session_id: i64,
    /// Date of the occurrence; must fall on the session's weekday.
    pub class_date: NaiveDate,
}

/// Books and cancels class occurrences on behalf of the current user.
#[derive(Clone)]
pub struct BookingService {
    /// Class session store.
    sessions: Arc<dyn ClassSessionStore>,
    /// Attendance store.
    attendances: Arc<dyn AttendanceStore>,
    /// Time source.
    clock: Arc<dyn Clock>,
    /// Membership consumption policy.
    policy: MembershipPolicy,
}

impl std::fmt::Debug for BookingService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BookingService")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl BookingService {
    /// Creates a new booking service.
    pub fn new(
        sessions: Arc<dyn ClassSessionStore>,
        attendances: Arc<dyn AttendanceStore>,
        clock: Arc<dyn Clock>,
        policy: MembershipPolicy,
    ) -> Self {
        Self {
            sessions,
            attendances,
            clock,
            policy,
        }
    }

    /// Books a seat for the current user.
    ///
    /// Checks run in a fixed order: the session must exist and be active, the
    /// date must fall on its weekday, the user must not already hold a
    /// booking for the occurrence, and a seat must be free. The store repeats
    /// the last two checks under a lock before inserting.
    pub async fn book(
        &self,
        ctx: &RequestContext,
        req: BookClassRequest,
    ) -> Result<BookedClass, AppError> {
        let session = self
            .sessions
            .find_session(req.class_session_id)
            .await?
            .filter(|s| s.is_active)
            .ok_or_else(|| AppError::not_found(messages::SESSION_UNAVAILABLE))?;

        if !session.occurs_on(req.class_date) {
            debug!(
                class_session_id = session.id,
                weekday = session.weekday,
                class_date = %req.class_date,
                "Booking date does not match session weekday"
            );
            return Err(AppError::invalid_request(messages::WEEKDAY_MISMATCH));
        }

        if self
            .attendances
            .find_booking(ctx.user_id, session.id, req.class_date)
            .await?
            .is_some()
        {
            return Err(AppError::conflict(messages::ALREADY_BOOKED));
        }

        let seated = self
            .attendances
            .count_seated(session.id, req.class_date)
            .await?;
        if seated >= i64::from(session.capacity) {
            return Err(AppError::conflict(messages::CLASS_FULL));
        }

        let attendance = self
            .attendances
            .book(&BookingRequest {
                attendance: NewAttendance {
                    user_id: ctx.user_id,
                    class_session_id: session.id,
                    class_date: req.class_date,
                    booked_at: self.clock.now(),
                },
                policy: self.policy,
            })
            .await?;

        info!(
            user_id = ctx.user_id,
            attendance_id = attendance.id,
            class_session_id = session.id,
            class_date = %req.class_date,
            "Class booked"
        );

        Ok(BookedClass::new(
            &attendance,
            session.start_time,
            session.end_time,
        ))
    }

    /// Cancels one of the current user's bookings.
    ///
    /// Canceling an already canceled booking returns it unchanged. Another
    /// user's booking is reported as not found.
    pub async fn cancel(
        &self,
        ctx: &RequestContext,
        attendance_id: i64,
    ) -> Result<BookedClass, AppError> {
        let detail = self
            .attendances
            .find_detail(attendance_id, ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found(messages::ATTENDANCE_NOT_FOUND))?;

        match detail.attendance.status.cancel_transition() {
            CancelTransition::Forbidden => {
                return Err(AppError::invalid_request(messages::ALREADY_ATTENDED));
            }
            CancelTransition::Noop => return Ok(BookedClass::from(&detail)),
            CancelTransition::Apply => {}
        }

        let canceled = match self
            .attendances
            .cancel(attendance_id, ctx.user_id, self.clock.now())
            .await?
        {
            CancelOutcome::Canceled(a) | CancelOutcome::AlreadyCanceled(a) => a,
            CancelOutcome::NotCancelable(_) => {
                return Err(AppError::invalid_request(messages::ALREADY_ATTENDED));
            }
            CancelOutcome::NotFound => {
                return Err(AppError::not_found(messages::ATTENDANCE_NOT_FOUND));
            }
        };

        info!(
            user_id = ctx.user_id,
            attendance_id,
            previous = %detail.attendance.status,
            "Booking canceled"
        );

        Ok(BookedClass::new(
            &canceled,
            detail.start_time,
            detail.end_time,
        ))
    }

    /// Lists the current user's bookings split into upcoming and history.
    ///
    /// A booking is upcoming when it is `PLANNED` and dated today or later.
    pub async fn my_classes(&self, ctx: &RequestContext) -> Result<MyClasses, AppError> {
        let today = self.clock.today();
        let details = self
            .attendances
            .list_details_for_user(ctx.user_id, None)
            .await?;

        let (upcoming, history): (Vec<BookedClass>, Vec<BookedClass>) = details
            .iter()
            .map(BookedClass::from)
            .partition(|c| is_upcoming(c, today));

        debug!(
            user_id = ctx.user_id,
            upcoming = upcoming.len(),
            history = history.len(),
            "Listed classes"
        );

        Ok(MyClasses { upcoming, history })
    }

    /// Groups the current user's bookings in `[start_date, end_date]` by date.
    pub async fn calendar(
        &self,
        ctx: &RequestContext,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<MyCalendar, AppError> {
        if end_date < start_date {
            return Err(AppError::invalid_request(
                "end_date must be on or after start_date",
            ));
        }

        let details = self
            .attendances
            .list_details_for_user(ctx.user_id, Some((start_date, end_date)))
            .await?;

        Ok(MyCalendar::group(
            start_date,
            end_date,
            details.iter().map(BookedClass::from).collect(),
        ))
    }
}

fn is_upcoming(class: &BookedClass, today: NaiveDate) -> bool {
    class.status == AttendanceStatus::Planned
        && class.class_date >= today
}
