//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use studiohub_auth::jwt::JwtDecoder;
use studiohub_auth::rbac::RbacEnforcer;
use studiohub_core::Clock;
use studiohub_core::config::AppConfig;
use studiohub_database::Stores;
use studiohub_service::{
    BookingService, ClassSessionService, MembershipService, ScheduleService, UserService,
};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// Store trait objects (Postgres or in-memory)
    pub stores: Stores,
    /// Time source
    pub clock: Arc<dyn Clock>,

    // ── Auth ─────────────────────────────────────────────────
    /// JWT token decoder and validator
    pub jwt_decoder: Arc<JwtDecoder>,
    /// Role-based access control enforcer
    pub rbac_enforcer: Arc<RbacEnforcer>,

    // ── Services ─────────────────────────────────────────────
    /// Client booking service
    pub booking_service: Arc<BookingService>,
    /// Class session administration service
    pub class_session_service: Arc<ClassSessionService>,
    /// Public schedule service
    pub schedule_service: Arc<ScheduleService>,
    /// Client membership service
    pub membership_service: Arc<MembershipService>,
    /// Profile self-service
    pub user_service: Arc<UserService>,
}

impl AppState {
    /// Wires every service on top of the given stores and clock.
    pub fn new(config: AppConfig, stores: Stores, clock: Arc<dyn Clock>) -> Self {
        let jwt_decoder = Arc::new(JwtDecoder::new(&config.auth));
        let rbac_enforcer = Arc::new(RbacEnforcer::new());

        let booking_service = Arc::new(BookingService::new(
            Arc::clone(&stores.class_sessions),
            Arc::clone(&stores.attendances),
            Arc::clone(&clock),
            config.booking.membership_policy,
        ));
        let class_session_service = Arc::new(ClassSessionService::new(
            Arc::clone(&stores.class_sessions),
            Arc::clone(&stores.attendances),
            Arc::clone(&stores.catalog),
            Arc::clone(&clock),
        ));
        let schedule_service = Arc::new(ScheduleService::new(
            Arc::clone(&stores.class_sessions),
            Arc::clone(&stores.catalog),
        ));
        let membership_service = Arc::new(MembershipService::new(
            Arc::clone(&stores.memberships),
            Arc::clone(&clock),
        ));
        let user_service = Arc::new(UserService::new(Arc::clone(&stores.users)));

        Self {
            config: Arc::new(config),
            stores,
            clock,
            jwt_decoder,
            rbac_enforcer,
            booking_service,
            class_session_service,
            schedule_service,
            membership_service,
            user_service,
        }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .field("stores", &self.stores)
            .finish_non_exhaustive()
    }
}
