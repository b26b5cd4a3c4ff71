//! Public weekly schedule of a location.

use std::sync::Arc;

use studiohub_core::error::AppError;
use studiohub_database::store::{CatalogStore, ClassSessionStore};
use studiohub_entity::class_session::{ClassSession, ClassSessionFilter};

/// Read-only view of the bookable timetable. Needs no authentication.
#[derive(Clone)]
pub struct ScheduleService {
    sessions: Arc<dyn ClassSessionStore>,
    catalog: Arc<dyn CatalogStore>,
}

impl std::fmt::Debug for ScheduleService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScheduleService").finish_non_exhaustive()
    }
}

impl ScheduleService {
    pub fn new(sessions: Arc<dyn ClassSessionStore>, catalog: Arc<dyn CatalogStore>) -> Self {
        Self { sessions, catalog }
    }

    /// Active sessions of `location_id`, ordered by weekday then start time.
    pub async fn for_location(
        &self,
        location_id: i64,
        program_type_id: Option<i64>,
    ) -> Result<Vec<ClassSession>, AppError> {
        if self.catalog.find_location(location_id).await?.is_none() {
            return Err(AppError::not_found(format!(
                "Location {location_id} not found"
            )));
        }

        self.sessions
            .list_sessions(&ClassSessionFilter {
                location_id: Some(location_id),
                program_type_id,
                is_active: Some(true),
                ..Default::default()
            })
            .await
    }
}
