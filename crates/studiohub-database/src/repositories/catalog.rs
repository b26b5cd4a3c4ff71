//! Lookups for locations, program types, trainers and membership plans.

use async_trait::async_trait;
use sqlx::PgPool;

use studiohub_core::error::{AppError, ErrorKind};
use studiohub_core::result::AppResult;
use studiohub_entity::membership::MembershipPlan;
use studiohub_entity::studio::{Location, ProgramType, Trainer};

use crate::store::CatalogStore;

/// Read-only repository over the studio catalog tables.
#[derive(Debug, Clone)]
pub struct CatalogRepository {
    pool: PgPool,
}

impl CatalogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CatalogStore for CatalogRepository {
    async fn find_location(&self, id: i64) -> AppResult<Option<Location>> {
        sqlx::query_as::<_, Location>("SELECT * FROM locations WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find location", e))
    }

    async fn find_program_type(&self, id: i64) -> AppResult<Option<ProgramType>> {
        sqlx::query_as::<_, ProgramType>("SELECT * FROM program_types WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find program type", e)
            })
    }

    async fn find_trainer(&self, id: i64) -> AppResult<Option<Trainer>> {
        sqlx::query_as::<_, Trainer>("SELECT * FROM trainers WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find trainer", e))
    }

    async fn find_membership_plan(&self, id: i64) -> AppResult<Option<MembershipPlan>> {
        sqlx::query_as::<_, MembershipPlan>("SELECT * FROM membership_plans WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find membership plan", e)
            })
    }
}
