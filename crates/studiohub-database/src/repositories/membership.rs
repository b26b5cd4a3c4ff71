//! Membership repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use studiohub_core::error::{AppError, ErrorKind};
use studiohub_core::result::AppResult;
use studiohub_entity::membership::Membership;

use crate::store::MembershipStore;

/// Repository for client memberships.
#[derive(Debug, Clone)]
pub struct MembershipRepository {
    pool: PgPool,
}

impl MembershipRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MembershipStore for MembershipRepository {
    async fn find_membership(&self, id: i64) -> AppResult<Option<Membership>> {
        sqlx::query_as::<_, Membership>("SELECT * FROM memberships WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find membership", e))
    }

    async fn list_memberships_for_user(&self, user_id: i64) -> AppResult<Vec<Membership>> {
        sqlx::query_as::<_, Membership>(
            "SELECT * FROM memberships WHERE user_id = $1 ORDER BY start_date DESC, id DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list memberships", e))
    }
}
