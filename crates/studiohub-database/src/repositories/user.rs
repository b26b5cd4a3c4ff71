//! User repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use studiohub_core::error::{AppError, ErrorKind};
use studiohub_core::result::AppResult;
use studiohub_entity::user::User;
use studiohub_entity::user::model::UpdateProfile;

use crate::store::UserStore;

/// Repository for user lookups.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn find_user(&self, id: i64) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find user", e))
    }

    async fn update_profile(&self, id: i64, changes: &UpdateProfile) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>(
            "UPDATE users SET full_name = COALESCE($2, full_name), phone = COALESCE($3, phone) \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(changes.full_name.as_deref())
        .bind(changes.phone.as_deref())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update profile", e))
    }
}
