//! Class session repository implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use studiohub_core::error::{AppError, ErrorKind};
use studiohub_core::result::AppResult;
use studiohub_entity::class_session::{ClassSession, ClassSessionFilter, CreateClassSession};

use crate::store::ClassSessionStore;
use crate::store::messages;

/// Repository for class session CRUD.
#[derive(Debug, Clone)]
pub struct ClassSessionRepository {
    pool: PgPool,
}

impl ClassSessionRepository {
    /// Create a new class session repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ClassSessionStore for ClassSessionRepository {
    async fn find_session(&self, id: i64) -> AppResult<Option<ClassSession>> {
        sqlx::query_as::<_, ClassSession>("SELECT * FROM class_sessions WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find class session", e)
            })
    }

    async fn list_sessions(&self, filter: &ClassSessionFilter) -> AppResult<Vec<ClassSession>> {
        sqlx::query_as::<_, ClassSession>(
            "SELECT * FROM class_sessions \
             WHERE ($1::BIGINT IS NULL OR location_id = $1) \
               AND ($2::BIGINT IS NULL OR program_type_id = $2) \
               AND ($3::BIGINT IS NULL OR trainer_id = $3) \
               AND ($4::SMALLINT IS NULL OR weekday = $4) \
               AND ($5::BOOLEAN IS NULL OR is_active = $5) \
             ORDER BY weekday, start_time, id",
        )
        .bind(filter.location_id)
        .bind(filter.program_type_id)
        .bind(filter.trainer_id)
        .bind(filter.weekday)
        .bind(filter.is_active)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list class sessions", e))
    }

    async fn create_session(
        &self,
        data: &CreateClassSession,
        at: DateTime<Utc>,
    ) -> AppResult<ClassSession> {
        sqlx::query_as::<_, ClassSession>(
            "INSERT INTO class_sessions (location_id, program_type_id, trainer_id, membership_plan_id, \
             weekday, start_time, end_time, capacity, is_active, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $10) RETURNING *",
        )
        .bind(data.location_id)
        .bind(data.program_type_id)
        .bind(data.trainer_id)
        .bind(data.membership_plan_id)
        .bind(data.weekday)
        .bind(data.start_time)
        .bind(data.end_time)
        .bind(data.capacity)
        .bind(data.is_active)
        .bind(at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create class session", e))
    }

    async fn save_session(
        &self,
        session: &ClassSession,
        at: DateTime<Utc>,
    ) -> AppResult<ClassSession> {
        sqlx::query_as::<_, ClassSession>(
            "UPDATE class_sessions SET location_id = $2, program_type_id = $3, trainer_id = $4, \
             membership_plan_id = $5, weekday = $6, start_time = $7, end_time = $8, capacity = $9, \
             is_active = $10, updated_at = $11 WHERE id = $1 RETURNING *",
        )
        .bind(session.id)
        .bind(session.location_id)
        .bind(session.program_type_id)
        .bind(session.trainer_id)
        .bind(session.membership_plan_id)
        .bind(session.weekday)
        .bind(session.start_time)
        .bind(session.end_time)
        .bind(session.capacity)
        .bind(session.is_active)
        .bind(at)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update class session", e))?
        .ok_or_else(|| AppError::not_found(format!("ClassSession {} not found", session.id)))
    }

    async fn delete_session(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query(
            "DELETE FROM class_sessions WHERE id = $1 \
             AND NOT EXISTS (SELECT 1 FROM attendances WHERE class_session_id = $1)",
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_foreign_key_violation() => {
                AppError::with_source(ErrorKind::Conflict, messages::SESSION_HAS_ATTENDANCES, e)
            }
            other => {
                AppError::with_source(ErrorKind::Database, "Failed to delete class session", other)
            }
        })?;

        if result.rows_affected() > 0 {
            return Ok(true);
        }

        let still_there: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM class_sessions WHERE id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to check class session", e)
                })?;

        if still_there {
            Err(AppError::conflict(messages::SESSION_HAS_ATTENDANCES))
        } else {
            Ok(false)
        }
    }
}
