//! Schema migration runner.

use tracing::info;

use studiohub_core::error::{AppError, ErrorKind};
use studiohub_core::result::AppResult;

use crate::connection::DatabasePool;

/// Apply every pending migration under `migrations/`.
pub async fn run_migrations(db: &DatabasePool) -> AppResult<()> {
    info!("Applying schema migrations");

    let migrator = sqlx::migrate!("../../migrations");
    let known = migrator.iter().count();

    migrator.run(db.pool()).await.map_err(|e| {
        AppError::with_source(
            ErrorKind::Database,
            format!("Failed to run migrations: {e}"),
            e,
        )
    })?;

    info!(migrations = known, "Schema is up to date");
    Ok(())
}
