//! Convenience result type alias for StudioHub.

use crate::error::AppError;

/// A specialized `Result` type for StudioHub operations.
pub type AppResult<T> = Result<T, AppError>;
