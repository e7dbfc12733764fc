//! Convenience result type alias for ClickAulas.

use crate::error::AppError;

/// A specialized `Result` type for ClickAulas operations.
pub type AppResult<T> = Result<T, AppError>;
