//! HTTP request handlers organized by domain.

pub mod auth;
pub mod dashboard;
pub mod health;
pub mod notification;
pub mod schedule;
pub mod settings;
pub mod staff;

use crate::error::ApiError;
use clickaulas_core::error::AppError;

/// Fallback for unmatched routes.
pub async fn not_found() -> ApiError {
    AppError::not_found("Route not found").into()
}
