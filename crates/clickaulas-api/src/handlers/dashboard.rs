//! Navigation shell and dashboard.

use axum::Json;
use axum::extract::State;

use clickaulas_service::{Dashboard, NavItem, sidebar};

use crate::dto::ApiResponse;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/admin/navigation
pub async fn navigation(auth: AuthUser) -> Json<ApiResponse<Vec<NavItem>>> {
    Json(ApiResponse::ok(sidebar(&auth)))
}

/// GET /api/admin/dashboard
pub async fn dashboard(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Dashboard>>, ApiError> {
    let summary = state.dashboard_service.summary(&auth).await?;
    Ok(Json(ApiResponse::ok(summary)))
}
