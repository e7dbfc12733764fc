//! Notification handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;

use clickaulas_entity::{Notification, NotificationDetail};
use clickaulas_service::{NotificationInput, NotificationOptions};

use crate::dto::{ApiResponse, NotificationQuery};
use crate::error::ApiError;
use crate::extractors::{AuthUser, Payload, parse_id};
use crate::state::AppState;

/// GET /api/admin/notifications
pub async fn list_notifications(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<NotificationQuery>,
) -> Result<Json<ApiResponse<Vec<NotificationDetail>>>, ApiError> {
    let notifications = state.notification_service.list(&auth, &query.into()).await?;
    Ok(Json(ApiResponse::ok(notifications)))
}

/// GET /api/admin/notifications/options
pub async fn notification_options(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<NotificationOptions>>, ApiError> {
    let options = state.notification_service.options(&auth).await?;
    Ok(Json(ApiResponse::ok(options)))
}

/// POST /api/admin/notifications
pub async fn create_notification(
    State(state): State<AppState>,
    auth: AuthUser,
    Payload(input): Payload<NotificationInput>,
) -> Result<(StatusCode, Json<ApiResponse<Notification>>), ApiError> {
    let notification = state.notification_service.create(&auth, input).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(notification))))
}

/// PUT /api/admin/notifications/{id}/read
pub async fn mark_read(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Notification>>, ApiError> {
    let notification = state
        .notification_service
        .mark_read(&auth, parse_id(&id)?)
        .await?;
    Ok(Json(ApiResponse::ok(notification)))
}
