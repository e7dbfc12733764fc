//! Class schedule handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;

use clickaulas_entity::{ClassSchedule, ScheduleDetail};
use clickaulas_service::{ScheduleInput, ScheduleOptions};

use crate::dto::{ApiResponse, MessageResponse, ScheduleQuery};
use crate::error::ApiError;
use crate::extractors::{AuthUser, Payload, parse_id};
use crate::state::AppState;

/// GET /api/admin/schedules
pub async fn list_schedules(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ScheduleQuery>,
) -> Result<Json<ApiResponse<Vec<ScheduleDetail>>>, ApiError> {
    let schedules = state.schedule_service.list(&auth, &query.into()).await?;
    Ok(Json(ApiResponse::ok(schedules)))
}

/// GET /api/admin/schedules/options
pub async fn schedule_options(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<ScheduleOptions>>, ApiError> {
    let options = state.schedule_service.options(&auth).await?;
    Ok(Json(ApiResponse::ok(options)))
}

/// POST /api/admin/schedules
pub async fn create_schedule(
    State(state): State<AppState>,
    auth: AuthUser,
    Payload(input): Payload<ScheduleInput>,
) -> Result<(StatusCode, Json<ApiResponse<ClassSchedule>>), ApiError> {
    let schedule = state.schedule_service.create(&auth, input).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(schedule))))
}

/// DELETE /api/admin/schedules/{id}
pub async fn delete_schedule(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.schedule_service.delete(&auth, parse_id(&id)?).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new("Deleted"))))
}
