//! Coordinator and teacher handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;

use clickaulas_entity::StaffMember;
use clickaulas_service::{StaffInput, StaffService, StaffUpsert};

use crate::dto::{ApiResponse, MessageResponse, StaffQuery};
use crate::error::ApiError;
use crate::extractors::{AuthUser, Payload, parse_id};
use crate::state::AppState;

async fn list(
    service: &StaffService,
    auth: &AuthUser,
    query: StaffQuery,
) -> Result<Json<ApiResponse<Vec<StaffMember>>>, ApiError> {
    let members = service.list(auth, &query.into()).await?;
    Ok(Json(ApiResponse::ok(members)))
}

async fn upsert(
    service: &StaffService,
    auth: &AuthUser,
    input: StaffInput,
) -> Result<(StatusCode, Json<ApiResponse<StaffUpsert>>), ApiError> {
    let result = service.upsert(auth, input).await?;
    let status = if result.created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(ApiResponse::ok(result))))
}

async fn delete(
    service: &StaffService,
    auth: &AuthUser,
    id: &str,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    service.delete(auth, parse_id(id)?).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new("Deleted"))))
}

/// GET /api/admin/coordinators
pub async fn list_coordinators(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<StaffQuery>,
) -> Result<Json<ApiResponse<Vec<StaffMember>>>, ApiError> {
    list(&state.coordinator_service, &auth, query).await
}

/// POST /api/admin/coordinators
pub async fn upsert_coordinator(
    State(state): State<AppState>,
    auth: AuthUser,
    Payload(input): Payload<StaffInput>,
) -> Result<(StatusCode, Json<ApiResponse<StaffUpsert>>), ApiError> {
    upsert(&state.coordinator_service, &auth, input).await
}

/// DELETE /api/admin/coordinators/{id}
pub async fn delete_coordinator(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    delete(&state.coordinator_service, &auth, &id).await
}

/// GET /api/admin/teachers
pub async fn list_teachers(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<StaffQuery>,
) -> Result<Json<ApiResponse<Vec<StaffMember>>>, ApiError> {
    list(&state.teacher_service, &auth, query).await
}

/// POST /api/admin/teachers
pub async fn upsert_teacher(
    State(state): State<AppState>,
    auth: AuthUser,
    Payload(input): Payload<StaffInput>,
) -> Result<(StatusCode, Json<ApiResponse<StaffUpsert>>), ApiError> {
    upsert(&state.teacher_service, &auth, input).await
}

/// DELETE /api/admin/teachers/{id}
pub async fn delete_teacher(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    delete(&state.teacher_service, &auth, &id).await
}
