//! Settings handlers: institutions and rooms.

use axum::Json;
use axum::extract::{Path, State};

use clickaulas_entity::{Institution, Room};
use clickaulas_service::{InstitutionInput, RoomInput};

use crate::dto::{ApiResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, Payload, parse_id};
use crate::state::AppState;

/// GET /api/admin/settings/institutions
pub async fn list_institutions(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<Institution>>>, ApiError> {
    let institutions = state.settings_service.list_institutions(&auth).await?;
    Ok(Json(ApiResponse::ok(institutions)))
}

/// POST /api/admin/settings/institutions
pub async fn upsert_institution(
    State(state): State<AppState>,
    auth: AuthUser,
    Payload(input): Payload<InstitutionInput>,
) -> Result<Json<ApiResponse<Institution>>, ApiError> {
    let institution = state.settings_service.upsert_institution(&auth, input).await?;
    Ok(Json(ApiResponse::ok(institution)))
}

/// DELETE /api/admin/settings/institutions/{id}
pub async fn delete_institution(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state
        .settings_service
        .delete_institution(&auth, parse_id(&id)?)
        .await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new("Deleted"))))
}

/// GET /api/admin/settings/rooms
pub async fn list_rooms(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<Room>>>, ApiError> {
    let rooms = state.settings_service.list_rooms(&auth).await?;
    Ok(Json(ApiResponse::ok(rooms)))
}

/// POST /api/admin/settings/rooms
pub async fn upsert_room(
    State(state): State<AppState>,
    auth: AuthUser,
    Payload(input): Payload<RoomInput>,
) -> Result<Json<ApiResponse<Room>>, ApiError> {
    let room = state.settings_service.upsert_room(&auth, input).await?;
    Ok(Json(ApiResponse::ok(room)))
}

/// DELETE /api/admin/settings/rooms/{id}
pub async fn delete_room(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.settings_service.delete_room(&auth, parse_id(&id)?).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new("Deleted"))))
}
