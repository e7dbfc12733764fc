//! Auth handlers: register, login, federated callback, logout, session.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::Duration;

use clickaulas_core::config::AuthConfig;
use clickaulas_entity::User;
use clickaulas_service::{LoginInput, RegisterInput, RequestContext, SignIn};

use crate::dto::{ApiResponse, FederatedRequest, MessageResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, Payload};
use crate::state::AppState;

/// Session cookie carrying `token` for `max_age_seconds`.
pub fn session_cookie(
    config: &AuthConfig,
    token: String,
    max_age_seconds: i64,
) -> Cookie<'static> {
    Cookie::build((config.cookie_name.clone(), token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(config.cookie_secure)
        .max_age(Duration::seconds(max_age_seconds))
        .build()
}

/// Expired session cookie that clears the browser's copy.
pub fn cleared_session_cookie(config: &AuthConfig) -> Cookie<'static> {
    Cookie::build((config.cookie_name.clone(), ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(config.cookie_secure)
        .removal()
        .build()
}

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    Payload(input): Payload<RegisterInput>,
) -> Result<(StatusCode, Json<ApiResponse<User>>), ApiError> {
    let user = state.auth_service.register(input).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(user))))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Payload(input): Payload<LoginInput>,
) -> Result<(CookieJar, Json<ApiResponse<SignIn>>), ApiError> {
    let sign_in = state.auth_service.login(input).await?;
    Ok(signed_in(&state, jar, sign_in))
}

/// POST /api/auth/federated
pub async fn federated(
    State(state): State<AppState>,
    jar: CookieJar,
    Payload(req): Payload<FederatedRequest>,
) -> Result<(CookieJar, Json<ApiResponse<SignIn>>), ApiError> {
    let sign_in = state.auth_service.federated(&req.assertion).await?;
    Ok(signed_in(&state, jar, sign_in))
}

fn signed_in(
    state: &AppState,
    jar: CookieJar,
    sign_in: SignIn,
) -> (CookieJar, Json<ApiResponse<SignIn>>) {
    let cookie = session_cookie(
        &state.config.auth,
        sign_in.token.token.clone(),
        state.auth_service.session_ttl_seconds(),
    );
    (jar.add(cookie), Json(ApiResponse::ok(sign_in)))
}

/// POST /api/auth/logout
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, Json<ApiResponse<MessageResponse>>) {
    let jar = jar.add(cleared_session_cookie(&state.config.auth));
    (jar, Json(ApiResponse::ok(MessageResponse::new("Logged out"))))
}

/// GET /api/auth/session
pub async fn session(auth: AuthUser) -> Json<ApiResponse<RequestContext>> {
    Json(ApiResponse::ok(auth.0))
}
