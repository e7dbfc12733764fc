//! Route guard middleware.
//!
//! Resolves the session once per request from the session cookie or a
//! bearer token, stores it in the request extensions and applies the
//! [`RouteGuard`](clickaulas_auth::guard::RouteGuard) decision.

use axum::extract::{Request, State};
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::CookieJar;
use axum_extra::headers::authorization::Bearer;
use axum_extra::headers::{Authorization, HeaderMapExt};
use tracing::debug;

use clickaulas_auth::guard::{GuardDecision, SessionState};
use clickaulas_core::error::AppError;

use crate::error::ApiError;
use crate::state::AppState;

/// Applies the route guard to every request.
pub async fn session_guard(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let session = resolve_session(&state, request.headers());
    let path = request.uri().path().to_string();

    match state.guard.decide(&path, &session) {
        GuardDecision::Allow => {
            request.extensions_mut().insert(session);
            next.run(request).await
        }
        GuardDecision::Deny if is_api_path(&path) => {
            ApiError(AppError::authentication("Authentication required")).into_response()
        }
        GuardDecision::Deny => Redirect::to(state.guard.login_path()).into_response(),
        GuardDecision::Redirect(target) => Redirect::to(&target).into_response(),
    }
}

/// Session carried by the request, if one of its tokens is valid.
///
/// The session cookie is tried first, then `Authorization: Bearer`.
pub fn resolve_session(state: &AppState, headers: &HeaderMap) -> SessionState {
    for token in session_tokens(&state.config.auth.cookie_name, headers) {
        match state.jwt_decoder.resolve(&token) {
            Ok(session) => return SessionState::Authenticated(session),
            Err(e) => debug!(error = %e.message, "Ignoring invalid session token"),
        }
    }
    SessionState::Anonymous
}

/// Candidate tokens in the order they are tried.
fn session_tokens(cookie_name: &str, headers: &HeaderMap) -> Vec<String> {
    let jar = CookieJar::from_headers(headers);
    let cookie = jar
        .get(cookie_name)
        .map(|cookie| cookie.value().to_string())
        .filter(|value| !value.is_empty());
    let bearer = headers
        .typed_get::<Authorization<Bearer>>()
        .map(|auth| auth.token().to_string());

    cookie.into_iter().chain(bearer).collect()
}

fn is_api_path(path: &str) -> bool {
    path == "/api" || path.starts_with("/api/")
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;
    use axum::http::header::{AUTHORIZATION, COOKIE};

    use super::*;

    #[test]
    fn test_cookie_tried_before_bearer() {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static("theme=dark; sid=from-cookie"));
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer from-header"));
        assert_eq!(session_tokens("sid", &headers), ["from-cookie", "from-header"]);
    }

    #[test]
    fn test_empty_cookie_is_skipped() {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static("sid="));
        assert!(session_tokens("sid", &headers).is_empty());
    }

    #[test]
    fn test_bearer_fallback() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer abc.def.ghi"));
        assert_eq!(session_tokens("sid", &headers), ["abc.def.ghi"]);
        assert!(session_tokens("sid", &HeaderMap::new()).is_empty());
    }

    #[test]
    fn test_api_paths() {
        assert!(is_api_path("/api/admin/rooms"));
        assert!(!is_api_path("/admin"));
        assert!(!is_api_path("/apiary"));
    }
}
