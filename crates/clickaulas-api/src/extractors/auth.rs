//! `AuthUser` extractor: turns the session resolved by the guard into a request context.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use clickaulas_auth::guard::SessionState;
use clickaulas_core::error::AppError;
use clickaulas_service::RequestContext;

use crate::error::ApiError;
use crate::state::AppState;

/// Extracted authenticated user context available in handlers.
#[derive(Debug, Clone)]
pub struct AuthUser(pub RequestContext);

impl AuthUser {
    /// Returns the inner `RequestContext`.
    pub fn context(&self) -> &RequestContext {
        &self.0
    }
}

impl std::ops::Deref for AuthUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // The guard middleware stores the session it resolved for this request.
        let session = parts
            .extensions
            .get::<SessionState>()
            .and_then(SessionState::session)
            .ok_or_else(|| AppError::authentication("Authentication required"))?;

        Ok(AuthUser(RequestContext::resolve(session, &state.policies)))
    }
}
