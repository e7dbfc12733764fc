//! JWT claims carried by the session token.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use clickaulas_entity::UserRole;

/// JWT claims payload embedded in every session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user ID.
    pub sub: Uuid,
    /// Role at sign-in. Fixed for the token lifetime.
    pub role: UserRole,
    /// Display name for convenience.
    pub name: String,
    /// Email for convenience.
    pub email: String,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
    /// Unique token ID.
    pub jti: Uuid,
}

impl Claims {
    /// Returns the expiration as a `DateTime<Utc>`.
    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp, 0).unwrap_or_else(Utc::now)
    }
}

/// An authenticated session, resolved once per request from its token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Signed-in user.
    pub user_id: Uuid,
    /// Role claim.
    pub role: UserRole,
    /// Display name.
    pub name: String,
    /// Email.
    pub email: String,
    /// When the token stops being accepted.
    pub expires_at: DateTime<Utc>,
}

impl From<Claims> for Session {
    fn from(claims: Claims) -> Self {
        let expires_at = claims.expires_at();
        Self {
            user_id: claims.sub,
            role: claims.role,
            name: claims.name,
            email: claims.email,
            expires_at,
        }
    }
}
