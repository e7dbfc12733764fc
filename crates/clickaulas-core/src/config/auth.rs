//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// Session token, credential and identity-provider configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for session JWT signing (HMAC-SHA256).
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    /// Session lifetime in hours.
    #[serde(default = "default_session_ttl")]
    pub session_ttl_hours: u64,
    /// Name of the session cookie.
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    /// Whether the session cookie is marked `Secure`.
    #[serde(default)]
    pub cookie_secure: bool,
    /// Email that is granted the ADMIN role at first sign-in.
    #[serde(default)]
    pub admin_email: Option<String>,
    /// Length of generated one-time credentials.
    #[serde(default = "default_credential_length")]
    pub credential_length: usize,
    /// Minimum password length accepted at registration.
    #[serde(default = "default_password_min")]
    pub password_min_length: usize,
    /// Federated sign-in settings.
    #[serde(default)]
    pub federation: FederationConfig,
}

impl AuthConfig {
    /// Whether `email` is the configured administrator identity.
    pub fn is_admin_email(&self, email: &str) -> bool {
        self.admin_email
            .as_deref()
            .is_some_and(|admin| admin.eq_ignore_ascii_case(email.trim()))
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: default_jwt_secret(),
            session_ttl_hours: default_session_ttl(),
            cookie_name: default_cookie_name(),
            cookie_secure: false,
            admin_email: None,
            credential_length: default_credential_length(),
            password_min_length: default_password_min(),
            federation: FederationConfig::default(),
        }
    }
}

/// Federated login callback configuration.
///
/// The upstream identity broker signs an HS256 assertion with
/// `shared_secret`; the callback only accepts assertions from `issuer`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FederationConfig {
    /// Whether the federated callback is accepted at all.
    #[serde(default)]
    pub enabled: bool,
    /// Secret shared with the identity broker.
    #[serde(default)]
    pub shared_secret: String,
    /// Expected `iss` claim.
    #[serde(default)]
    pub issuer: String,
}

fn default_jwt_secret() -> String {
    "CHANGE_ME_IN_PRODUCTION".to_string()
}

fn default_session_ttl() -> u64 {
    24 * 30
}

fn default_cookie_name() -> String {
    "clickaulas_session".to_string()
}

fn default_credential_length() -> usize {
    8
}

fn default_password_min() -> usize {
    6
}
