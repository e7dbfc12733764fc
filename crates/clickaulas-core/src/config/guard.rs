//! Route guard configuration.

use serde::{Deserialize, Serialize};

/// Which paths require a session and where to send users.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuardConfig {
    /// Path prefixes that are only reachable with a session.
    #[serde(default = "default_protected")]
    pub protected_prefixes: Vec<String>,
    /// Login-adjacent paths that redirect authenticated users to `home_path`.
    #[serde(default = "default_login_paths")]
    pub login_paths: Vec<String>,
    /// Where anonymous visitors of protected pages are sent.
    #[serde(default = "default_login_path")]
    pub login_path: String,
    /// Landing page of the protected area.
    #[serde(default = "default_home_path")]
    pub home_path: String,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            protected_prefixes: default_protected(),
            login_paths: default_login_paths(),
            login_path: default_login_path(),
            home_path: default_home_path(),
        }
    }
}

fn default_protected() -> Vec<String> {
    vec!["/api/admin".to_string(), "/admin".to_string()]
}

fn default_login_paths() -> Vec<String> {
    vec!["/".to_string(), "/login".to_string(), "/register".to_string()]
}

fn default_login_path() -> String {
    "/login".to_string()
}

fn default_home_path() -> String {
    "/admin".to_string()
}
