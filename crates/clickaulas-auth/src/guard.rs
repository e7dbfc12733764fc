//! Route guard.
//!
//! A pure decision over `(path, session state)`. Protected prefixes require
//! an authenticated session; login-adjacent paths send authenticated users
//! to the protected area; everything else passes.

use clickaulas_core::config::GuardConfig;

use crate::jwt::Session;

/// Session state of the current request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// No valid session token was presented.
    Anonymous,
    /// A valid session token was presented.
    Authenticated(Session),
}

impl SessionState {
    /// Whether a session is present.
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    /// The session, if any.
    pub fn session(&self) -> Option<&Session> {
        match self {
            Self::Authenticated(session) => Some(session),
            Self::Anonymous => None,
        }
    }
}

/// Outcome of a guard check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// Let the request through.
    Allow,
    /// Reject: the path needs a session.
    Deny,
    /// Send the client elsewhere.
    Redirect(String),
}

/// Decides access per request path.
#[derive(Debug, Clone)]
pub struct RouteGuard {
    protected_prefixes: Vec<String>,
    login_paths: Vec<String>,
    login_path: String,
    home_path: String,
}

impl RouteGuard {
    /// Creates a guard from configuration.
    pub fn new(config: &GuardConfig) -> Self {
        Self {
            protected_prefixes: config.protected_prefixes.clone(),
            login_paths: config.login_paths.clone(),
            login_path: config.login_path.clone(),
            home_path: config.home_path.clone(),
        }
    }

    /// Where denied page requests are sent.
    pub fn login_path(&self) -> &str {
        &self.login_path
    }

    /// Landing page of the protected area.
    pub fn home_path(&self) -> &str {
        &self.home_path
    }

    /// Whether `path` falls under a protected prefix (segment-aligned).
    pub fn is_protected(&self, path: &str) -> bool {
        self.protected_prefixes.iter().any(|prefix| {
            path.strip_prefix(prefix.as_str())
                .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
        })
    }

    /// Decide what to do with a request for `path`.
    pub fn decide(&self, path: &str, state: &SessionState) -> GuardDecision {
        if self.is_protected(path) {
            return if state.is_authenticated() {
                GuardDecision::Allow
            } else {
                GuardDecision::Deny
            };
        }

        if state.is_authenticated() && self.login_paths.iter().any(|p| p == path) {
            return GuardDecision::Redirect(self.home_path.clone());
        }

        GuardDecision::Allow
    }
}
