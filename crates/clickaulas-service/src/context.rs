//! Request context carrying the session and its resolved capabilities.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use clickaulas_auth::jwt::Session;
use clickaulas_auth::rbac::{Capability, CapabilitySet, RbacPolicies};
use clickaulas_core::error::AppError;
use clickaulas_entity::UserRole;

/// Context for the current authenticated request.
///
/// Built once per request from the session token and passed by reference
/// into service methods. Never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestContext {
    /// The authenticated user's ID.
    pub user_id: Uuid,
    /// The user's role at the time the session was issued.
    pub role: UserRole,
    /// Display name from the session.
    pub name: String,
    /// Email from the session.
    pub email: String,
    /// Operations this request may perform.
    pub capabilities: CapabilitySet,
    /// When the session expires.
    pub expires_at: DateTime<Utc>,
}

impl RequestContext {
    /// Resolves the context of `session` under `policies`.
    pub fn resolve(session: &Session, policies: &RbacPolicies) -> Self {
        Self {
            user_id: session.user_id,
            role: session.role,
            name: session.name.clone(),
            email: session.email.clone(),
            capabilities: policies.capabilities_for(session.role),
            expires_at: session.expires_at,
        }
    }

    /// Fails with an authorization error unless `capability` is granted.
    pub fn require(&self, capability: Capability) -> Result<(), AppError> {
        self.capabilities.require(capability)
    }

    /// Whether `capability` is granted.
    pub fn can(&self, capability: Capability) -> bool {
        self.capabilities.contains(capability)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// A context for `role` with a fresh user id.
    pub fn context(role: UserRole) -> RequestContext {
        context_for(Uuid::new_v4(), role)
    }

    /// A context for an existing user.
    pub fn context_for(user_id: Uuid, role: UserRole) -> RequestContext {
        let session = Session {
            user_id,
            role,
            name: "Tester".to_string(),
            email: "tester@school.org".to_string(),
            expires_at: Utc::now() + chrono::Duration::hours(1),
        };
        RequestContext::resolve(&session, &RbacPolicies::new())
    }
}
