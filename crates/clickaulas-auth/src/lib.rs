//! # clickaulas-auth
//!
//! Authentication and authorization for ClickAulas.
//!
//! ## Modules
//!
//! - `jwt`: session token issuance and validation
//! - `password`: Argon2id hashing and one-time credential generation
//! - `rbac`: capability sets resolved from a role
//! - `guard`: route guard deciding allow / deny / redirect per path
//! - `identity`: credential and federated sign-in against the user store

pub mod guard;
pub mod identity;
pub mod jwt;
pub mod password;
pub mod rbac;

pub use guard::{GuardDecision, RouteGuard, SessionState};
pub use identity::{FederatedProfile, IdentityProvider};
pub use jwt::{Claims, JwtDecoder, JwtEncoder, Session};
pub use password::{CredentialGenerator, PasswordHasher};
pub use rbac::{Capability, CapabilitySet, RbacPolicies};
