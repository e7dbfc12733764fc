//! Identity provider: credential and federated sign-in.

pub mod federation;
pub mod provider;

pub use federation::{FederatedProfile, FederationVerifier};
pub use provider::IdentityProvider;
