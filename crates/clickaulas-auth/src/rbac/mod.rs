//! Role-based capabilities.

pub mod capability;
pub mod policies;

pub use capability::{Capability, CapabilitySet};
pub use policies::RbacPolicies;
