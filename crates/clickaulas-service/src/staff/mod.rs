//! Coordinator and teacher management.

pub mod input;
pub mod service;

pub use input::StaffInput;
pub use service::{StaffService, StaffUpsert};
