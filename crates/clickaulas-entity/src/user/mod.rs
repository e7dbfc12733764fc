//! User entity, role and staff listing views.

pub mod model;
pub mod role;

pub use model::{CreateUser, StaffMember, UpdateStaff, User};
pub use role::UserRole;
