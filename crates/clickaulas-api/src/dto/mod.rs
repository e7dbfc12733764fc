//! Request and response DTOs.

pub mod request;
pub mod response;

pub use request::{FederatedRequest, NotificationQuery, ScheduleQuery, StaffQuery};
pub use response::{ApiResponse, HealthResponse, MessageResponse};
