//! # clickaulas-service
//!
//! Business logic service layer for ClickAulas. Each service validates its
//! typed input, checks the caller's capabilities and talks to the store
//! traits.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references.

pub mod auth;
pub mod context;
pub mod dashboard;
pub mod navigation;
pub mod notification;
pub mod schedule;
pub mod settings;
pub mod staff;
pub mod validation;

pub use auth::{AuthService, LoginInput, RegisterInput, SignIn};
pub use context::RequestContext;
pub use dashboard::{Dashboard, DashboardService};
pub use navigation::{NavItem, sidebar};
pub use notification::{NotificationInput, NotificationOptions, NotificationService};
pub use schedule::{ScheduleInput, ScheduleOptions, ScheduleService};
pub use settings::{InstitutionInput, RoomInput, SettingsService};
pub use staff::{StaffInput, StaffService, StaffUpsert};
