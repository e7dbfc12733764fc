//! # clickaulas-entity
//!
//! Row models and value types shared by the store, service and API layers.

pub mod institution;
pub mod notification;
pub mod room;
pub mod schedule;
pub mod user;

pub use institution::{Institution, NewInstitution};
pub use notification::{NewNotification, Notification, NotificationDetail};
pub use room::{NewRoom, Room};
pub use schedule::{ClassSchedule, NewClassSchedule, ScheduleDetail, TimeWindow};
pub use user::{CreateUser, StaffMember, UpdateStaff, User, UserRole};
