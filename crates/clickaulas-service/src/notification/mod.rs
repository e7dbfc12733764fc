//! Notifications.

pub mod service;

pub use service::{NotificationInput, NotificationOptions, NotificationService};
