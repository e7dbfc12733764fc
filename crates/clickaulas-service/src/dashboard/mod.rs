//! Dashboard summary.

pub mod service;

pub use service::{Dashboard, DashboardService, DashboardStats, WeekdayCount};
