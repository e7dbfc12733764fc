//! Class scheduling.

pub mod input;
pub mod service;

pub use input::{ParsedSchedule, ScheduleInput};
pub use service::{ScheduleOptions, ScheduleService};
