//! Class schedules and the room-booking time window.

pub mod model;
pub mod window;

pub use model::{ClassSchedule, NewClassSchedule, ScheduleDetail};
pub use window::TimeWindow;
