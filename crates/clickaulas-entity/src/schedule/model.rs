//! Class schedule entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::window::TimeWindow;

/// A class booked into a room for a time window.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ClassSchedule {
    /// Unique identifier.
    pub id: Uuid,
    /// Class label, e.g. "3A".
    pub class_name: String,
    /// Subject taught.
    pub subject: String,
    /// Booked room.
    pub room_id: Uuid,
    /// Teaching user.
    pub teacher_id: Uuid,
    /// Start of the booking.
    pub start_time: DateTime<Utc>,
    /// End of the booking, strictly after `start_time`.
    pub end_time: DateTime<Utc>,
    /// Set at creation when another booking of the room overlapped.
    /// Never recomputed afterwards.
    pub has_conflict: bool,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
    /// When the record was last updated.
    pub updated_at: DateTime<Utc>,
}

impl ClassSchedule {
    /// The booked time window.
    pub fn window(&self) -> TimeWindow {
        TimeWindow {
            start: self.start_time,
            end: self.end_time,
        }
    }
}

/// Data required to insert a class schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewClassSchedule {
    /// Class label.
    pub class_name: String,
    /// Subject taught.
    pub subject: String,
    /// Booked room.
    pub room_id: Uuid,
    /// Teaching user.
    pub teacher_id: Uuid,
    /// Booked window.
    pub window: TimeWindow,
    /// Conflict flag computed before insertion.
    pub has_conflict: bool,
}

/// A schedule joined with its room and teacher names.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleDetail {
    /// The schedule record.
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub schedule: ClassSchedule,
    /// Room label.
    pub room_name: String,
    /// Teacher display name.
    pub teacher_name: String,
}
