//! Booking time windows and the room conflict rule.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A closed booking interval `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    /// Start instant.
    pub start: DateTime<Utc>,
    /// End instant.
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    /// Build a window, returning `None` unless `end` is strictly after `start`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Option<Self> {
        (end > start).then_some(Self { start, end })
    }

    /// Whether `instant` lies inside this window, endpoints included.
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant <= self.end
    }

    /// Whether an existing booking `self` conflicts with `candidate`.
    ///
    /// A conflict means the candidate's start or end falls inside this
    /// window. Endpoints are inclusive, so back-to-back bookings sharing a
    /// boundary instant conflict. A candidate that strictly contains this
    /// window is not reported.
    pub fn conflicts_with(&self, candidate: &TimeWindow) -> bool {
        self.contains(candidate.start) || self.contains(candidate.end)
    }
}
