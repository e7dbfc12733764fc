//! Class schedule submission and its parsing.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use clickaulas_core::error::AppError;
use clickaulas_entity::TimeWindow;

use crate::validation::Violations;

/// Raw schedule form as submitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct ScheduleInput {
    #[validate(length(min = 1, message = "Class is required"))]
    pub class_name: String,
    #[validate(length(min = 1, message = "Room is required"))]
    pub room_id: String,
    #[validate(length(min = 1, message = "Subject is required"))]
    pub subject: String,
    #[validate(length(min = 1, message = "Teacher is required"))]
    pub teacher_id: String,
    /// `YYYY-MM-DD`.
    #[validate(length(min = 1, message = "Date is required"))]
    pub date: String,
    /// `HH:MM` or `HH:MM:SS`.
    #[validate(length(min = 1, message = "Start time is required"))]
    pub start_time: String,
    /// `HH:MM` or `HH:MM:SS`.
    #[validate(length(min = 1, message = "End time is required"))]
    pub end_time: String,
}

/// A submission whose fields are present and well-typed.
///
/// The end may still precede the start; ordering is checked separately.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedSchedule {
    pub class_name: String,
    pub subject: String,
    pub room_id: Uuid,
    pub teacher_id: Uuid,
    pub date: NaiveDate,
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl ParsedSchedule {
    /// The UTC window on `date`, or `None` when the end is not after the start.
    pub fn window(&self) -> Option<TimeWindow> {
        TimeWindow::new(
            self.date.and_time(self.start).and_utc(),
            self.date.and_time(self.end).and_utc(),
        )
    }
}

impl ScheduleInput {
    /// Checks required fields and parses ids, date and times.
    pub fn parse(self) -> Result<ParsedSchedule, AppError> {
        let mut violations = Violations::check(&self);

        let room_id = parse_id(&mut violations, "roomId", &self.room_id, "Invalid room");
        let teacher_id =
            parse_id(&mut violations, "teacherId", &self.teacher_id, "Invalid teacher");

        let date = if violations.has("date") {
            None
        } else {
            let parsed = NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d").ok();
            if parsed.is_none() {
                violations.add("date", "Date must be YYYY-MM-DD");
            }
            parsed
        };

        let start = parse_time(&mut violations, "startTime", &self.start_time);
        let end = parse_time(&mut violations, "endTime", &self.end_time);
        let class_name = self.class_name.trim().to_string();
        let subject = self.subject.trim().to_string();
        if class_name.is_empty() && !violations.has("className") {
            violations.add("className", "Class is required");
        }
        if subject.is_empty() && !violations.has("subject") {
            violations.add("subject", "Subject is required");
        }

        violations.into_result()?;

        match (room_id, teacher_id, date, start, end) {
            (Some(room_id), Some(teacher_id), Some(date), Some(start), Some(end)) => {
                Ok(ParsedSchedule {
                    class_name,
                    subject,
                    room_id,
                    teacher_id,
                    date,
                    start,
                    end,
                })
            }
            _ => Err(AppError::validation("Invalid schedule")),
        }
    }
}

fn parse_id(violations: &mut Violations, field: &str, raw: &str, message: &str) -> Option<Uuid> {
    if violations.has(field) {
        return None;
    }
    let parsed = Uuid::parse_str(raw.trim()).ok();
    if parsed.is_none() {
        violations.add(field, message);
    }
    parsed
}

fn parse_time(violations: &mut Violations, field: &str, raw: &str) -> Option<NaiveTime> {
    if violations.has(field) {
        return None;
    }
    let raw = raw.trim();
    let parsed = NaiveTime::parse_from_str(raw, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
        .ok();
    if parsed.is_none() {
        violations.add(field, "Time must be HH:MM");
    }
    parsed
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    fn input(start: &str, end: &str) -> ScheduleInput {
        ScheduleInput {
            class_name: "7A".to_string(),
            room_id: Uuid::new_v4().to_string(),
            subject: "History".to_string(),
            teacher_id: Uuid::new_v4().to_string(),
            date: "2025-03-10".to_string(),
            start_time: start.to_string(),
            end_time: end.to_string(),
        }
    }

    #[test]
    fn test_window_is_utc_on_date() {
        let parsed = input("09:00", "10:30:15").parse().unwrap();
        let window = parsed.window().unwrap();
        assert_eq!(window.start, Utc.with_ymd_and_hms(2025, 3, 10, 9, 0, 0).unwrap());
        assert_eq!(window.end, Utc.with_ymd_and_hms(2025, 3, 10, 10, 30, 15).unwrap());
    }

    #[test]
    fn test_reversed_times_parse_but_have_no_window() {
        let parsed = input("10:00", "09:00").parse().unwrap();
        assert!(parsed.window().is_none());
        assert!(input("10:00", "10:00").parse().unwrap().window().is_none());
    }

    #[test]
    fn test_missing_and_malformed_fields() {
        let err = ScheduleInput::default().parse().unwrap_err();
        let fields = err.fields.unwrap();
        for key in ["className", "roomId", "subject", "teacherId", "date", "startTime", "endTime"] {
            assert_eq!(fields[key].len(), 1, "{key}");
        }

        let mut bad = input("9h", "10:00");
        bad.date = "10/03/2025".to_string();
        bad.room_id = "room-101".to_string();
        let fields = bad.parse().unwrap_err().fields.unwrap();
        assert!(fields.contains_key("startTime"));
        assert!(fields.contains_key("date"));
        assert!(fields.contains_key("roomId"));
        assert!(!fields.contains_key("endTime"));
    }
}
