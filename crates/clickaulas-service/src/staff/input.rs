//! Form input for coordinators and teachers.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use clickaulas_core::error::AppError;
use clickaulas_entity::UpdateStaff;

use crate::validation::{Violations, non_blank};

/// Create-or-update payload. A present `id` means update.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct StaffInput {
    /// Record to update.
    pub id: Option<Uuid>,
    /// Display name.
    #[validate(length(min = 2, message = "Name must have at least 2 characters"))]
    pub name: String,
    /// Login email.
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    /// Institution the person works at.
    #[validate(length(min = 1, message = "Institution is required"))]
    pub institution_id: String,
    /// Department.
    #[validate(length(min = 1, message = "Department is required"))]
    pub department: String,
    /// Contact phone.
    pub phone: Option<String>,
    /// Hiring date, `YYYY-MM-DD`.
    pub hiring_date: Option<String>,
    /// Hourly rate (teachers only).
    #[validate(range(min = 0.0, message = "Hourly rate cannot be negative"))]
    pub hourly_rate: Option<f64>,
}

impl StaffInput {
    /// Validates the payload and converts it into profile fields.
    pub fn into_profile(self, with_rate: bool) -> Result<UpdateStaff, AppError> {
        let mut violations = Violations::check(&self);

        let institution_id = match Uuid::parse_str(self.institution_id.trim()) {
            Ok(id) => Some(id),
            Err(_) => {
                if !violations.has("institutionId") {
                    violations.add("institutionId", "Invalid institution");
                }
                None
            }
        };

        let hiring_date = match non_blank(self.hiring_date) {
            Some(raw) => match NaiveDate::parse_from_str(&raw, "%Y-%m-%d") {
                Ok(date) => Some(date),
                Err(_) => {
                    violations.add("hiringDate", "Hiring date must be YYYY-MM-DD");
                    None
                }
            },
            None => None,
        };

        violations.into_result()?;

        Ok(UpdateStaff {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            institution_id,
            department: non_blank(Some(self.department)),
            phone: non_blank(self.phone),
            hourly_rate: if with_rate { self.hourly_rate } else { None },
            hiring_date,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> StaffInput {
        StaffInput {
            id: None,
            name: "Fabio".to_string(),
            email: "fabio@school.org".to_string(),
            institution_id: Uuid::new_v4().to_string(),
            department: "Science".to_string(),
            phone: Some(" ".to_string()),
            hiring_date: Some("2024-02-01".to_string()),
            hourly_rate: Some(42.5),
        }
    }

    #[test]
    fn test_valid_input_converts() {
        let profile = valid().into_profile(true).unwrap();
        assert_eq!(profile.phone, None);
        assert_eq!(profile.hourly_rate, Some(42.5));
        assert_eq!(
            profile.hiring_date,
            NaiveDate::from_ymd_opt(2024, 2, 1)
        );
    }

    #[test]
    fn test_rate_dropped_for_coordinators() {
        let profile = valid().into_profile(false).unwrap();
        assert_eq!(profile.hourly_rate, None);
    }

    #[test]
    fn test_missing_fields_are_itemized() {
        let err = StaffInput::default().into_profile(true).unwrap_err();
        let fields = err.fields.unwrap();
        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("institutionId"));
        assert!(fields.contains_key("department"));
        assert_eq!(fields["institutionId"].len(), 1);
    }

    #[test]
    fn test_negative_rate_and_bad_date() {
        let mut input = valid();
        input.hourly_rate = Some(-1.0);
        input.hiring_date = Some("01/02/2024".to_string());
        let fields = input.into_profile(true).unwrap_err().fields.unwrap();
        assert!(fields.contains_key("hourlyRate"));
        assert!(fields.contains_key("hiringDate"));
    }
}
