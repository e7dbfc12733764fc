//! Turning input validation failures into itemized field errors.

use validator::{Validate, ValidationErrors};

use clickaulas_core::error::{AppError, FieldErrors};

/// Accumulates field errors for one input.
#[derive(Debug, Default)]
pub struct Violations(FieldErrors);

impl Violations {
    /// Runs the derived rules of `input` and collects their failures.
    pub fn check<T: Validate>(input: &T) -> Self {
        match input.validate() {
            Ok(()) => Self::default(),
            Err(errors) => Self::from(errors),
        }
    }

    /// Records a failure for `field`.
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    /// Whether `field` already failed.
    pub fn has(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// `Ok(())` when nothing failed, otherwise a validation error.
    pub fn into_result(self) -> Result<(), AppError> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(AppError::invalid_fields(self.0))
        }
    }
}

impl From<ValidationErrors> for Violations {
    fn from(errors: ValidationErrors) -> Self {
        let mut violations = Self::default();
        for (field, errs) in errors.field_errors() {
            let key = camel_case(&field);
            for err in errs.iter() {
                let message = err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid value ({})", err.code));
                violations.add(&key, message);
            }
        }
        violations
    }
}

/// Validates `input` and fails with its field errors.
pub fn validate_input<T: Validate>(input: &T) -> Result<(), AppError> {
    Violations::check(input).into_result()
}

/// Trimmed value, or `None` when blank.
pub fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// `snake_case` field name as the client spells it.
fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Validate)]
    struct Sample {
        #[validate(length(min = 2, message = "Name is too short"))]
        full_name: String,
        #[validate(email)]
        email: String,
    }

    #[test]
    fn test_camel_case() {
        assert_eq!(camel_case("class_name"), "className");
        assert_eq!(camel_case("institution_id"), "institutionId");
        assert_eq!(camel_case("name"), "name");
    }

    #[test]
    fn test_violations_are_itemized_per_field() {
        let sample = Sample {
            full_name: "A".to_string(),
            email: "not-an-email".to_string(),
        };
        let err = validate_input(&sample).unwrap_err();
        let fields = err.fields.unwrap();
        assert_eq!(fields["fullName"], vec!["Name is too short".to_string()]);
        assert!(fields["email"][0].contains("email"));
    }

    #[test]
    fn test_added_violations_merge() {
        let mut violations = Violations::default();
        assert!(!violations.has("date"));
        violations.add("date", "Invalid date");
        assert!(violations.has("date"));
        assert!(violations.into_result().is_err());
        assert!(Violations::default().into_result().is_ok());
    }

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank(Some("  ".to_string())), None);
        assert_eq!(non_blank(Some(" 555 ".to_string())), Some("555".to_string()));
    }
}
