//! Typed path parameter helpers.

use uuid::Uuid;

use clickaulas_core::error::AppError;

/// Parses a record id from a path segment.
pub fn parse_id(s: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(s).map_err(|_| AppError::not_found(format!("No record with id '{s}'")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id() {
        let id = Uuid::new_v4();
        assert_eq!(parse_id(&id.to_string()).unwrap(), id);
        assert!(parse_id("room-101").is_err());
    }
}
