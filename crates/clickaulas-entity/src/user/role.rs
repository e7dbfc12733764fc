//! User role enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Roles a user can hold. Assigned once at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum UserRole {
    /// School administrator. Manages coordinators and settings.
    Admin,
    /// Pedagogical coordinator. Manages teachers.
    Coordinator,
    /// Teacher. Books rooms and sends notifications.
    Teacher,
}

impl UserRole {
    /// All roles, most privileged first.
    pub const ALL: [UserRole; 3] = [Self::Admin, Self::Coordinator, Self::Teacher];

    /// Return the role as its canonical upper-case string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::Coordinator => "COORDINATOR",
            Self::Teacher => "TEACHER",
        }
    }

    /// Check if this role is an admin.
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = clickaulas_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "ADMIN" => Ok(Self::Admin),
            "COORDINATOR" => Ok(Self::Coordinator),
            "TEACHER" => Ok(Self::Teacher),
            _ => Err(clickaulas_core::AppError::validation(format!(
                "Invalid user role: '{s}'. Expected one of: ADMIN, COORDINATOR, TEACHER"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str() {
        assert_eq!("admin".parse::<UserRole>().unwrap(), UserRole::Admin);
        assert_eq!("Coordinator".parse::<UserRole>().unwrap(), UserRole::Coordinator);
        assert_eq!("TEACHER".parse::<UserRole>().unwrap(), UserRole::Teacher);
        assert!("viewer".parse::<UserRole>().is_err());
    }

    #[test]
    fn test_serde_uses_upper_case() {
        let json = serde_json::to_string(&UserRole::Coordinator).unwrap();
        assert_eq!(json, "\"COORDINATOR\"");
    }
}
