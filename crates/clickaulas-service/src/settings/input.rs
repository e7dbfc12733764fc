//! Form input for institutions and rooms.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use clickaulas_core::error::AppError;
use clickaulas_entity::{NewInstitution, NewRoom};

use crate::validation::{Violations, non_blank};

/// Institution create-or-update payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct InstitutionInput {
    /// Record to update.
    pub id: Option<Uuid>,
    #[validate(length(min = 2, message = "Name must have at least 2 characters"))]
    pub name: String,
    pub address: Option<String>,
}

impl InstitutionInput {
    /// Validates and converts into store fields.
    pub fn into_record(self) -> Result<NewInstitution, AppError> {
        Violations::check(&self).into_result()?;
        Ok(NewInstitution {
            name: self.name.trim().to_string(),
            address: non_blank(self.address),
        })
    }
}

/// Room create-or-update payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct RoomInput {
    /// Record to update.
    pub id: Option<Uuid>,
    #[validate(length(min = 1, message = "Room name is required"))]
    pub name: String,
    #[validate(range(min = 0, message = "Capacity cannot be negative"))]
    pub capacity: Option<i32>,
    pub institution_id: Option<Uuid>,
}

impl RoomInput {
    /// Validates and converts into store fields.
    pub fn into_record(self) -> Result<NewRoom, AppError> {
        let mut violations = Violations::check(&self);
        if !violations.has("name") && self.name.trim().is_empty() {
            violations.add("name", "Room name is required");
        }
        violations.into_result()?;
        Ok(NewRoom {
            name: self.name.trim().to_string(),
            capacity: self.capacity,
            institution_id: self.institution_id,
        })
    }
}
