//! Institution entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A school or campus that staff and rooms belong to.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Institution {
    /// Unique identifier.
    pub id: Uuid,
    /// Institution name.
    pub name: String,
    /// Postal address.
    pub address: Option<String>,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
    /// When the record was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to insert or update an institution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewInstitution {
    /// Institution name.
    pub name: String,
    /// Postal address.
    pub address: Option<String>,
}
