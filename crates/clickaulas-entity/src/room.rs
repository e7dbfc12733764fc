//! Room entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A bookable classroom.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    /// Unique identifier.
    pub id: Uuid,
    /// Room label, e.g. "101".
    pub name: String,
    /// Seating capacity.
    pub capacity: Option<i32>,
    /// Institution the room is located in.
    pub institution_id: Option<Uuid>,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
    /// When the record was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to insert or update a room.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewRoom {
    /// Room label.
    pub name: String,
    /// Seating capacity.
    pub capacity: Option<i32>,
    /// Institution reference.
    pub institution_id: Option<Uuid>,
}
