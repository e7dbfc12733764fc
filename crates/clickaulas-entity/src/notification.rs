//! Notification entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A message addressed to a single user.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    /// Unique identifier.
    pub id: Uuid,
    /// Recipient.
    pub user_id: Uuid,
    /// Free-form category, e.g. "REMINDER".
    #[serde(rename = "type")]
    pub notification_type: String,
    /// Message body.
    pub message: String,
    /// Whether the recipient has read it.
    pub is_read: bool,
    /// Related class schedule, cleared when that schedule is deleted.
    pub class_schedule_id: Option<Uuid>,
    /// When the notification was created.
    pub created_at: DateTime<Utc>,
}

/// Data required to insert a notification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewNotification {
    /// Recipient.
    pub user_id: Uuid,
    /// Category.
    pub notification_type: String,
    /// Message body.
    pub message: String,
    /// Initial read flag.
    pub is_read: bool,
    /// Related class schedule.
    pub class_schedule_id: Option<Uuid>,
}

/// A notification joined with its recipient.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct NotificationDetail {
    /// The notification record.
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub notification: Notification,
    /// Recipient display name.
    pub user_name: String,
    /// Recipient email.
    pub user_email: String,
}
