//! Request DTOs: listing queries and the federated callback body.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use clickaulas_database::{NotificationFilter, ScheduleFilter, StaffFilter};

/// `?q=&institutionId=` on coordinator and teacher listings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffQuery {
    pub q: Option<String>,
    pub institution_id: Option<Uuid>,
}

impl From<StaffQuery> for StaffFilter {
    fn from(query: StaffQuery) -> Self {
        Self {
            query: query.q,
            institution_id: query.institution_id,
        }
    }
}

/// `?q=&className=` on schedule listings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleQuery {
    pub q: Option<String>,
    pub class_name: Option<String>,
}

impl From<ScheduleQuery> for ScheduleFilter {
    fn from(query: ScheduleQuery) -> Self {
        Self {
            query: query.q,
            class_name: query.class_name,
        }
    }
}

/// `?q=` on notification listings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NotificationQuery {
    pub q: Option<String>,
}

impl From<NotificationQuery> for NotificationFilter {
    fn from(query: NotificationQuery) -> Self {
        Self { query: query.q }
    }
}

/// Federated sign-in callback body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FederatedRequest {
    /// Signed assertion from the identity broker.
    pub assertion: String,
}
