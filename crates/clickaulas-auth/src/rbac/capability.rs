//! Capabilities and the per-request capability set.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use clickaulas_core::error::AppError;

/// An operation a role may be allowed to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// View the dashboard.
    DashboardRead,
    /// Create, edit and delete coordinators.
    CoordinatorManage,
    /// Create, edit and delete teachers.
    TeacherManage,
    /// Create, edit and delete institutions and rooms.
    SettingsManage,
    /// View class schedules.
    ScheduleRead,
    /// Book class schedules.
    ScheduleCreate,
    /// Delete class schedules.
    ScheduleManage,
    /// View notifications.
    NotificationRead,
    /// Send notifications.
    NotificationCreate,
}

impl Capability {
    /// Human-readable label used in access-denied messages.
    pub fn label(&self) -> &'static str {
        match self {
            Self::DashboardRead => "view the dashboard",
            Self::CoordinatorManage => "manage coordinators",
            Self::TeacherManage => "manage teachers",
            Self::SettingsManage => "manage institutions and rooms",
            Self::ScheduleRead => "view class schedules",
            Self::ScheduleCreate => "create class schedules",
            Self::ScheduleManage => "delete class schedules",
            Self::NotificationRead => "view notifications",
            Self::NotificationCreate => "send notifications",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// The explicit set of operations allowed for one request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CapabilitySet(BTreeSet<Capability>);

impl CapabilitySet {
    /// An empty set.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether `capability` is granted.
    pub fn contains(&self, capability: Capability) -> bool {
        self.0.contains(&capability)
    }

    /// `Ok(())` if granted, otherwise an authorization error.
    pub fn require(&self, capability: Capability) -> Result<(), AppError> {
        if self.contains(capability) {
            Ok(())
        } else {
            Err(AppError::authorization(format!(
                "Access denied: you are not allowed to {capability}"
            )))
        }
    }

    /// Iterate granted capabilities in a stable order.
    pub fn iter(&self) -> impl Iterator<Item = Capability> + '_ {
        self.0.iter().copied()
    }

    /// Number of granted capabilities.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether nothing is granted.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<Capability> for CapabilitySet {
    fn from_iter<I: IntoIterator<Item = Capability>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clickaulas_core::error::ErrorKind;

    #[test]
    fn test_require_denies_missing_capability() {
        let set: CapabilitySet = [Capability::ScheduleRead].into_iter().collect();
        assert!(set.require(Capability::ScheduleRead).is_ok());
        let err = set.require(Capability::SettingsManage).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authorization);
        assert!(err.message.contains("manage institutions and rooms"));
    }

    #[test]
    fn test_serializes_as_sorted_list() {
        let set: CapabilitySet = [Capability::ScheduleRead, Capability::DashboardRead]
            .into_iter()
            .collect();
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, r#"["dashboard_read","schedule_read"]"#);
    }
}
