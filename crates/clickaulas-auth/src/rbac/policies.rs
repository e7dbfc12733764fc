//! Role-to-capability mapping.

use std::collections::HashMap;

use clickaulas_entity::UserRole;

use super::capability::{Capability, CapabilitySet};

/// Maps each role to the capabilities it grants.
#[derive(Debug, Clone)]
pub struct RbacPolicies {
    grants: HashMap<UserRole, CapabilitySet>,
}

impl RbacPolicies {
    /// Creates the default policy set.
    pub fn new() -> Self {
        use Capability::*;

        let shared = [
            DashboardRead,
            ScheduleRead,
            ScheduleCreate,
            NotificationRead,
            NotificationCreate,
        ];

        let mut grants = HashMap::new();
        grants.insert(
            UserRole::Admin,
            shared
                .into_iter()
                .chain([CoordinatorManage, TeacherManage, SettingsManage, ScheduleManage])
                .collect(),
        );
        grants.insert(
            UserRole::Coordinator,
            shared
                .into_iter()
                .chain([TeacherManage, ScheduleManage])
                .collect(),
        );
        grants.insert(UserRole::Teacher, shared.into_iter().collect());

        Self { grants }
    }

    /// Resolves the capability set granted to `role`.
    pub fn capabilities_for(&self, role: UserRole) -> CapabilitySet {
        self.grants.get(&role).cloned().unwrap_or_default()
    }

    /// Whether `role` is granted `capability`.
    pub fn has_capability(&self, role: UserRole, capability: Capability) -> bool {
        self.grants
            .get(&role)
            .is_some_and(|set| set.contains(capability))
    }
}

impl Default for RbacPolicies {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Capability::*;

    #[test]
    fn test_admin_has_everything() {
        let policies = RbacPolicies::new();
        let set = policies.capabilities_for(UserRole::Admin);
        assert_eq!(set.len(), 9);
    }

    #[test]
    fn test_record_matrix() {
        let p = RbacPolicies::new();
        assert!(p.has_capability(UserRole::Admin, CoordinatorManage));
        assert!(!p.has_capability(UserRole::Coordinator, CoordinatorManage));
        assert!(!p.has_capability(UserRole::Teacher, CoordinatorManage));

        assert!(p.has_capability(UserRole::Admin, TeacherManage));
        assert!(p.has_capability(UserRole::Coordinator, TeacherManage));
        assert!(!p.has_capability(UserRole::Teacher, TeacherManage));

        assert!(p.has_capability(UserRole::Admin, SettingsManage));
        assert!(!p.has_capability(UserRole::Coordinator, SettingsManage));
        assert!(!p.has_capability(UserRole::Teacher, SettingsManage));

        for role in UserRole::ALL {
            assert!(p.has_capability(role, ScheduleCreate));
            assert!(p.has_capability(role, NotificationCreate));
            assert!(p.has_capability(role, DashboardRead));
        }
    }

    #[test]
    fn test_schedule_delete_excludes_teachers() {
        let p = RbacPolicies::new();
        assert!(p.has_capability(UserRole::Coordinator, ScheduleManage));
        assert!(!p.has_capability(UserRole::Teacher, ScheduleManage));
    }
}
