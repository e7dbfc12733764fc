//! Sidebar entries filtered by capability.

use serde::Serialize;

use clickaulas_auth::rbac::Capability;

use crate::context::RequestContext;

/// One sidebar link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub key: &'static str,
    pub label: &'static str,
    pub href: &'static str,
}

const ENTRIES: [(Capability, NavItem); 6] = [
    (
        Capability::DashboardRead,
        NavItem { key: "dashboard", label: "Dashboard", href: "/admin" },
    ),
    (
        Capability::CoordinatorManage,
        NavItem { key: "coordinators", label: "Coordinators", href: "/admin/coordinators" },
    ),
    (
        Capability::TeacherManage,
        NavItem { key: "teachers", label: "Teachers", href: "/admin/teachers" },
    ),
    (
        Capability::ScheduleRead,
        NavItem { key: "schedule", label: "Schedule", href: "/admin/schedule" },
    ),
    (
        Capability::NotificationRead,
        NavItem { key: "notifications", label: "Notifications", href: "/admin/notifications" },
    ),
    (
        Capability::SettingsManage,
        NavItem { key: "settings", label: "Settings", href: "/admin/settings" },
    ),
];

/// Entries the caller may open, in display order.
pub fn sidebar(ctx: &RequestContext) -> Vec<NavItem> {
    ENTRIES
        .iter()
        .filter(|(capability, _)| ctx.can(*capability))
        .map(|(_, item)| item.clone())
        .collect()
}
