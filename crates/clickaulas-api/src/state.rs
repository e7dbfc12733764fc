//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use clickaulas_auth::guard::RouteGuard;
use clickaulas_auth::jwt::JwtDecoder;
use clickaulas_auth::rbac::RbacPolicies;
use clickaulas_core::config::AppConfig;
use clickaulas_database::Stores;
use clickaulas_service::{
    AuthService, DashboardService, NotificationService, ScheduleService, SettingsService,
    StaffService,
};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// Store handles (PostgreSQL or in-memory)
    pub stores: Stores,

    // ── Auth ─────────────────────────────────────────────────
    /// Session token decoder
    pub jwt_decoder: Arc<JwtDecoder>,
    /// Role to capability mapping
    pub policies: Arc<RbacPolicies>,
    /// Route guard
    pub guard: Arc<RouteGuard>,

    // ── Services ─────────────────────────────────────────────
    /// Registration and sign-in
    pub auth_service: Arc<AuthService>,
    /// Dashboard summary
    pub dashboard_service: Arc<DashboardService>,
    /// Coordinator records
    pub coordinator_service: Arc<StaffService>,
    /// Teacher records
    pub teacher_service: Arc<StaffService>,
    /// Institutions and rooms
    pub settings_service: Arc<SettingsService>,
    /// Class schedules
    pub schedule_service: Arc<ScheduleService>,
    /// Notifications
    pub notification_service: Arc<NotificationService>,
}
