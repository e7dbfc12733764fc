//! Application builder: wires stores, auth and services into an Axum app.

use std::sync::Arc;

use axum::Router;

use clickaulas_auth::guard::RouteGuard;
use clickaulas_auth::identity::IdentityProvider;
use clickaulas_auth::jwt::{JwtDecoder, JwtEncoder};
use clickaulas_auth::password::{CredentialGenerator, PasswordHasher};
use clickaulas_auth::rbac::RbacPolicies;
use clickaulas_core::config::AppConfig;
use clickaulas_core::error::AppError;
use clickaulas_database::Stores;
use clickaulas_service::{
    AuthService, DashboardService, NotificationService, ScheduleService, SettingsService,
    StaffService,
};

use crate::router::build_router;
use crate::state::AppState;

/// Builds the shared state from configuration and a store backend.
pub fn build_state(config: AppConfig, stores: Stores) -> AppState {
    // ── Auth ─────────────────────────────────────────────────────
    let password_hasher = Arc::new(PasswordHasher::new());
    let jwt_encoder = Arc::new(JwtEncoder::new(&config.auth));
    let jwt_decoder = Arc::new(JwtDecoder::new(&config.auth));
    let identity = Arc::new(IdentityProvider::new(
        Arc::clone(&stores.users),
        Arc::clone(&password_hasher),
        config.auth.clone(),
    ));
    let generator = CredentialGenerator::new(config.auth.credential_length);

    // ── Services ─────────────────────────────────────────────────
    let auth_service = Arc::new(AuthService::new(
        Arc::clone(&stores.users),
        Arc::clone(&password_hasher),
        identity,
        jwt_encoder,
        config.auth.password_min_length,
    ));
    let dashboard_service = Arc::new(DashboardService::new(
        Arc::clone(&stores.users),
        Arc::clone(&stores.rooms),
        Arc::clone(&stores.schedules),
        Arc::clone(&stores.notifications),
    ));
    let coordinator_service = Arc::new(StaffService::coordinators(
        Arc::clone(&stores.users),
        Arc::clone(&password_hasher),
        generator.clone(),
    ));
    let teacher_service = Arc::new(StaffService::teachers(
        Arc::clone(&stores.users),
        Arc::clone(&password_hasher),
        generator,
    ));
    let settings_service = Arc::new(SettingsService::new(
        Arc::clone(&stores.institutions),
        Arc::clone(&stores.rooms),
    ));
    let schedule_service = Arc::new(ScheduleService::new(
        Arc::clone(&stores.schedules),
        Arc::clone(&stores.rooms),
        Arc::clone(&stores.users),
    ));
    let notification_service = Arc::new(NotificationService::new(
        Arc::clone(&stores.notifications),
        Arc::clone(&stores.users),
        Arc::clone(&stores.schedules),
    ));

    AppState {
        guard: Arc::new(RouteGuard::new(&config.guard)),
        config: Arc::new(config),
        stores,
        jwt_decoder,
        policies: Arc::new(RbacPolicies::new()),
        auth_service,
        dashboard_service,
        coordinator_service,
        teacher_service,
        settings_service,
        schedule_service,
        notification_service,
    }
}

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    build_router(state)
}

/// Runs the ClickAulas server until Ctrl+C.
pub async fn run_server(config: AppConfig, stores: Stores) -> Result<(), AppError> {
    tracing::info!(store = stores.backend, "Starting ClickAulas server...");

    let addr = config.server.bind_address();
    let app = build_app(build_state(config, stores));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("ClickAulas server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
