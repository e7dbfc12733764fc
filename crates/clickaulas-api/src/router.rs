//! Route definitions for the ClickAulas HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`.
//! The router receives `AppState` and passes it to all handlers via Axum's `State` extractor.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{delete, get, post, put},
};
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
///
/// The guard runs inside CORS so preflight requests are answered without
/// a session.
pub fn build_router(state: AppState) -> Router {
    let max_body = state.config.server.max_body_bytes;

    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(shell_routes())
        .merge(staff_routes())
        .merge(settings_routes())
        .merge(schedule_routes())
        .merge(notification_routes())
        .merge(health_routes());

    let cors = middleware::cors::build_cors_layer(&state.config.server.cors);

    Router::new()
        .nest("/api", api_routes)
        .fallback(handlers::not_found)
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::guard::session_guard,
        ))
        .layer(DefaultBodyLimit::max(max_body))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

/// Registration, sign-in and session
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/federated", post(handlers::auth::federated))
        .route("/auth/logout", post(handlers::auth::logout))
        .route("/auth/session", get(handlers::auth::session))
}

/// Sidebar and dashboard
fn shell_routes() -> Router<AppState> {
    Router::new()
        .route("/admin/navigation", get(handlers::dashboard::navigation))
        .route("/admin/dashboard", get(handlers::dashboard::dashboard))
}

/// Coordinators and teachers
fn staff_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/admin/coordinators",
            get(handlers::staff::list_coordinators).post(handlers::staff::upsert_coordinator),
        )
        .route(
            "/admin/coordinators/{id}",
            delete(handlers::staff::delete_coordinator),
        )
        .route(
            "/admin/teachers",
            get(handlers::staff::list_teachers).post(handlers::staff::upsert_teacher),
        )
        .route("/admin/teachers/{id}", delete(handlers::staff::delete_teacher))
}

/// Institutions and rooms
fn settings_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/admin/settings/institutions",
            get(handlers::settings::list_institutions).post(handlers::settings::upsert_institution),
        )
        .route(
            "/admin/settings/institutions/{id}",
            delete(handlers::settings::delete_institution),
        )
        .route(
            "/admin/settings/rooms",
            get(handlers::settings::list_rooms).post(handlers::settings::upsert_room),
        )
        .route(
            "/admin/settings/rooms/{id}",
            delete(handlers::settings::delete_room),
        )
}

/// Class schedules
fn schedule_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/admin/schedules",
            get(handlers::schedule::list_schedules).post(handlers::schedule::create_schedule),
        )
        .route(
            "/admin/schedules/options",
            get(handlers::schedule::schedule_options),
        )
        .route(
            "/admin/schedules/{id}",
            delete(handlers::schedule::delete_schedule),
        )
}

/// Notifications
fn notification_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/admin/notifications",
            get(handlers::notification::list_notifications)
                .post(handlers::notification::create_notification),
        )
        .route(
            "/admin/notifications/options",
            get(handlers::notification::notification_options),
        )
        .route(
            "/admin/notifications/{id}/read",
            put(handlers::notification::mark_read),
        )
}

/// Health check
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
