//! # Web API Route Definitions
//!
//! Defines the HTTP route structure for the svcgate API. Routes are
//! organized into logical groups per resource kind.

use crate::web::handlers;
use crate::web::state::AppState;
use axum::routing::{get, post};
use axum::Router;

/// Service routes
///
/// - `GET /services` / `GET /services/:name` - wildcard listing
/// - `GET /services/:name/status` - single-resource status
/// - `POST /services/:name/start|stop|restart` - control actions
pub fn service_routes() -> Router<AppState> {
    Router::new()
        .route("/services", get(handlers::services::list_all))
        .route("/services/:name", get(handlers::services::list))
        .route("/services/:name/status", get(handlers::services::status))
        .route("/services/:name/start", post(handlers::services::start))
        .route("/services/:name/stop", post(handlers::services::stop))
        .route("/services/:name/restart", post(handlers::services::restart))
}

/// Scheduled-task routes
///
/// - `GET /tasks` / `GET /tasks/:name` - wildcard listing
/// - `GET /tasks/:name/status` - single-resource status
/// - `POST /tasks/:name/start|stop` - control actions
/// - `GET /tasks/:name/history` - OS event-log read-through
pub fn task_routes() -> Router<AppState> {
    Router::new()
        .route("/tasks", get(handlers::tasks::list_all))
        .route("/tasks/:name", get(handlers::tasks::list))
        .route("/tasks/:name/status", get(handlers::tasks::status))
        .route("/tasks/:name/start", post(handlers::tasks::start))
        .route("/tasks/:name/stop", post(handlers::tasks::stop))
        .route("/tasks/:name/history", get(handlers::tasks::history))
}

/// Health routes
///
/// - `/health` - basic health check
/// - `/health/live` - Kubernetes liveness probe
/// - `/health/ready` - Kubernetes readiness probe (queries both collaborators)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health::basic_health))
        .route("/health/live", get(handlers::health::liveness_probe))
        .route("/health/ready", get(handlers::health::readiness_probe))
}
