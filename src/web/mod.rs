//! # Web API Module
//!
//! Axum-based REST API over the resolution and lifecycle core.
//!
//! ## Core Components
//!
//! - [`routes`] - HTTP route definitions and organization
//! - [`handlers`] - Request handlers per resource kind
//! - [`middleware`] - Request-id middleware
//! - [`state`] - Shared application state and injected collaborators
//! - [`errors`] - Web-specific error types and responses

pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

use axum::Router;
use state::AppState;
use std::time::Duration;

use crate::config::SvcgateConfig;

/// Create the main Axum application with all routes and middleware.
pub fn create_app(app_state: AppState) -> Router {
    let request_timeout = effective_request_timeout(&app_state.config);

    Router::new()
        .merge(routes::health_routes())
        .merge(routes::service_routes())
        .merge(routes::task_routes())
        .layer(axum::middleware::from_fn(
            middleware::request_id::add_request_id,
        ))
        .layer(tower_http::timeout::TimeoutLayer::new(request_timeout))
        .layer(
            tower_http::cors::CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods(tower_http::cors::Any)
                .allow_headers(tower_http::cors::Any),
        )
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .with_state(app_state)
}

/// Request timeout that leaves room for a full restart cycle: settle delay
/// plus one poll interval per timeout unit, with slack for the control calls
/// themselves. Saturating millisecond arithmetic so an extreme configured
/// timeout clamps instead of overflowing.
fn effective_request_timeout(config: &SvcgateConfig) -> Duration {
    let polls = config.restart_timeout_seconds.saturating_add(1);
    let restart_budget_ms = config
        .restart_poll_interval_ms
        .saturating_mul(polls)
        .saturating_add(config.restart_settle_delay_ms)
        .saturating_add(5_000);
    config
        .request_timeout()
        .max(Duration::from_millis(restart_budget_ms))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_timeout_covers_restart_cycle() {
        let config = SvcgateConfig {
            restart_timeout_seconds: 2,
            restart_poll_interval_ms: 1000,
            restart_settle_delay_ms: 2000,
            request_timeout_ms: 1000,
            ..SvcgateConfig::default()
        };
        // settle 2s + 3 polls * 1s + 5s slack = 10s, above the 1s base.
        assert_eq!(effective_request_timeout(&config), Duration::from_secs(10));
    }

    #[test]
    fn test_effective_timeout_keeps_larger_base() {
        let config = SvcgateConfig {
            restart_timeout_seconds: 1,
            restart_poll_interval_ms: 10,
            restart_settle_delay_ms: 1,
            request_timeout_ms: 60_000,
            ..SvcgateConfig::default()
        };
        assert_eq!(effective_request_timeout(&config), Duration::from_secs(60));
    }

    #[test]
    fn test_effective_timeout_clamps_extreme_config() {
        let config = SvcgateConfig {
            restart_timeout_seconds: u64::MAX,
            restart_poll_interval_ms: u64::MAX,
            restart_settle_delay_ms: u64::MAX,
            ..SvcgateConfig::default()
        };
        let timeout = effective_request_timeout(&config);
        assert!(timeout >= Duration::from_millis(u64::MAX));
    }
}
