//! # Svcgate Server
//!
//! Production binary: loads configuration, wires the systemd-backed
//! collaborators into the web API, and serves until a shutdown signal.
//!
//! ## Usage
//!
//! ```bash
//! # Run with default configuration
//! cargo run --bin svcgate-server
//!
//! # Run with a specific environment
//! SVCGATE_ENV=production cargo run --bin svcgate-server
//! ```

use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tracing::info;

use svcgate::catalog::journal::JournalHistory;
use svcgate::catalog::systemd::SystemdServiceManager;
use svcgate::catalog::timers::SystemdTimerManager;
use svcgate::config::ConfigManager;
use svcgate::logging;
use svcgate::web::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init_structured_logging();

    info!("Starting svcgate server...");
    info!("   Version: {}", env!("CARGO_PKG_VERSION"));

    let config_manager = ConfigManager::load().context("failed to load configuration")?;
    info!("   Environment: {}", config_manager.environment());

    let config = Arc::new(config_manager.config().clone());
    if config.allowed_services.is_empty() {
        // Fail-closed default: without an allow-list no service is listable
        // or controllable. Called out loudly at startup so an operator sees
        // it before the first confusing empty response.
        info!("allowed_services is empty; the services API will return no resources");
    }

    let app_state = AppState::new(
        config.clone(),
        Arc::new(SystemdServiceManager::new()),
        Arc::new(SystemdTimerManager::new()),
        Arc::new(JournalHistory::new()),
    );

    let app = svcgate::web::create_app(app_state);

    let addr = config.socket_addr().context("invalid bind_address")?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!("Listening on {addr}");
    info!("   Press Ctrl+C to shutdown gracefully");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Svcgate server shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C"),
        _ = terminate => info!("Received SIGTERM"),
    }
}
