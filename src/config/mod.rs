//! # Svcgate Configuration System
//!
//! Layered configuration loading: built-in defaults, an optional base file,
//! an optional environment overlay, then `SVCGATE_*` environment variables.
//! No silent fallbacks beyond the documented defaults; validation happens
//! once at load time.

pub mod loader;

pub use loader::ConfigManager;

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::time::Duration;

use crate::error::{Result, SvcgateError};

/// Top-level configuration consumed by the server and the lifecycle core.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SvcgateConfig {
    /// Socket address the HTTP server binds to.
    pub bind_address: String,

    /// Comma-separated wildcard allow-list restricting which services may be
    /// listed or controlled. Empty means no service is permitted at all;
    /// this is a deliberate fail-closed default.
    pub allowed_services: String,

    /// Upper bound, in seconds, on the restart polling loop waiting for the
    /// unit to reach the stopped state.
    pub restart_timeout_seconds: u64,

    /// Interval between status polls during restart, in milliseconds.
    pub restart_poll_interval_ms: u64,

    /// Pause after issuing a stop command before the first status re-read,
    /// so the collaborator has begun transitioning.
    pub restart_settle_delay_ms: u64,

    /// Per-request timeout applied by the HTTP middleware, in milliseconds.
    /// The effective timeout is raised if a full restart cycle would not
    /// fit within it.
    pub request_timeout_ms: u64,

    /// Maximum number of event-log entries returned by the task history
    /// endpoint.
    pub history_limit: usize,
}

impl Default for SvcgateConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            allowed_services: String::new(),
            restart_timeout_seconds: 30,
            restart_poll_interval_ms: 1_000,
            restart_settle_delay_ms: 2_000,
            request_timeout_ms: 30_000,
            history_limit: 100,
        }
    }
}

impl SvcgateConfig {
    /// Validate invariants that would otherwise surface as runtime hangs or
    /// bind failures.
    pub fn validate(&self) -> Result<()> {
        if self.restart_poll_interval_ms == 0 {
            return Err(SvcgateError::configuration(
                "restart_poll_interval_ms must be greater than zero",
            ));
        }
        self.socket_addr()?;
        Ok(())
    }

    pub fn socket_addr(&self) -> Result<SocketAddr> {
        self.bind_address.parse().map_err(|_| {
            SvcgateError::configuration(format!(
                "bind_address is not a valid socket address: {}",
                self.bind_address
            ))
        })
    }

    pub fn restart_poll_interval(&self) -> Duration {
        Duration::from_millis(self.restart_poll_interval_ms)
    }

    pub fn restart_settle_delay(&self) -> Duration {
        Duration::from_millis(self.restart_settle_delay_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = SvcgateConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.restart_timeout_seconds, 30);
        assert!(config.allowed_services.is_empty());
    }

    #[test]
    fn zero_poll_interval_is_rejected() {
        let config = SvcgateConfig {
            restart_poll_interval_ms: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn bad_bind_address_is_rejected() {
        let config = SvcgateConfig {
            bind_address: "not-an-address".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
