//! Configuration loading with environment awareness.
//!
//! Sources, in precedence order (later wins):
//! 1. Built-in defaults from [`SvcgateConfig::default`]
//! 2. `config/svcgate.toml` (optional)
//! 3. `config/svcgate.{environment}.toml` (optional)
//! 4. Environment variables `SVCGATE_<FIELD>` (e.g. `SVCGATE_BIND_ADDRESS`)

use config::{Config, Environment, File, FileFormat};
use tracing::{debug, info};

use super::SvcgateConfig;
use crate::error::{Result, SvcgateError};
use crate::logging;

/// Loads and holds the validated configuration plus the environment name it
/// was resolved for.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config: SvcgateConfig,
    environment: String,
}

impl ConfigManager {
    /// Load configuration for the auto-detected environment (`SVCGATE_ENV`,
    /// default `development`).
    pub fn load() -> Result<Self> {
        Self::load_for_environment(&logging::get_environment())
    }

    pub fn load_for_environment(environment: &str) -> Result<Self> {
        let defaults = SvcgateConfig::default();

        let builder = Config::builder()
            .add_source(Config::try_from(&defaults).map_err(|e| {
                SvcgateError::configuration(format!("failed to seed defaults: {e}"))
            })?)
            .add_source(
                File::new("config/svcgate", FileFormat::Toml).required(false),
            )
            .add_source(
                File::new(&format!("config/svcgate.{environment}"), FileFormat::Toml)
                    .required(false),
            )
            .add_source(Environment::with_prefix("SVCGATE").separator("__"));

        let config: SvcgateConfig = builder
            .build()
            .map_err(|e| SvcgateError::configuration(format!("failed to load config: {e}")))?
            .try_deserialize()
            .map_err(|e| SvcgateError::configuration(format!("invalid configuration: {e}")))?;

        config.validate()?;

        debug!(?config, environment, "Configuration loaded");
        info!(
            bind_address = %config.bind_address,
            restart_timeout_seconds = config.restart_timeout_seconds,
            allow_list_empty = config.allowed_services.is_empty(),
            "Configuration validated"
        );

        Ok(Self {
            config,
            environment: environment.to_string(),
        })
    }

    pub fn config(&self) -> &SvcgateConfig {
        &self.config
    }

    pub fn environment(&self) -> &str {
        &self.environment
    }
}
