//! # Web API Application State
//!
//! Shared state for the web API: configuration plus the injected OS
//! collaborators. Collaborators sit behind trait objects so tests can
//! substitute fake catalogs; handlers never reach for a global instance.

use std::sync::Arc;

use crate::catalog::{EventHistory, UnitManager};
use crate::config::SvcgateConfig;
use crate::lifecycle::RestartOptions;
use crate::resolve::AllowList;

/// Shared application state for the web API.
///
/// Cheap to clone: everything is behind an `Arc`. The catalog itself is
/// re-queried fresh per request, so no cross-request mutable state lives
/// here and no locking is required.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<SvcgateConfig>,

    /// Collaborator controlling background services.
    pub services: Arc<dyn UnitManager>,

    /// Collaborator controlling scheduled tasks.
    pub tasks: Arc<dyn UnitManager>,

    /// Event-log reader for task history.
    pub history: Arc<dyn EventHistory>,
}

impl AppState {
    pub fn new(
        config: Arc<SvcgateConfig>,
        services: Arc<dyn UnitManager>,
        tasks: Arc<dyn UnitManager>,
        history: Arc<dyn EventHistory>,
    ) -> Self {
        Self {
            config,
            services,
            tasks,
            history,
        }
    }

    /// Allow-list for the services resource kind. Empty configuration means
    /// the filter retains nothing.
    pub fn service_allow_list(&self) -> AllowList {
        AllowList::parse(&self.config.allowed_services)
    }

    /// Scheduled tasks are not allow-list filtered; this permits everything.
    pub fn task_allow_list(&self) -> AllowList {
        AllowList::parse("*")
    }

    pub fn restart_options(&self) -> RestartOptions {
        RestartOptions::from_config(&self.config)
    }
}
