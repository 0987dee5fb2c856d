//! # Lifecycle Control
//!
//! Single start/stop actions with idempotence short-circuits, and the
//! composite restart action: stop, await the stopped state under a bounded
//! polling loop, then start. Restart polls because the underlying control
//! API has no cancellable "block until stopped" primitive; the timeout is
//! the only bound. All waits are `tokio::time::sleep`, so an in-flight
//! restart yields its worker instead of blocking it.

use serde::Serialize;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::catalog::{ResourceStatus, UnitManager};
use crate::config::SvcgateConfig;
use crate::error::SvcgateError;

/// Ordered step labels accumulated during a composite action.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ActionReport {
    steps: Vec<String>,
}

impl ActionReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, step: &str) {
        self.steps.push(step.to_string());
    }

    pub fn steps(&self) -> &[String] {
        &self.steps
    }

    /// Space-joined step labels, e.g. `"Stopping. Stopped. Starting."`.
    pub fn summary(&self) -> String {
        self.steps.join(" ")
    }
}

impl std::fmt::Display for ActionReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.summary())
    }
}

/// Result of a single start or stop action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The action was issued to the collaborator.
    Changed,
    /// The resource is already in (or transitioning toward) the target
    /// state; the call was skipped. Not an error condition.
    AlreadyInState(String),
}

/// Timing knobs for the restart state machine, sourced from configuration.
#[derive(Debug, Clone)]
pub struct RestartOptions {
    /// Maximum number of poll intervals to wait for the stopped state.
    pub timeout_seconds: u64,
    /// Sleep between status polls.
    pub poll_interval: Duration,
    /// Pause after issuing stop, before the first status re-read.
    pub settle_delay: Duration,
}

impl RestartOptions {
    pub fn from_config(config: &SvcgateConfig) -> Self {
        Self {
            timeout_seconds: config.restart_timeout_seconds,
            poll_interval: config.restart_poll_interval(),
            settle_delay: config.restart_settle_delay(),
        }
    }
}

#[derive(Debug, Error)]
pub enum RestartError {
    /// The polling loop exceeded its bound. Fatal and caller-visible; the
    /// partial report records what was attempted.
    #[error("Timeout ({timeout_seconds} seconds) while waiting for service to stop. Actions: {report}")]
    Timeout {
        timeout_seconds: u64,
        report: ActionReport,
    },

    #[error(transparent)]
    Collaborator(#[from] SvcgateError),
}

/// Start a resource unless it is already running.
pub async fn start(manager: &dyn UnitManager, name: &str) -> crate::Result<ActionOutcome> {
    let status = manager.status(name).await?;
    if status.is_stop_adjacent() {
        manager.start(name).await?;
        info!(name, %status, "Start issued");
        Ok(ActionOutcome::Changed)
    } else {
        debug!(name, %status, "Start skipped, resource not stopped");
        Ok(ActionOutcome::AlreadyInState(
            "already running.. skipping call".to_string(),
        ))
    }
}

/// Stop a resource unless it is already stopped or stopping.
pub async fn stop(manager: &dyn UnitManager, name: &str) -> crate::Result<ActionOutcome> {
    let status = manager.status(name).await?;
    if status.is_stop_adjacent() {
        debug!(name, %status, "Stop skipped, resource already stopped");
        Ok(ActionOutcome::AlreadyInState(
            "already stopped.. skipping call".to_string(),
        ))
    } else {
        manager.stop(name).await?;
        info!(name, %status, "Stop issued");
        Ok(ActionOutcome::Changed)
    }
}

/// Restart state machine: observe a stop completion before issuing start.
///
/// 1. If the resource is running or pausing, issue stop, wait the settle
///    delay, and re-read the status; otherwise record "Already Stopped.".
/// 2. Poll until the status reads stopped, bumping an elapsed counter each
///    interval. Exceeding `timeout_seconds` aborts with the partial report.
/// 3. Once stopped is observed, issue start and return the full report.
pub async fn restart(
    manager: &dyn UnitManager,
    name: &str,
    options: &RestartOptions,
) -> Result<ActionReport, RestartError> {
    let mut report = ActionReport::new();
    let mut status = manager.status(name).await.map_err(RestartError::from)?;

    if status == ResourceStatus::Running || status.is_pausing() {
        report.push("Stopping.");
        manager.stop(name).await.map_err(RestartError::from)?;
        tokio::time::sleep(options.settle_delay).await;
        status = manager.status(name).await.map_err(RestartError::from)?;
    } else {
        report.push("Already Stopped.");
    }

    if status == ResourceStatus::Stopped {
        report.push("Stopped.");
    }

    let mut elapsed: u64 = 0;
    while status != ResourceStatus::Stopped {
        tokio::time::sleep(options.poll_interval).await;
        elapsed += 1;
        if elapsed > options.timeout_seconds {
            warn!(
                name,
                timeout_seconds = options.timeout_seconds,
                actions = %report,
                "Restart timed out waiting for stop"
            );
            return Err(RestartError::Timeout {
                timeout_seconds: options.timeout_seconds,
                report,
            });
        }
        status = manager.status(name).await.map_err(RestartError::from)?;
        if status == ResourceStatus::Stopped {
            report.push("Stopped.");
        }
    }

    report.push("Starting.");
    manager.start(name).await.map_err(RestartError::from)?;
    info!(name, actions = %report, "Restart completed");
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use crate::catalog::ResourceDescriptor;

    /// Scripted collaborator: pops a queued status per `status()` call and
    /// repeats the final entry once the script runs out.
    struct ScriptedManager {
        script: Mutex<VecDeque<ResourceStatus>>,
        terminal: ResourceStatus,
        starts: Mutex<u32>,
        stops: Mutex<u32>,
    }

    impl ScriptedManager {
        fn new(script: Vec<ResourceStatus>, terminal: ResourceStatus) -> Self {
            Self {
                script: Mutex::new(script.into()),
                terminal,
                starts: Mutex::new(0),
                stops: Mutex::new(0),
            }
        }

        fn start_count(&self) -> u32 {
            *self.starts.lock().unwrap()
        }

        fn stop_count(&self) -> u32 {
            *self.stops.lock().unwrap()
        }
    }

    #[async_trait]
    impl UnitManager for ScriptedManager {
        async fn catalog(&self) -> crate::Result<Vec<ResourceDescriptor>> {
            Ok(vec![])
        }

        async fn status(&self, _name: &str) -> crate::Result<ResourceStatus> {
            Ok(self
                .script
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(self.terminal))
        }

        async fn start(&self, _name: &str) -> crate::Result<()> {
            *self.starts.lock().unwrap() += 1;
            Ok(())
        }

        async fn stop(&self, _name: &str) -> crate::Result<()> {
            *self.stops.lock().unwrap() += 1;
            Ok(())
        }
    }

    fn options(timeout_seconds: u64) -> RestartOptions {
        RestartOptions {
            timeout_seconds,
            poll_interval: Duration::from_secs(1),
            settle_delay: Duration::from_secs(2),
        }
    }

    #[tokio::test]
    async fn test_start_from_stopped_issues_start() {
        let manager = ScriptedManager::new(vec![], ResourceStatus::Stopped);
        let outcome = start(&manager, "sshd.service").await.unwrap();
        assert_eq!(outcome, ActionOutcome::Changed);
        assert_eq!(manager.start_count(), 1);
    }

    #[tokio::test]
    async fn test_start_while_running_short_circuits() {
        let manager = ScriptedManager::new(vec![], ResourceStatus::Running);
        let outcome = start(&manager, "sshd.service").await.unwrap();
        assert!(matches!(outcome, ActionOutcome::AlreadyInState(_)));
        assert_eq!(manager.start_count(), 0);
    }

    #[tokio::test]
    async fn test_stop_while_stopping_short_circuits() {
        let manager = ScriptedManager::new(vec![], ResourceStatus::StopPending);
        let outcome = stop(&manager, "sshd.service").await.unwrap();
        assert!(matches!(outcome, ActionOutcome::AlreadyInState(_)));
        assert_eq!(manager.stop_count(), 0);
    }

    #[tokio::test]
    async fn test_stop_while_running_issues_stop() {
        let manager = ScriptedManager::new(vec![], ResourceStatus::Running);
        let outcome = stop(&manager, "sshd.service").await.unwrap();
        assert_eq!(outcome, ActionOutcome::Changed);
        assert_eq!(manager.stop_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_of_stopped_resource() {
        let manager = ScriptedManager::new(vec![], ResourceStatus::Stopped);
        let report = restart(&manager, "sshd.service", &options(5)).await.unwrap();

        assert_eq!(report.summary(), "Already Stopped. Stopped. Starting.");
        assert_eq!(manager.start_count(), 1);
        assert_eq!(manager.stop_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_of_running_resource() {
        // Running at entry, stop-pending right after the settle delay, then
        // stopped on the next poll.
        let manager = ScriptedManager::new(
            vec![
                ResourceStatus::Running,
                ResourceStatus::StopPending,
                ResourceStatus::Stopped,
            ],
            ResourceStatus::Stopped,
        );
        let report = restart(&manager, "sshd.service", &options(5)).await.unwrap();

        assert_eq!(report.summary(), "Stopping. Stopped. Starting.");
        assert_eq!(manager.stop_count(), 1);
        assert_eq!(manager.start_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_times_out_when_stop_never_completes() {
        let manager = ScriptedManager::new(vec![], ResourceStatus::Running);
        let err = restart(&manager, "stuck.service", &options(5))
            .await
            .unwrap_err();

        match err {
            RestartError::Timeout {
                timeout_seconds,
                report,
            } => {
                assert_eq!(timeout_seconds, 5);
                let summary = report.summary();
                assert!(summary.contains("Stopping."));
                assert!(!summary.contains("Stopped."));
                assert!(!summary.contains("Starting."));
            }
            other => panic!("expected Timeout, got {other}"),
        }
        assert_eq!(manager.start_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_of_paused_resource_issues_stop_first() {
        let manager = ScriptedManager::new(
            vec![ResourceStatus::Paused, ResourceStatus::Stopped],
            ResourceStatus::Stopped,
        );
        let report = restart(&manager, "svc.service", &options(5)).await.unwrap();

        assert_eq!(report.summary(), "Stopping. Stopped. Starting.");
        assert_eq!(manager.stop_count(), 1);
    }
}
