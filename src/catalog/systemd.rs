//! systemd-backed service collaborator.
//!
//! Thin pass-through to `systemctl`: `list-units` for the catalog (with a
//! best-effort per-unit `show` pass for capabilities and dependencies),
//! `show` for single-unit status, and `start`/`stop` for control. Output
//! parsing is kept in free functions so it can be tested without a running
//! systemd.

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, warn};

use super::{Capabilities, ResourceDescriptor, ResourceStatus, UnitManager};
use crate::error::{Result, SvcgateError};

/// Service manager backed by `systemctl`.
#[derive(Debug, Clone, Default)]
pub struct SystemdServiceManager;

impl SystemdServiceManager {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl UnitManager for SystemdServiceManager {
    async fn catalog(&self) -> Result<Vec<ResourceDescriptor>> {
        let stdout = run_systemctl(&[
            "list-units",
            "--type=service",
            "--all",
            "--no-legend",
            "--plain",
            "--no-pager",
        ])
        .await?;

        let mut descriptors = parse_list_units(&stdout);
        // Per-unit detail lookups are best-effort: a unit that vanishes
        // between the two calls keeps its list-units defaults.
        for descriptor in descriptors.iter_mut() {
            let unit = descriptor.name.clone();
            match run_systemctl(&[
                "show",
                unit.as_str(),
                "--property=CanStop,Requires,RequiredBy",
                "--no-pager",
            ])
            .await
            {
                Ok(details) => enrich_descriptor(descriptor, &details),
                Err(error) => warn!(
                    unit = %unit,
                    %error,
                    "Unit detail lookup failed, keeping catalog defaults"
                ),
            }
        }
        debug!(count = descriptors.len(), "Queried service catalog");
        Ok(descriptors)
    }

    async fn status(&self, name: &str) -> Result<ResourceStatus> {
        let stdout = run_systemctl(&[
            "show",
            name,
            "--property=ActiveState,SubState",
            "--no-pager",
        ])
        .await?;
        Ok(parse_show_status(&stdout))
    }

    async fn start(&self, name: &str) -> Result<()> {
        run_systemctl(&["start", name]).await.map(|_| ())
    }

    async fn stop(&self, name: &str) -> Result<()> {
        run_systemctl(&["stop", name]).await.map(|_| ())
    }
}

/// Run `systemctl` with the given arguments, returning stdout on success.
///
/// A non-zero exit status is a collaborator failure (insufficient privilege,
/// unknown unit, dependency in use) and is propagated without retry.
pub(crate) async fn run_systemctl(args: &[&str]) -> Result<String> {
    let output = Command::new("systemctl")
        .args(args)
        .output()
        .await
        .map_err(|e| SvcgateError::collaborator(format!("failed to spawn systemctl: {e}")))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        warn!(
            args = ?args,
            code = output.status.code(),
            stderr = %stderr.trim(),
            "systemctl invocation failed"
        );
        return Err(SvcgateError::collaborator(format!(
            "systemctl {} exited with {}: {}",
            args.first().unwrap_or(&""),
            output.status,
            stderr.trim()
        )));
    }

    String::from_utf8(output.stdout)
        .map_err(|_| SvcgateError::parse("systemctl produced non-UTF-8 output".to_string()))
}

/// Parse `systemctl list-units --no-legend --plain` output.
///
/// Each line is `UNIT LOAD ACTIVE SUB DESCRIPTION...`; the description is
/// everything after the fourth column and becomes the display name.
pub(crate) fn parse_list_units(stdout: &str) -> Vec<ResourceDescriptor> {
    stdout
        .lines()
        .filter_map(|line| {
            let mut fields = line.split_whitespace();
            let unit = fields.next()?;
            let _load = fields.next()?;
            let active = fields.next()?;
            let sub = fields.next()?;
            let description = fields.collect::<Vec<_>>().join(" ");

            let status = map_unit_state(active, sub);
            let mut descriptor = ResourceDescriptor::new(unit, description, status);
            descriptor.capabilities = Capabilities {
                can_stop: !status.is_stop_adjacent(),
                can_pause_and_continue: false,
                can_shutdown: false,
            };
            Some(descriptor)
        })
        .collect()
}

/// Fold `systemctl show -p CanStop,Requires,RequiredBy` output into a
/// descriptor. Properties that are absent or malformed leave the
/// list-units defaults untouched.
pub(crate) fn enrich_descriptor(descriptor: &mut ResourceDescriptor, stdout: &str) {
    for line in stdout.lines() {
        if let Some(value) = line.strip_prefix("CanStop=") {
            match value.trim() {
                "yes" => descriptor.capabilities.can_stop = true,
                "no" => descriptor.capabilities.can_stop = false,
                _ => {}
            }
        } else if let Some(value) = line
            .strip_prefix("Requires=")
            .or_else(|| line.strip_prefix("RequiredBy="))
        {
            descriptor
                .dependencies
                .extend(value.split_whitespace().map(String::from));
        }
    }
}

/// Parse `systemctl show -p ActiveState,SubState` output into a status.
pub(crate) fn parse_show_status(stdout: &str) -> ResourceStatus {
    let mut active = "";
    let mut sub = "";
    for line in stdout.lines() {
        if let Some(value) = line.strip_prefix("ActiveState=") {
            active = value.trim();
        } else if let Some(value) = line.strip_prefix("SubState=") {
            sub = value.trim();
        }
    }
    map_unit_state(active, sub)
}

/// Map systemd's ActiveState/SubState pair onto the shared status enum.
pub(crate) fn map_unit_state(active: &str, _sub: &str) -> ResourceStatus {
    match active {
        "active" | "reloading" => ResourceStatus::Running,
        "activating" => ResourceStatus::StartPending,
        "deactivating" => ResourceStatus::StopPending,
        "inactive" | "failed" => ResourceStatus::Stopped,
        _ => ResourceStatus::Unknown,
    }
}
