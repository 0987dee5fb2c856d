//! systemd timer-backed scheduled-task collaborator.
//!
//! Scheduled tasks are systemd timer units. The catalog comes from
//! `list-units --type=timer`; last/next activation times are enriched from
//! `list-timers -o json`. Enrichment is best-effort: if the lookup fails the
//! descriptors are returned without schedule data and the failure is logged,
//! never hidden.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::collections::HashMap;
use tracing::{debug, warn};

use super::systemd::{parse_list_units, parse_show_status, run_systemctl};
use super::{ResourceDescriptor, ResourceStatus, UnitManager};
use crate::error::{Result, SvcgateError};

/// Scheduled-task manager backed by systemd timers.
#[derive(Debug, Clone, Default)]
pub struct SystemdTimerManager;

impl SystemdTimerManager {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl UnitManager for SystemdTimerManager {
    async fn catalog(&self) -> Result<Vec<ResourceDescriptor>> {
        let stdout = run_systemctl(&[
            "list-units",
            "--type=timer",
            "--all",
            "--no-legend",
            "--plain",
            "--no-pager",
        ])
        .await?;
        let mut descriptors = parse_list_units(&stdout);

        // Schedule enrichment failing degrades the listing, it does not
        // fail the request.
        match run_systemctl(&["list-timers", "--all", "--no-pager", "-o", "json"]).await {
            Ok(json) => match parse_timer_schedules(&json) {
                Ok(schedules) => {
                    for descriptor in &mut descriptors {
                        if let Some(schedule) = schedules.get(&descriptor.name) {
                            descriptor.last_run = schedule.last;
                            descriptor.next_run = schedule.next;
                        }
                    }
                }
                Err(e) => warn!(error = %e, "Failed to parse timer schedules; listing without them"),
            },
            Err(e) => warn!(error = %e, "Failed to query timer schedules; listing without them"),
        }

        debug!(count = descriptors.len(), "Queried timer catalog");
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

/// Last/next activation timestamps for one timer unit.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct TimerSchedule {
    pub last: Option<DateTime<Utc>>,
    pub next: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
struct TimerRow {
    unit: String,
    // Microseconds since the epoch; absent or zero when never run / not
    // scheduled.
    #[serde(default)]
    last: Option<i64>,
    #[serde(default)]
    next: Option<i64>,
}

/// Parse `systemctl list-timers -o json` output into a per-unit schedule map.
pub(crate) fn parse_timer_schedules(json: &str) -> Result<HashMap<String, TimerSchedule>> {
    let rows: Vec<TimerRow> = serde_json::from_str(json)
        .map_err(|e| SvcgateError::parse(format!("list-timers output: {e}")))?;

    Ok(rows
        .into_iter()
        .map(|row| {
            let schedule = TimerSchedule {
                last: row.last.and_then(usec_to_datetime),
                next: row.next.and_then(usec_to_datetime),
            };
            (row.unit, schedule)
        })
        .collect())
}

fn usec_to_datetime(usec: i64) -> Option<DateTime<Utc>> {
    if usec <= 0 {
        return None;
    }
    DateTime::<Utc>::from_timestamp_micros(usec)
}
