//! journald-backed event history.
//!
//! Read-through to `journalctl -o json` for the unit correlated to a task
//! name. Lines that fail to parse are logged and skipped: a bad record
//! degrades the history, it never fails the whole request.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tokio::process::Command;
use tracing::{debug, warn};

use super::{EventEntry, EventHistory};
use crate::error::{Result, SvcgateError};

/// Event history reader backed by `journalctl`.
#[derive(Debug, Clone, Default)]
pub struct JournalHistory;

impl JournalHistory {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl EventHistory for JournalHistory {
    async fn history(&self, name: &str, limit: usize) -> Result<Vec<EventEntry>> {
        let limit_arg = limit.to_string();
        let output = Command::new("journalctl")
            .args(["-u", name, "-o", "json", "--no-pager", "-n", &limit_arg])
            .output()
            .await
            .map_err(|e| SvcgateError::collaborator(format!("failed to spawn journalctl: {e}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(SvcgateError::collaborator(format!(
                "journalctl exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let entries = parse_journal_lines(&stdout, name);
        debug!(unit = name, count = entries.len(), "Read event history");
        Ok(entries)
    }
}

#[derive(Debug, Deserialize)]
struct JournalRecord {
    #[serde(rename = "__REALTIME_TIMESTAMP")]
    realtime_timestamp: Option<String>,
    #[serde(rename = "MESSAGE")]
    message: Option<serde_json::Value>,
    #[serde(rename = "PRIORITY")]
    priority: Option<String>,
    #[serde(rename = "SYSLOG_IDENTIFIER")]
    syslog_identifier: Option<String>,
}

/// Parse newline-delimited `journalctl -o json` records.
pub(crate) fn parse_journal_lines(stdout: &str, unit: &str) -> Vec<EventEntry> {
    stdout
        .lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| match serde_json::from_str::<JournalRecord>(line) {
            Ok(record) => Some(journal_record_to_entry(record, unit)),
            Err(e) => {
                warn!(unit, error = %e, "Skipping unparsable journal record");
                None
            }
        })
        .collect()
}

fn journal_record_to_entry(record: JournalRecord, unit: &str) -> EventEntry {
    // MESSAGE may be a string or, for binary payloads, an array of bytes;
    // only the string form is surfaced.
    let message = match record.message {
        Some(serde_json::Value::String(s)) => s,
        _ => String::new(),
    };

    let timestamp = record
        .realtime_timestamp
        .and_then(|usec| usec.parse::<i64>().ok())
        .and_then(DateTime::<Utc>::from_timestamp_micros);

    EventEntry {
        timestamp,
        unit: unit.to_string(),
        message,
        priority: record.priority.and_then(|p| p.parse().ok()),
        source: record.syslog_identifier,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_journal_lines() {
        let stdout = concat!(
            r#"{"__REALTIME_TIMESTAMP":"1724457600000000","MESSAGE":"Started OpenSSH server.","PRIORITY":"6","SYSLOG_IDENTIFIER":"systemd"}"#,
            "\n",
            r#"{"__REALTIME_TIMESTAMP":"1724457601000000","MESSAGE":"Accepted publickey for root","PRIORITY":"6","SYSLOG_IDENTIFIER":"sshd"}"#,
            "\n",
        );

        let entries = parse_journal_lines(stdout, "sshd.service");
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].message, "Started OpenSSH server.");
        assert_eq!(entries[0].priority, Some(6));
        assert_eq!(entries[0].source.as_deref(), Some("systemd"));
        assert_eq!(entries[0].unit, "sshd.service");
        assert!(entries[0].timestamp.is_some());
        assert!(entries[1].timestamp > entries[0].timestamp);
    }

    #[test]
    fn test_parse_journal_lines_skips_bad_records() {
        let stdout = "not json at all\n{\"MESSAGE\":\"ok\"}\n";
        let entries = parse_journal_lines(stdout, "cron.service");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].message, "ok");
        assert!(entries[0].timestamp.is_none());
    }

    #[test]
    fn test_binary_message_degrades_to_empty() {
        let stdout = r#"{"MESSAGE":[1,2,3],"PRIORITY":"4"}"#;
        let entries = parse_journal_lines(stdout, "x.service");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].message, "");
        assert_eq!(entries[0].priority, Some(4));
    }
}
