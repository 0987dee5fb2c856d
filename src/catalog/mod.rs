//! # Resource Catalog
//!
//! Snapshot types for controllable OS work units and the collaborator traits
//! behind which the OS service manager and task scheduler sit. Descriptors
//! are created fresh on every catalog query, never mutated, and discarded
//! when the request completes; there is no caching layer.

pub mod journal;
pub mod systemd;
pub mod timers;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::Result;

/// Lifecycle state of a resource as reported by the OS collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceStatus {
    Stopped,
    StopPending,
    Running,
    StartPending,
    Paused,
    PausePending,
    Unknown,
}

impl ResourceStatus {
    /// Stopped or on its way there. Start treats these as "safe to start";
    /// stop treats them as "nothing to do".
    pub fn is_stop_adjacent(&self) -> bool {
        matches!(self, Self::Stopped | Self::StopPending)
    }

    /// Paused or transitioning into pause. Restart treats these like
    /// running: a stop must be issued first.
    pub fn is_pausing(&self) -> bool {
        matches!(self, Self::Paused | Self::PausePending)
    }
}

impl fmt::Display for ResourceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stopped => write!(f, "stopped"),
            Self::StopPending => write!(f, "stop_pending"),
            Self::Running => write!(f, "running"),
            Self::StartPending => write!(f, "start_pending"),
            Self::Paused => write!(f, "paused"),
            Self::PausePending => write!(f, "pause_pending"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

impl std::str::FromStr for ResourceStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "stopped" => Ok(Self::Stopped),
            "stop_pending" => Ok(Self::StopPending),
            "running" => Ok(Self::Running),
            "start_pending" => Ok(Self::StartPending),
            "paused" => Ok(Self::Paused),
            "pause_pending" => Ok(Self::PausePending),
            "unknown" => Ok(Self::Unknown),
            _ => Err(format!("Invalid resource status: {s}")),
        }
    }
}

/// Actions the collaborator reports as permissible for a resource.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Capabilities {
    pub can_stop: bool,
    pub can_pause_and_continue: bool,
    pub can_shutdown: bool,
}

/// Immutable snapshot of one controllable unit at query time.
///
/// `last_run`/`next_run` are scheduling enrichment only populated for task
/// resources; service descriptors leave them empty and they are omitted
/// from JSON output.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceDescriptor {
    pub name: String,
    pub display_name: String,
    pub status: ResourceStatus,
    pub capabilities: Capabilities,
    /// Units this resource requires or is required by, when the
    /// collaborator reports them. Empty for collaborators without a
    /// dependency concept (timers, in-memory fakes).
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub dependencies: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub last_run: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub next_run: Option<DateTime<Utc>>,
}

impl ResourceDescriptor {
    pub fn new(name: impl Into<String>, display_name: impl Into<String>, status: ResourceStatus) -> Self {
        Self {
            name: name.into(),
            display_name: display_name.into(),
            status,
            capabilities: Capabilities::default(),
            dependencies: Vec::new(),
            last_run: None,
            next_run: None,
        }
    }
}

/// One entry of a resource's event history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventEntry {
    pub timestamp: Option<DateTime<Utc>>,
    pub unit: String,
    pub message: String,
    pub priority: Option<u8>,
    pub source: Option<String>,
}

/// The OS collaborator controlling one kind of resource.
///
/// Implementations shell out to the platform's control API; tests substitute
/// an in-memory fake. The catalog is re-queried fresh per request, so
/// implementations hold no cross-request mutable state.
#[async_trait]
pub trait UnitManager: Send + Sync {
    /// Full set of resources reported by the collaborator right now.
    async fn catalog(&self) -> Result<Vec<ResourceDescriptor>>;

    /// Current status of a single named resource.
    async fn status(&self, name: &str) -> Result<ResourceStatus>;

    /// Issue a start command. Callers are expected to have applied the
    /// idempotence guard first; this is a raw pass-through.
    async fn start(&self, name: &str) -> Result<()>;

    /// Issue a stop command. Raw pass-through, same as `start`.
    async fn stop(&self, name: &str) -> Result<()>;
}

/// Read-through access to the OS event log for a named resource.
#[async_trait]
pub trait EventHistory: Send + Sync {
    async fn history(&self, name: &str, limit: usize) -> Result<Vec<EventEntry>>;
}
