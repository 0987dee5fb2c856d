//! Request handlers for the web API.

pub mod health;
pub mod services;
pub mod tasks;

use serde::Serialize;

use crate::catalog::{ResourceDescriptor, UnitManager};
use crate::resolve::{self, AllowList, Anchor, ResolutionOutcome};
use crate::web::errors::ApiError;

/// Status of a single matched resource.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub name: String,
    pub status: String,
}

/// Outcome of a single start/stop action.
#[derive(Debug, Serialize)]
pub struct ActionResponse {
    pub name: String,
    pub action: String,
    pub message: String,
}

/// Outcome of a restart, with the accumulated step labels.
#[derive(Debug, Serialize)]
pub struct RestartResponse {
    pub name: String,
    pub message: String,
    pub actions: Vec<String>,
}

/// Resolve a name pattern to exactly one resource, or fail the request.
///
/// Every control endpoint goes through this guard first: not-found and
/// ambiguous outcomes early-return as client errors instead of letting the
/// handler proceed on a bad match set. Single-resource operations use full
/// anchoring so an exact name is never ambiguous with its own prefix.
pub(crate) async fn resolve_unique(
    manager: &dyn UnitManager,
    kind: &str,
    pattern: &str,
    allow_list: &AllowList,
) -> Result<ResourceDescriptor, ApiError> {
    let catalog = manager.catalog().await?;
    match resolve::resolve(pattern, Anchor::Full, catalog, allow_list) {
        ResolutionOutcome::NotFound => Err(ApiError::not_found(kind, pattern)),
        ResolutionOutcome::Ambiguous(count) => Err(ApiError::ambiguous(kind, pattern, count)),
        ResolutionOutcome::Unique(descriptor) => Ok(descriptor),
    }
}

/// List the catalog subset matching a pattern; listing uses start anchoring.
pub(crate) async fn list_matching(
    manager: &dyn UnitManager,
    pattern: &str,
    allow_list: &AllowList,
) -> Result<Vec<ResourceDescriptor>, ApiError> {
    let catalog = manager.catalog().await?;
    Ok(resolve::find_matches(
        pattern,
        Anchor::Start,
        catalog,
        allow_list,
    ))
}
