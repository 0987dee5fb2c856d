//! # Service Handlers
//!
//! HTTP handlers for listing, querying, and controlling background
//! services. Every control endpoint resolves the name pattern to a unique
//! resource first; the allow-list from configuration applies to this
//! resource kind only.

use axum::extract::{Path, State};
use axum::Json;
use tracing::{debug, info};

use super::{list_matching, resolve_unique, ActionResponse, RestartResponse, StatusResponse};
use crate::catalog::ResourceDescriptor;
use crate::lifecycle::{self, ActionOutcome};
use crate::web::errors::{ApiError, ApiResult};
use crate::web::state::AppState;

const KIND: &str = "services";

/// List all permitted services: GET /services
pub async fn list_all(State(state): State<AppState>) -> ApiResult<Json<Vec<ResourceDescriptor>>> {
    list(State(state), Path("*".to_string())).await
}

/// List services matching a wildcard: GET /services/:name
pub async fn list(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<Json<Vec<ResourceDescriptor>>> {
    let allow_list = state.service_allow_list();
    let matches = list_matching(state.services.as_ref(), &name, &allow_list).await?;
    debug!(pattern = %name, matched = matches.len(), "Listed services");
    Ok(Json(matches))
}

/// Status of a single service: GET /services/:name/status
pub async fn status(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<Json<StatusResponse>> {
    let allow_list = state.service_allow_list();
    let descriptor = resolve_unique(state.services.as_ref(), KIND, &name, &allow_list).await?;

    // The catalog snapshot may be moments old; re-read the live status for
    // the resolved unit.
    let current = state.services.status(&descriptor.name).await?;
    Ok(Json(StatusResponse {
        name: descriptor.name,
        status: current.to_string(),
    }))
}

/// Start a service: POST /services/:name/start
pub async fn start(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<Json<ActionResponse>> {
    let allow_list = state.service_allow_list();
    let descriptor = resolve_unique(state.services.as_ref(), KIND, &name, &allow_list).await?;

    match lifecycle::start(state.services.as_ref(), &descriptor.name).await? {
        ActionOutcome::Changed => {
            info!(name = %descriptor.name, "Service start requested");
            Ok(Json(ActionResponse {
                name: descriptor.name,
                action: "start".to_string(),
                message: "Started Successfully".to_string(),
            }))
        }
        ActionOutcome::AlreadyInState(message) => Err(ApiError::already_in_state(format!(
            "Service is {message}"
        ))),
    }
}

/// Stop a service: POST /services/:name/stop
pub async fn stop(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<Json<ActionResponse>> {
    let allow_list = state.service_allow_list();
    let descriptor = resolve_unique(state.services.as_ref(), KIND, &name, &allow_list).await?;

    match lifecycle::stop(state.services.as_ref(), &descriptor.name).await? {
        ActionOutcome::Changed => {
            info!(name = %descriptor.name, "Service stop requested");
            Ok(Json(ActionResponse {
                name: descriptor.name,
                action: "stop".to_string(),
                message: "Stopped Successfully".to_string(),
            }))
        }
        ActionOutcome::AlreadyInState(message) => Err(ApiError::already_in_state(format!(
            "Service is {message}"
        ))),
    }
}

/// Restart a service: POST /services/:name/restart
///
/// Runs the bounded restart state machine: stop, poll for the stopped
/// state under the configured timeout, then start. A timeout returns the
/// partial action report to the caller.
pub async fn restart(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<Json<RestartResponse>> {
    let allow_list = state.service_allow_list();
    let descriptor = resolve_unique(state.services.as_ref(), KIND, &name, &allow_list).await?;

    let options = state.restart_options();
    let report = lifecycle::restart(state.services.as_ref(), &descriptor.name, &options).await?;

    info!(name = %descriptor.name, actions = %report, "Service restarted");
    Ok(Json(RestartResponse {
        name: descriptor.name,
        message: "Restarted Successfully".to_string(),
        actions: report.steps().to_vec(),
    }))
}
