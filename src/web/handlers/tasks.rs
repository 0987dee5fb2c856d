//! # Scheduled Task Handlers
//!
//! HTTP handlers for listing, querying, and controlling scheduled tasks,
//! plus the event-history read-through. Tasks are not allow-list filtered.

use axum::extract::{Path, State};
use axum::Json;
use tracing::{debug, info};

use super::{list_matching, resolve_unique, ActionResponse, StatusResponse};
use crate::catalog::{EventEntry, ResourceDescriptor};
use crate::lifecycle::{self, ActionOutcome};
use crate::web::errors::{ApiError, ApiResult};
use crate::web::state::AppState;

const KIND: &str = "scheduled tasks";

/// List all scheduled tasks: GET /tasks
pub async fn list_all(State(state): State<AppState>) -> ApiResult<Json<Vec<ResourceDescriptor>>> {
    list(State(state), Path("*".to_string())).await
}

/// List tasks matching a wildcard: GET /tasks/:name
pub async fn list(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<Json<Vec<ResourceDescriptor>>> {
    let allow_list = state.task_allow_list();
    let matches = list_matching(state.tasks.as_ref(), &name, &allow_list).await?;
    debug!(pattern = %name, matched = matches.len(), "Listed tasks");
    Ok(Json(matches))
}

/// Status of a single task: GET /tasks/:name/status
pub async fn status(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<Json<StatusResponse>> {
    let allow_list = state.task_allow_list();
    let descriptor = resolve_unique(state.tasks.as_ref(), KIND, &name, &allow_list).await?;

    let current = state.tasks.status(&descriptor.name).await?;
    Ok(Json(StatusResponse {
        name: descriptor.name,
        status: current.to_string(),
    }))
}

/// Start a task: POST /tasks/:name/start
pub async fn start(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<Json<ActionResponse>> {
    let allow_list = state.task_allow_list();
    let descriptor = resolve_unique(state.tasks.as_ref(), KIND, &name, &allow_list).await?;

    match lifecycle::start(state.tasks.as_ref(), &descriptor.name).await? {
        ActionOutcome::Changed => {
            info!(name = %descriptor.name, "Task start requested");
            Ok(Json(ActionResponse {
                name: descriptor.name,
                action: "start".to_string(),
                message: "Started Successfully".to_string(),
            }))
        }
        ActionOutcome::AlreadyInState(message) => {
            Err(ApiError::already_in_state(format!("Task is {message}")))
        }
    }
}

/// Stop a task: POST /tasks/:name/stop
pub async fn stop(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<Json<ActionResponse>> {
    let allow_list = state.task_allow_list();
    let descriptor = resolve_unique(state.tasks.as_ref(), KIND, &name, &allow_list).await?;

    match lifecycle::stop(state.tasks.as_ref(), &descriptor.name).await? {
        ActionOutcome::Changed => {
            info!(name = %descriptor.name, "Task stop requested");
            Ok(Json(ActionResponse {
                name: descriptor.name,
                action: "stop".to_string(),
                message: "Stopped Successfully".to_string(),
            }))
        }
        ActionOutcome::AlreadyInState(message) => {
            Err(ApiError::already_in_state(format!("Task is {message}")))
        }
    }
}

/// Past event-log history for a task: GET /tasks/:name/history
///
/// Pure read-through to the logging collaborator for the resolved unit.
pub async fn history(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<Json<Vec<EventEntry>>> {
    let allow_list = state.task_allow_list();
    let descriptor = resolve_unique(state.tasks.as_ref(), KIND, &name, &allow_list).await?;

    let entries = state
        .history
        .history(&descriptor.name, state.config.history_limit)
        .await?;
    debug!(name = %descriptor.name, entries = entries.len(), "Read task history");
    Ok(Json(entries))
}
