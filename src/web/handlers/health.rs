//! # Health Check Handlers
//!
//! Kubernetes-compatible health check endpoints for monitoring and load
//! balancing.

use axum::extract::State;
use axum::Json;
use serde::Serialize;
use std::collections::HashMap;
use tracing::debug;

use crate::catalog::UnitManager;
use crate::web::errors::ApiError;
use crate::web::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
pub struct HealthCheck {
    pub status: String,
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DetailedHealthResponse {
    pub status: String,
    pub timestamp: String,
    pub checks: HashMap<String, HealthCheck>,
}

/// Basic health check endpoint: GET /health
///
/// Always available; returns OK if the process is serving requests.
pub async fn basic_health(_state: State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

/// Kubernetes liveness probe: GET /health/live
pub async fn liveness_probe(_state: State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "alive".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

/// Kubernetes readiness probe: GET /health/ready
///
/// Ready means both OS collaborators answer a catalog query.
pub async fn readiness_probe(
    State(state): State<AppState>,
) -> Result<Json<DetailedHealthResponse>, ApiError> {
    debug!("Performing readiness probe");

    let mut checks = HashMap::new();
    let mut overall_healthy = true;

    let services_check = check_collaborator(state.services.as_ref()).await;
    overall_healthy = overall_healthy && services_check.status == "healthy";
    checks.insert("service_manager".to_string(), services_check);

    let tasks_check = check_collaborator(state.tasks.as_ref()).await;
    overall_healthy = overall_healthy && tasks_check.status == "healthy";
    checks.insert("task_scheduler".to_string(), tasks_check);

    let response = DetailedHealthResponse {
        status: if overall_healthy { "ready" } else { "not_ready" }.to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        checks,
    };

    if overall_healthy {
        Ok(Json(response))
    } else {
        Err(ApiError::ServiceUnavailable)
    }
}

async fn check_collaborator(manager: &dyn UnitManager) -> HealthCheck {
    match manager.catalog().await {
        Ok(_) => HealthCheck {
            status: "healthy".to_string(),
            message: None,
        },
        Err(e) => HealthCheck {
            status: "unhealthy".to_string(),
            message: Some(e.to_string()),
        },
    }
}
