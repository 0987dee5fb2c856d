//! # Web API Error Types
//!
//! Defines error types specific to the web API and their HTTP response
//! conversions. Leverages thiserror for structured error handling and
//! Axum's IntoResponse for HTTP conversion.
//!
//! Resolution outcomes (not-found, ambiguous) and idempotence
//! short-circuits surface here as early-return guards in the handlers;
//! they are client errors, never silent no-ops.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use crate::error::SvcgateError;
use crate::lifecycle::RestartError;

/// Web API specific errors with HTTP status code mappings
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{message}")]
    NotFound { message: String },

    #[error("{message}")]
    Ambiguous { message: String },

    /// Requested action is a no-op because the resource is already in (or
    /// transitioning toward) the target state.
    #[error("{message}")]
    AlreadyInState { message: String },

    /// The restart polling loop exceeded its configured bound. The message
    /// includes the partial action report so the caller knows what was
    /// attempted.
    #[error("{message}")]
    RestartTimeout { message: String },

    #[error("Invalid request: {message}")]
    BadRequest { message: String },

    /// The OS control API rejected the action.
    #[error("Control operation failed: {message}")]
    Control { message: String },

    #[error("Service temporarily unavailable")]
    ServiceUnavailable,

    #[error("Internal server error")]
    Internal,
}

impl ApiError {
    pub fn not_found(kind: &str, name: &str) -> Self {
        Self::NotFound {
            message: format!("name {name} was not found in {kind}"),
        }
    }

    pub fn ambiguous(kind: &str, name: &str, count: usize) -> Self {
        Self::Ambiguous {
            message: format!("name {name} matched {count} entries in {kind}; narrow the pattern"),
        }
    }

    pub fn already_in_state(message: impl Into<String>) -> Self {
        Self::AlreadyInState {
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    pub fn control(message: impl Into<String>) -> Self {
        Self::Control {
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status_code, error_code, message) = match &self {
            ApiError::NotFound { message } => {
                (StatusCode::NOT_FOUND, "NOT_FOUND", message.as_str())
            }

            ApiError::Ambiguous { message } => {
                (StatusCode::BAD_REQUEST, "AMBIGUOUS_NAME", message.as_str())
            }

            ApiError::AlreadyInState { message } => (
                StatusCode::BAD_REQUEST,
                "ALREADY_IN_STATE",
                message.as_str(),
            ),

            ApiError::RestartTimeout { message } => (
                StatusCode::BAD_REQUEST,
                "RESTART_TIMEOUT",
                message.as_str(),
            ),

            ApiError::BadRequest { message } => {
                (StatusCode::BAD_REQUEST, "BAD_REQUEST", message.as_str())
            }

            ApiError::Control { message } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "CONTROL_ERROR",
                message.as_str(),
            ),

            ApiError::ServiceUnavailable => (
                StatusCode::SERVICE_UNAVAILABLE,
                "SERVICE_UNAVAILABLE",
                "Service temporarily unavailable",
            ),

            ApiError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "Internal server error",
            ),
        };

        let error_response = json!({
            "error": {
                "code": error_code,
                "message": message
            }
        });

        (status_code, Json(error_response)).into_response()
    }
}

/// Collaborator failures are propagated as-is without retry.
impl From<SvcgateError> for ApiError {
    fn from(err: SvcgateError) -> Self {
        match err {
            SvcgateError::Collaborator(msg) => ApiError::control(msg),
            SvcgateError::Parse(msg) => ApiError::control(msg),
            SvcgateError::Io(e) => ApiError::control(e.to_string()),
            SvcgateError::Configuration(_) => ApiError::Internal,
        }
    }
}

impl From<RestartError> for ApiError {
    fn from(err: RestartError) -> Self {
        match err {
            RestartError::Timeout { .. } => ApiError::RestartTimeout {
                message: err.to_string(),
            },
            RestartError::Collaborator(inner) => inner.into(),
        }
    }
}

/// Result type alias for web API operations
pub type ApiResult<T> = Result<T, ApiError>;
