//! Crate-level error types shared by the catalog collaborators, the
//! lifecycle controller, and the server bootstrap.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SvcgateError {
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The OS control API rejected or failed an action. Propagated as-is:
    /// retrying a permission or dependency failure cannot succeed without
    /// external intervention.
    #[error("control command failed: {0}")]
    Collaborator(String),

    #[error("failed to parse collaborator output: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SvcgateError {
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    pub fn collaborator(msg: impl Into<String>) -> Self {
        Self::Collaborator(msg.into())
    }

    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, SvcgateError>;
