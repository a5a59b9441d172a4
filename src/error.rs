//! Error types for the tree table pipeline.

use crate::types::RecordId;
use thiserror::Error;

/// Errors surfaced by the pipeline, the session, and its collaborators.
#[derive(Error, Debug)]
pub enum ApiError {
    /// A record's ancestry loops back to itself.
    #[error("Cyclic hierarchy detected at record {id}")]
    CyclicHierarchy { id: RecordId },

    /// Shared session state was used before a session was installed.
    #[error("Table session not initialized: callbacks must be wired to an installed session")]
    SessionNotInitialized,

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Data source error: {0}")]
    DataSource(String),

    #[error("Navigation error: {0}")]
    Navigation(String),

    #[error("Invalid command: {0}")]
    InvalidCommand(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::DataSource(format!("JSON: {}", err))
    }
}

impl From<serde_yaml::Error> for ApiError {
    fn from(err: serde_yaml::Error) -> Self {
        ApiError::DataSource(format!("YAML: {}", err))
    }
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}
