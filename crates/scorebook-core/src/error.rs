//! Error types for the judging core

use thiserror::Error;

/// Errors raised by the in-memory store and the sync layer
#[derive(Error, Debug)]
pub enum StoreError {
    /// Identity failed format validation (checked before any mutation)
    #[error("Invalid id: {0}")]
    InvalidId(String),

    /// Team not found in the roster
    #[error("Team not found: {0}")]
    TeamNotFound(String),

    /// Judge not found in the roster
    #[error("Judge not found: {0}")]
    JudgeNotFound(String),

    /// A remote operation failed while connectivity was believed good
    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// Errors raised by a durable backend implementation
#[derive(Error, Debug)]
pub enum BackendError {
    /// Backend unreachable or connection lost
    #[error("Backend connection failed: {0}")]
    Connection(String),

    /// Backend accepted the connection but the operation failed
    #[error("Backend query failed: {0}")]
    Query(String),

    /// Backend reachable but the write was rejected for policy reasons
    #[error("Backend denied the write: {0}")]
    PermissionDenied(String),

    /// Record not found in the backend
    #[error("Record not found: {0}")]
    NotFound(String),

    /// Record could not be serialized or deserialized at the boundary
    #[error("Serialization failed: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for BackendError {
    fn from(err: serde_json::Error) -> Self {
        BackendError::Serialization(err.to_string())
    }
}
