//! Document store errors

use rosterboard_common::Error;
use thiserror::Error;

/// Errors raised by document store backends
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Document not found: {0}")]
    NotFound(String),

    #[error("Document already exists: {0}")]
    AlreadyExists(String),

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Corrupt document: {0}")]
    Corrupt(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_) => {
                StoreError::Corrupt(err.to_string())
            }
            other => StoreError::Unavailable(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Corrupt(err.to_string())
    }
}

impl From<StoreError> for Error {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Unavailable(msg) => Error::StoreUnavailable(msg),
            StoreError::NotFound(path) => Error::NotFound(format!("Document {} not found", path)),
            StoreError::AlreadyExists(path) => {
                Error::Conflict(format!("Document {} already exists", path))
            }
            StoreError::InvalidPath(msg) => Error::Validation(msg),
            StoreError::Corrupt(msg) => Error::Internal(format!("Corrupt document: {}", msg)),
        }
    }
}
