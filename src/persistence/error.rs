//! Storage error types

use thiserror::Error;

/// Failure writing to a record store
#[derive(Error, Debug)]
pub enum StorageError {
    /// The backend (LocalStorage, data directory) cannot be reached
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// The backend refused the write (quota, permissions)
    #[error("storage write failed: {0}")]
    Write(String),

    /// Record could not be encoded
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Filesystem error (native file store)
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl StorageError {
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }

    pub fn write(msg: impl Into<String>) -> Self {
        Self::Write(msg.into())
    }
}
