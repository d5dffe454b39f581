//! Session store error types

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur reading or writing the session store
#[derive(Error, Debug)]
pub enum SessionError {
    /// I/O operation on the backing file failed
    #[error("Session file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Stored data could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Lock acquisition failed
    #[error("Lock error: {0}")]
    Lock(String),
}

impl From<serde_json::Error> for SessionError {
    fn from(err: serde_json::Error) -> Self {
        SessionError::Serialization(err.to_string())
    }
}

/// Result type alias for session store operations
pub type SessionResult<T> = Result<T, SessionError>;
