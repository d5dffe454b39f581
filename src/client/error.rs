//! Admin API error types

use thiserror::Error;

/// Errors that can occur when calling the admin API
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Admin API unavailable")]
    Unavailable,

    #[error("Request timeout")]
    Timeout,

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Unexpected response body: {0}")]
    Decode(String),
}

impl ApiError {
    /// Classify a reqwest send error the way the flows care about
    pub(crate) fn from_send(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Timeout
        } else if err.is_connect() {
            ApiError::Unavailable
        } else {
            ApiError::Request(err)
        }
    }

    /// HTTP status, when the server answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Request(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Whether the server rejected the bearer token
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }
}
