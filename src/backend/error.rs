//! Backend client error types

use thiserror::Error;

/// Errors raised while talking to a remote REST API
#[derive(Debug, Error)]
pub enum BackendError {
    /// The request never produced a response (DNS, connect, timeout...)
    #[error("request to {path} failed: {source}")]
    Transport {
        path: String,
        #[source]
        source: reqwest::Error,
    },

    /// The API answered with a non-success status
    #[error("{path} returned {status}: {message}")]
    Status {
        path: String,
        status: u16,
        message: String,
    },

    /// The response body did not match the expected shape
    #[error("failed to decode response from {path}: {message}")]
    Decode { path: String, message: String },

    /// A base URL or path could not be turned into a request URL
    #[error("invalid backend url: {0}")]
    InvalidUrl(String),

    /// A multipart part could not be built
    #[error("invalid form part '{field}': {message}")]
    InvalidForm { field: String, message: String },
}

impl BackendError {
    /// HTTP status returned by the API, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

pub type Result<T> = std::result::Result<T, BackendError>;
