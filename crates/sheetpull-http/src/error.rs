//! Transport error types

use std::time::Duration;

use thiserror::Error;

/// Why a single download attempt failed
#[derive(Debug, Error)]
pub enum TransportError {
    /// HTTP client error (connection, TLS, body read)
    #[error("HTTP error: {0}")]
    Http(#[source] reqwest::Error),

    /// Server answered with a non-success status
    #[error("HTTP status {0}")]
    Status(u16),

    /// Server answered with a zero-length body
    #[error("Response body was empty")]
    EmptyBody,

    /// The attempt exceeded its time limit
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// The HTTP client could not be configured
    #[error("Client configuration error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        if let Some(status) = e.status() {
            TransportError::Status(status.as_u16())
        } else {
            TransportError::Http(e)
        }
    }
}
