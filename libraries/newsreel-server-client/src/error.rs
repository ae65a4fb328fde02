//! Error types for the Newsreel API client.

use newsreel_core::MediaError;
use thiserror::Error;

/// Errors that can occur when talking to the Newsreel API.
#[derive(Error, Debug)]
pub enum ServerClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server returned an error response
    #[error("Server error ({status}): {message}")]
    ServerError { status: u16, message: String },

    /// Authentication required but missing or rejected
    #[error("Authentication required")]
    AuthRequired,

    /// Invalid server URL
    #[error("Invalid server URL: {0}")]
    InvalidUrl(String),

    /// Failed to parse server response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Server is offline or unreachable
    #[error("Server unreachable: {0}")]
    ServerUnreachable(String),
}

impl ServerClientError {
    /// Map a transport error, singling out connection failures
    pub(crate) fn from_send(e: reqwest::Error) -> Self {
        if e.is_connect() {
            Self::ServerUnreachable(e.to_string())
        } else {
            Self::Request(e)
        }
    }
}

impl From<ServerClientError> for MediaError {
    fn from(e: ServerClientError) -> Self {
        match e {
            ServerClientError::Request(_)
            | ServerClientError::ServerError { .. }
            | ServerClientError::ServerUnreachable(_) => MediaError::Network(e.to_string()),
            ServerClientError::InvalidUrl(_) => MediaError::InvalidInput(e.to_string()),
            ServerClientError::AuthRequired | ServerClientError::ParseError(_) => {
                MediaError::Other(e.to_string())
            }
        }
    }
}

/// Result type for server client operations.
pub type Result<T> = std::result::Result<T, ServerClientError>;
