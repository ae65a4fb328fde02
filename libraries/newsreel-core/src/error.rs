/// Core error types for Newsreel collaborators
use thiserror::Error;

/// Result type alias using `MediaError`
pub type Result<T> = std::result::Result<T, MediaError>;

/// Error reported by a platform media layer or an external collaborator
#[derive(Error, Debug)]
pub enum MediaError {
    /// The platform media layer refused or failed an operation
    #[error("Platform error: {0}")]
    Platform(String),

    /// Network failure talking to a remote collaborator
    #[error("Network error: {0}")]
    Network(String),

    /// The operation is not supported by this implementation
    #[error("Unsupported operation: {0}")]
    Unsupported(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Serialization errors
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    /// Other errors
    #[error("{0}")]
    Other(String),
}

impl MediaError {
    /// Create a platform error
    pub fn platform(msg: impl Into<String>) -> Self {
        Self::Platform(msg.into())
    }

    /// Create a network error
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}
