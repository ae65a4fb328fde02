//! Error types for playback management

use thiserror::Error;

/// User-visible playback errors
///
/// Only these reach the caller. Everything else is recovered inside the
/// controller and reported as a [`RecoveredFault`].
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// The platform could not bind a resource for the track
    #[error("Could not play {uri}: {message}")]
    ResourceCreation {
        /// URI as supplied by the track
        uri: String,
        /// URI actually handed to the platform
        resolved_uri: String,
        /// Underlying platform message
        message: String,
    },

    /// The source does not advertise an audio content type
    #[error("Could not play {uri}: server returned non-audio content ({content_type})")]
    PreflightRejected {
        /// URI as supplied by the track
        uri: String,
        /// Content type reported by the server
        content_type: String,
    },

    /// Controller configuration is unusable
    #[error("Invalid playback configuration: {0}")]
    InvalidConfig(String),
}

impl PlaybackError {
    /// URI the error refers to, if any
    pub fn uri(&self) -> Option<&str> {
        match self {
            Self::ResourceCreation { uri, .. } | Self::PreflightRejected { uri, .. } => Some(uri),
            Self::InvalidConfig(_) => None,
        }
    }
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;

/// Failures the controller absorbs locally
///
/// Logged and published as events, never returned to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error, serde::Serialize)]
pub enum RecoveredFault {
    /// Readiness never confirmed; playback was started unconditionally
    #[error("Buffer readiness not confirmed for {uri}, started without it")]
    BufferTimeoutDegraded {
        /// URI handed to the platform
        uri: String,
    },

    /// A seek failed twice and was dropped
    #[error("Seek to {target_ms}ms dropped: {message}")]
    SeekDropped {
        /// Clamped target of the last attempt
        target_ms: u64,
        /// Platform message of the last attempt
        message: String,
    },

    /// Releasing the previous resource failed
    #[error("Unload of {track_id} failed: {message}")]
    UnloadFailed {
        /// Track whose resource was being released
        track_id: String,
        /// Platform message
        message: String,
    },

    /// The metadata service failed
    #[error("Metadata fetch for {track_id} failed: {message}")]
    MetadataFetchFailed {
        /// Track being enhanced
        track_id: String,
        /// Service message
        message: String,
    },

    /// Play history could not be recorded
    #[error("Recording play of {track_id} failed: {message}")]
    HistoryFailed {
        /// Track that started playing
        track_id: String,
        /// Recorder message
        message: String,
    },
}

impl RecoveredFault {
    /// Short machine-readable name used as the `fault` log field
    pub fn kind(&self) -> &'static str {
        match self {
            Self::BufferTimeoutDegraded { .. } => "buffer_timeout_degraded",
            Self::SeekDropped { .. } => "seek_transient",
            Self::UnloadFailed { .. } => "unload",
            Self::MetadataFetchFailed { .. } => "metadata_fetch",
            Self::HistoryFailed { .. } => "history",
        }
    }
}
