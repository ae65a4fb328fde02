//! Playback Events
//!
//! Event-based communication for UI synchronization. Events are emitted at
//! key points:
//! - State changes (loading, playing, paused, finished, failed)
//! - Track changes (once a switch binds the new resource)
//! - Position updates (every status tick)
//! - Metadata arriving after playback started
//! - Locally recovered faults

use crate::error::RecoveredFault;
use newsreel_core::PlaybackState;
use serde::Serialize;

/// Events emitted by the playback controller
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum PlaybackEvent {
    /// Controller state changed
    StateChanged {
        /// The new playback state
        state: PlaybackState,
    },

    /// A new track became current
    TrackChanged {
        /// ID of the new (current) track
        track_id: String,
        /// ID of the previous track (if any)
        previous_track_id: Option<String>,
    },

    /// Position update from the platform status callback
    PositionUpdate {
        /// Current playback position
        position_ms: u64,
        /// Total track duration
        duration_ms: u64,
        /// Clamped progress ratio
        progress: f64,
    },

    /// Background metadata was merged into the current track
    MetadataUpdated {
        /// ID of the enriched track
        track_id: String,
    },

    /// Metadata loading ended for the current track (success or not)
    MetadataLoadingFinished {
        /// ID of the track
        track_id: String,
    },

    /// Track finished playing naturally (reached end)
    TrackFinished {
        /// ID of the finished track
        track_id: String,
    },

    /// Queue changed
    QueueChanged {
        /// New queue length
        length: usize,
        /// Cursor position
        current_index: Option<usize>,
    },

    /// A failure was absorbed without interrupting playback
    Degraded {
        /// What went wrong
        fault: RecoveredFault,
    },

    /// User-facing error
    Error {
        /// Error message
        message: String,
    },
}

impl PlaybackEvent {
    /// Short event name, handy for host event buses (`playback:<name>`)
    pub fn name(&self) -> &'static str {
        match self {
            Self::StateChanged { .. } => "state-changed",
            Self::TrackChanged { .. } => "track-changed",
            Self::PositionUpdate { .. } => "position-updated",
            Self::MetadataUpdated { .. } => "metadata-updated",
            Self::MetadataLoadingFinished { .. } => "metadata-loading-finished",
            Self::TrackFinished { .. } => "track-finished",
            Self::QueueChanged { .. } => "queue-changed",
            Self::Degraded { .. } => "degraded",
            Self::Error { .. } => "error",
        }
    }
}
