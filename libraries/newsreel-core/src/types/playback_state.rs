/// Playback state types
use serde::{Deserialize, Serialize};

/// Controller-level playback state
///
/// ```text
/// Idle -> Loading -> Buffering -> Playing <-> Paused
/// Playing/Paused -> Finished -> Idle
/// Loading/Buffering -> Failed -> Idle
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackState {
    /// Nothing bound
    #[default]
    Idle,
    /// Creating the playback resource
    Loading,
    /// Resource bound, waiting for enough data
    Buffering,
    /// Audio is playing
    Playing,
    /// Paused mid-track
    Paused,
    /// Track reached its end
    Finished,
    /// Resource creation failed
    Failed,
}

impl PlaybackState {
    /// Convert to string representation
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::Buffering => "buffering",
            Self::Playing => "playing",
            Self::Paused => "paused",
            Self::Finished => "finished",
            Self::Failed => "failed",
        }
    }

    /// Whether a resource is bound and producing (or about to produce) audio
    #[must_use]
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Buffering | Self::Playing | Self::Paused)
    }

    /// Terminal-per-track states that only a new switch can leave
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Finished | Self::Failed)
    }
}

impl std::fmt::Display for PlaybackState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Status reported by the platform for a bound playback resource
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaybackStatus {
    /// Whether the source finished loading
    pub is_loaded: bool,
    /// Current position in milliseconds
    pub position_ms: u64,
    /// Duration in milliseconds (0 when unknown)
    pub duration_ms: u64,
    /// Whether the platform is waiting for data
    pub is_buffering: bool,
    /// Whether audio is currently playing
    pub is_playing: bool,
    /// Set once, on the tick where playback reached the end
    pub did_just_finish: bool,
}

impl PlaybackStatus {
    /// Loaded, not buffering, and the duration is known
    pub fn is_ready(&self) -> bool {
        self.is_loaded && !self.is_buffering && self.duration_ms > 0
    }
}

/// Fraction of the track played, clamped to `[0, 1]`
///
/// Returns 0 when the duration is unknown.
pub fn progress_ratio(position_ms: u64, duration_ms: u64) -> f64 {
    if duration_ms == 0 {
        return 0.0;
    }
    (position_ms as f64 / duration_ms as f64).clamp(0.0, 1.0)
}
