//! Core types for playback management

use newsreel_core::{progress_ratio, PlaybackState, Track};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the playback controller
///
/// Every timing constant of the switch sequence lives here so hosts can tune
/// them without touching the controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Canonical API origin (scheme/host/port) used to rebase unreachable URIs
    pub api_origin: Option<String>,

    /// Check the content type before binding a resource (default: true)
    pub preflight_enabled: bool,

    /// Pause between readiness and start, lets the output pipeline settle (default: 150ms)
    pub preroll_delay_ms: u64,

    /// Delay before the single readiness re-check (default: 250ms)
    pub readiness_retry_delay_ms: u64,

    /// Start position drift tolerated before a corrective seek (default: 10ms)
    pub start_drift_tolerance_ms: u64,

    /// Seeks are clamped this far before the end of the track (default: 10ms)
    pub seek_end_margin_ms: u64,

    /// Delay before the single seek retry (default: 150ms)
    pub seek_retry_delay_ms: u64,

    /// Target interval of the platform status callback (default: 250ms)
    pub status_interval_ms: u64,

    /// Titles treated as "no title yet" by the metadata merge
    pub placeholder_titles: Vec<String>,

    /// Size of the in-memory play history (default: 50)
    pub history_size: usize,
}

impl PlaybackConfig {
    /// Preroll delay as a Duration
    pub fn preroll_delay(&self) -> Duration {
        Duration::from_millis(self.preroll_delay_ms)
    }

    /// Readiness retry delay as a Duration
    pub fn readiness_retry_delay(&self) -> Duration {
        Duration::from_millis(self.readiness_retry_delay_ms)
    }

    /// Seek retry delay as a Duration
    pub fn seek_retry_delay(&self) -> Duration {
        Duration::from_millis(self.seek_retry_delay_ms)
    }

    /// Status callback interval as a Duration
    pub fn status_interval(&self) -> Duration {
        Duration::from_millis(self.status_interval_ms)
    }
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            api_origin: None,
            preflight_enabled: true,
            preroll_delay_ms: 150,
            readiness_retry_delay_ms: 250,
            start_drift_tolerance_ms: 10,
            seek_end_margin_ms: 10,
            seek_retry_delay_ms: 150,
            status_interval_ms: 250,
            placeholder_titles: vec![
                "Untitled".to_string(),
                "Loading…".to_string(),
                "Loading...".to_string(),
            ],
            history_size: 50,
        }
    }
}

/// Everything observers can read about playback
///
/// Published through a `watch` channel; readers never write.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PlaybackSnapshot {
    /// Controller state
    pub state: PlaybackState,

    /// Track bound to the resource, if any
    pub current_track: Option<Track>,

    /// Playhead in milliseconds
    pub position_ms: u64,

    /// Best known duration in milliseconds (0 when unknown)
    pub duration_ms: u64,

    /// `position_ms / duration_ms`, clamped to `[0, 1]`
    pub progress: f64,

    /// Whether the platform reported buffering on the last tick
    pub is_buffering: bool,

    /// Most recent user-facing error message
    pub last_error: Option<String>,
}

impl PlaybackSnapshot {
    /// Id of the current track
    pub fn current_track_id(&self) -> Option<&str> {
        self.current_track.as_ref().map(|t| t.id.as_str())
    }

    /// Set the playhead and recompute progress
    pub fn set_position(&mut self, position_ms: u64) {
        self.position_ms = position_ms;
        self.progress = progress_ratio(self.position_ms, self.duration_ms);
    }

    /// Set the duration and recompute progress
    pub fn set_duration(&mut self, duration_ms: u64) {
        self.duration_ms = duration_ms;
        self.progress = progress_ratio(self.position_ms, self.duration_ms);
    }

    /// Zero position, duration, and progress
    pub fn reset_timeline(&mut self) {
        self.position_ms = 0;
        self.duration_ms = 0;
        self.progress = 0.0;
        self.is_buffering = false;
    }
}
