/// Collaborator traits consumed by the playback controller
use crate::error::Result;
use crate::types::{PlaybackStatus, Track, TrackId, TrackMetadata};
use async_trait::async_trait;
use std::time::Duration;

/// Callback receiving periodic status updates from a bound resource
pub type StatusListener = Box<dyn Fn(PlaybackStatus) + Send + Sync>;

/// Platform media layer able to bind playback resources
///
/// Decoding and output are entirely the platform's business. The controller
/// only ever holds one handle at a time and always unloads the previous one
/// before asking for a new one.
#[async_trait]
pub trait MediaPlatform: Send + Sync {
    /// Bind a new playback resource to `uri` without starting playback
    ///
    /// # Errors
    /// Returns an error if the platform refuses the source
    async fn create(&self, uri: &str) -> Result<Box<dyn MediaHandle>>;
}

/// A bound playback resource
#[async_trait]
pub trait MediaHandle: Send + Sync {
    /// Query the current status
    async fn status(&self) -> Result<PlaybackStatus>;

    /// Start or resume playback at the current position
    async fn play(&self) -> Result<()>;

    /// Start playback from an explicit position
    async fn play_from(&self, position_ms: u64) -> Result<()>;

    /// Pause playback
    async fn pause(&self) -> Result<()>;

    /// Move the playhead
    async fn seek(&self, position_ms: u64) -> Result<()>;

    /// Release the resource
    ///
    /// The handle must not be used afterwards, whether or not this succeeds.
    async fn unload(&self) -> Result<()>;

    /// Install (or remove, with `None`) the periodic status callback
    ///
    /// `interval` is a target; platforms may deliver updates less often.
    fn set_status_listener(&self, interval: Duration, listener: Option<StatusListener>);
}

/// Remote source of rich track metadata
#[async_trait]
pub trait MetadataService: Send + Sync {
    /// Fetch metadata for a track
    ///
    /// Returns `Ok(None)` when the service has nothing for this id.
    async fn get_by_id(
        &self,
        track_id: &TrackId,
        auth_token: Option<&str>,
    ) -> Result<Option<TrackMetadata>>;
}

/// Play-history sink
#[async_trait]
pub trait HistoryRecorder: Send + Sync {
    /// Record that a track started playing
    async fn record_play(&self, track_id: &TrackId) -> Result<()>;
}

/// What the OS media controls should show
#[derive(Debug, Clone, Copy)]
pub struct NowPlaying<'a> {
    /// Track being played
    pub track: &'a Track,
    /// Current position in milliseconds
    pub position_ms: u64,
    /// Duration in milliseconds (0 when unknown)
    pub duration_ms: u64,
    /// Whether audio is playing
    pub is_playing: bool,
}

/// Bridge to OS-level media controls (lock screen, notification shade)
///
/// Called from the status loop on every tick, so implementations must return
/// quickly and never block.
pub trait MediaControlBridge: Send + Sync {
    /// Publish the now-playing state
    fn update_now_playing(&self, now_playing: &NowPlaying<'_>) -> Result<()>;

    /// Clear the now-playing entry
    fn clear(&self) -> Result<()> {
        Ok(())
    }
}

/// Lightweight existence / content-type check for a remote URI
#[async_trait]
pub trait ContentProbe: Send + Sync {
    /// Return the media type advertised for `uri`, if any
    ///
    /// # Errors
    /// Returns an error when the URI could not be reached
    async fn content_type(&self, uri: &str) -> Result<Option<String>>;
}
