//! Newsreel - Playback Management
//!
//! Single-resource playback control for news episodes.
//!
//! This crate provides:
//! - Exclusive track switching (one platform resource at a time)
//! - Play/pause toggling, resume, stop, and clamped seeking
//! - A navigable play queue (next/previous)
//! - Periodic progress and buffering reporting
//! - Background metadata enhancement with staleness protection
//! - API-origin URI rebasing and a content-type preflight check
//! - Recent play history
//!
//! # Architecture
//!
//! `newsreel-playback` never touches audio itself. The platform media layer,
//! the metadata source, the history sink, and OS media controls are all
//! collaborators supplied through traits from `newsreel-core`.
//!
//! State is published through a `tokio::sync::watch` snapshot and a
//! broadcast stream of [`PlaybackEvent`]s.
//!
//! # Example
//!
//! ```rust,no_run
//! use newsreel_core::Track;
//! use newsreel_playback::{PlaybackConfig, PlaybackController, PlaybackServices};
//! # use std::sync::Arc;
//! # async fn example(platform: Arc<dyn newsreel_core::MediaPlatform>) -> newsreel_playback::Result<()> {
//!
//! let config = PlaybackConfig {
//!     api_origin: Some("https://api.example.com".to_string()),
//!     ..Default::default()
//! };
//! let controller = PlaybackController::new(config, PlaybackServices::new(platform))?;
//!
//! let track = Track::new("ep-1", "http://localhost:8080/audio/ep-1.mp3", "Morning Briefing");
//! controller.play(track.clone()).await?; // starts from zero
//! controller.play(track).await?; // toggles to paused
//! controller.seek(60_000).await;
//! # Ok(())
//! # }
//! ```

mod controller;
mod enhancer;
mod error;
mod events;
mod history;
mod merge;
mod preflight;
mod progress;
mod queue;
pub mod types;
pub mod uri;

// Public exports
pub use controller::{clamp_seek_target, PlaybackController, PlaybackServices};
pub use enhancer::MetadataEnhancer;
pub use error::{PlaybackError, RecoveredFault, Result};
pub use events::PlaybackEvent;
pub use history::RecentHistory;
pub use merge::{is_placeholder_title, merge_metadata};
pub use preflight::is_audio_content_type;
pub use progress::{apply_status, TickOutcome};
pub use queue::Queue;
pub use types::{PlaybackConfig, PlaybackSnapshot};
pub use uri::resolve_playback_uri;
