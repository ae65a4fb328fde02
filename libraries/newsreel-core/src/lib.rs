//! Newsreel Core
//!
//! Platform-agnostic types, collaborator traits, and error handling shared by
//! the Newsreel playback stack.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Track`, `Chapter`, `TrackMetadata`, `PlaybackState`, `PlaybackStatus`
//! - **Collaborator Traits**: `MediaPlatform`, `MediaHandle`, `MetadataService`,
//!   `HistoryRecorder`, `MediaControlBridge`, `ContentProbe`
//! - **Error Handling**: `MediaError` and `Result`
//!
//! # Example
//!
//! ```rust
//! use newsreel_core::{Chapter, Track};
//!
//! let track = Track::new("ep-42", "https://api.example.com/audio/ep-42.mp3", "Morning Briefing")
//!     .with_duration_ms(180_000)
//!     .with_chapters(vec![Chapter::new("c1", "Markets", 0, 60_000, "https://example.com/a")]);
//!
//! assert!(track.needs_enhancement());
//! assert_eq!(track.chapter_at(30_000).map(|c| c.title.as_str()), Some("Markets"));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod traits;
pub mod types;

pub use error::{MediaError, Result};
pub use traits::{
    ContentProbe, HistoryRecorder, MediaControlBridge, MediaHandle, MediaPlatform,
    MetadataService, NowPlaying, StatusListener,
};
pub use types::{
    progress_ratio, Chapter, PlaybackState, PlaybackStatus, Track, TrackId, TrackMetadata,
};
