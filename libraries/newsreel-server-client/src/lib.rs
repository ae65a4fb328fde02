//! Newsreel Server Client
//!
//! HTTP implementations of the collaborators the playback controller
//! consumes.
//!
//! # Features
//!
//! - **Episode metadata**: `GET /api/episodes/{id}` (implements `MetadataService`)
//! - **Play history**: `POST /api/history` (implements `HistoryRecorder`)
//! - **Content probe**: HEAD with a ranged-GET fallback (implements `ContentProbe`)
//!
//! # Example
//!
//! ```ignore
//! use newsreel_playback::{PlaybackConfig, PlaybackController, PlaybackServices};
//! use newsreel_server_client::{NewsreelClient, ServerConfig};
//! use std::sync::Arc;
//!
//! let client = Arc::new(NewsreelClient::new(ServerConfig::new("https://api.example.com"))?);
//! let services = PlaybackServices::new(platform)
//!     .with_probe(client.clone())
//!     .with_metadata(client.clone())
//!     .with_history(client);
//! let controller = PlaybackController::new(PlaybackConfig::default(), services)?;
//! ```

mod client;
mod collaborators;
mod episodes;
mod error;
mod history;
mod probe;
mod types;

// Re-export main types
pub use client::NewsreelClient;
pub use error::{Result, ServerClientError};
pub use probe::media_type;
pub use types::{EpisodeChapter, EpisodeResponse, HistoryRequest, ServerConfig};

// Re-export sub-clients for direct use if needed
pub use episodes::EpisodeClient;
pub use history::HistoryClient;
pub use probe::ProbeClient;
