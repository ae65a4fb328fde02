//! Types for Newsreel API requests and responses.

use chrono::{DateTime, Utc};
use newsreel_core::{Chapter, TrackMetadata};
use serde::{Deserialize, Serialize};

/// Configuration for connecting to the Newsreel API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Base URL of the API (e.g., "https://api.newsreel.example")
    pub url: String,
    /// Bearer token sent with metadata and history requests
    pub access_token: Option<String>,
}

impl ServerConfig {
    /// Create a new server config with just the URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            access_token: None,
        }
    }

    /// Create a config with an existing token.
    pub fn with_token(url: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            access_token: Some(access_token.into()),
        }
    }
}

// =============================================================================
// Episode Types
// =============================================================================

/// Chapter as returned by the episodes endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EpisodeChapter {
    pub id: String,
    pub title: String,
    pub start_ms: u64,
    pub end_ms: u64,
    pub original_url: String,
    #[serde(default)]
    pub source_name: Option<String>,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
}

impl From<EpisodeChapter> for Chapter {
    fn from(c: EpisodeChapter) -> Self {
        Self {
            id: c.id,
            title: c.title,
            start_ms: c.start_ms,
            end_ms: c.end_ms,
            original_url: c.original_url,
            source_name: c.source_name,
            thumbnail_url: c.thumbnail_url,
        }
    }
}

/// Response body of `GET /api/episodes/{id}`.
///
/// Every field is optional; the server only returns what it has generated
/// so far.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EpisodeResponse {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub script: Option<String>,
    #[serde(default)]
    pub chapters: Option<Vec<EpisodeChapter>>,
    #[serde(default)]
    pub source_name: Option<String>,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl From<EpisodeResponse> for TrackMetadata {
    fn from(episode: EpisodeResponse) -> Self {
        Self {
            title: episode.title,
            script: episode.script,
            chapters: episode
                .chapters
                .map(|chapters| chapters.into_iter().map(Chapter::from).collect()),
            source_name: episode.source_name,
            published_at: episode.published_at,
            image_url: episode.image_url,
        }
    }
}

// =============================================================================
// History Types
// =============================================================================

/// Request body for `POST /api/history`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryRequest {
    pub track_id: String,
}
