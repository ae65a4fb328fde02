/// Track domain type
use crate::types::TrackId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A chapter inside a synthesized episode
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chapter {
    /// Chapter identifier (usually the source article id)
    pub id: String,

    /// Chapter title
    pub title: String,

    /// Start offset in milliseconds
    pub start_ms: u64,

    /// End offset in milliseconds
    pub end_ms: u64,

    /// URL of the article the chapter was generated from
    pub original_url: String,

    /// Publisher of the source article
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_name: Option<String>,

    /// Thumbnail for the chapter
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
}

impl Chapter {
    /// Create a chapter without source name or thumbnail
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        start_ms: u64,
        end_ms: u64,
        original_url: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            start_ms,
            end_ms,
            original_url: original_url.into(),
            source_name: None,
            thumbnail_url: None,
        }
    }

    /// Whether `position_ms` falls inside `[start_ms, end_ms)`
    pub fn contains(&self, position_ms: u64) -> bool {
        position_ms >= self.start_ms && position_ms < self.end_ms
    }
}

/// Playable episode audio with optional rich metadata
///
/// Tracks are immutable snapshots: consumers replace the whole value when
/// something changes instead of mutating a shared instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    /// Stable track identifier
    pub id: TrackId,

    /// Playable source location
    pub uri: String,

    /// Display title
    pub title: String,

    /// Known duration; superseded once the platform reports a real one
    #[serde(default)]
    pub duration_ms: Option<u64>,

    /// Transcript text
    #[serde(default)]
    pub script: Option<String>,

    /// Ordered chapter list
    #[serde(default)]
    pub chapters: Option<Vec<Chapter>>,

    /// Publisher name
    #[serde(default)]
    pub source_name: Option<String>,

    /// Publication time
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,

    /// Cover image
    #[serde(default)]
    pub image_url: Option<String>,

    /// Set while rich metadata is being fetched in the background
    #[serde(default)]
    pub metadata_loading: bool,
}

impl Track {
    /// Create a track with only the required fields
    pub fn new(id: impl Into<TrackId>, uri: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            uri: uri.into(),
            title: title.into(),
            duration_ms: None,
            script: None,
            chapters: None,
            source_name: None,
            published_at: None,
            image_url: None,
            metadata_loading: false,
        }
    }

    /// Set the known duration
    #[must_use]
    pub fn with_duration_ms(mut self, duration_ms: u64) -> Self {
        self.duration_ms = Some(duration_ms);
        self
    }

    /// Set the transcript
    #[must_use]
    pub fn with_script(mut self, script: impl Into<String>) -> Self {
        self.script = Some(script.into());
        self
    }

    /// Set the chapter list
    #[must_use]
    pub fn with_chapters(mut self, chapters: Vec<Chapter>) -> Self {
        self.chapters = Some(chapters);
        self
    }

    /// Set the publisher name
    #[must_use]
    pub fn with_source_name(mut self, source_name: impl Into<String>) -> Self {
        self.source_name = Some(source_name.into());
        self
    }

    /// Get the known duration as a Duration
    pub fn duration(&self) -> Option<Duration> {
        self.duration_ms.map(Duration::from_millis)
    }

    /// Whether the transcript is missing or blank
    pub fn script_is_empty(&self) -> bool {
        self.script.as_deref().map_or(true, |s| s.trim().is_empty())
    }

    /// Whether the chapter list is missing or empty
    pub fn chapters_are_empty(&self) -> bool {
        self.chapters.as_ref().map_or(true, Vec::is_empty)
    }

    /// Whether rich metadata should be fetched for this track
    ///
    /// True when either the script or the chapter list is missing.
    pub fn needs_enhancement(&self) -> bool {
        self.script_is_empty() || self.chapters_are_empty()
    }

    /// Chapter playing at `position_ms`, if any
    pub fn chapter_at(&self, position_ms: u64) -> Option<&Chapter> {
        self.chapters
            .as_deref()?
            .iter()
            .find(|chapter| chapter.contains(position_ms))
    }
}
