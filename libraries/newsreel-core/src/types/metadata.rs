/// Rich metadata fetched for a track after playback starts
use crate::types::Chapter;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Fields the metadata service can fill in for a track
///
/// Every field is optional; a missing field means "unknown", never "clear it".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackMetadata {
    /// Display title
    #[serde(default)]
    pub title: Option<String>,

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
}

impl TrackMetadata {
    /// Whether the response carries nothing usable
    pub fn is_empty(&self) -> bool {
        fn blank(value: &Option<String>) -> bool {
            value.as_deref().map_or(true, |s| s.trim().is_empty())
        }

        blank(&self.title)
            && blank(&self.script)
            && self.chapters.as_ref().map_or(true, Vec::is_empty)
            && blank(&self.source_name)
            && self.published_at.is_none()
            && blank(&self.image_url)
    }
}
