//! In-memory play history
//!
//! Bounded record of recently played track ids for hosts that have no
//! history backend.

use async_trait::async_trait;
use newsreel_core::{HistoryRecorder, TrackId};
use std::collections::VecDeque;
use std::sync::Mutex;

/// Play history with bounded size
///
/// Ring buffer that automatically discards the oldest entries. Replaying a
/// track moves it to the most-recent end instead of duplicating it.
#[derive(Debug)]
pub struct RecentHistory {
    /// History buffer (most recent = back)
    entries: Mutex<VecDeque<TrackId>>,

    /// Maximum history size
    max_size: usize,
}

impl RecentHistory {
    /// Create new history with specified maximum size
    pub fn new(max_size: usize) -> Self {
        Self {
            entries: Mutex::new(VecDeque::with_capacity(max_size)),
            max_size,
        }
    }

    fn entries(&self) -> std::sync::MutexGuard<'_, VecDeque<TrackId>> {
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Add a track id to history
    ///
    /// If history is full, the oldest id is discarded
    pub fn push(&self, track_id: TrackId) {
        if self.max_size == 0 {
            return;
        }
        let mut entries = self.entries();
        if let Some(pos) = entries.iter().position(|id| id == &track_id) {
            entries.remove(pos);
        }
        if entries.len() >= self.max_size {
            entries.pop_front();
        }
        entries.push_back(track_id);
    }

    /// Most recently played id
    pub fn last(&self) -> Option<TrackId> {
        self.entries().back().cloned()
    }

    /// All ids, oldest first
    pub fn get_all(&self) -> Vec<TrackId> {
        self.entries().iter().cloned().collect()
    }

    /// Get number of ids in history
    pub fn len(&self) -> usize {
        self.entries().len()
    }

    /// Check if history is empty
    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    /// Clear all history
    pub fn clear(&self) {
        self.entries().clear();
    }

    /// Get maximum history size
    pub fn max_size(&self) -> usize {
        self.max_size
    }
}

impl Default for RecentHistory {
    fn default() -> Self {
        Self::new(50)
    }
}

#[async_trait]
impl HistoryRecorder for RecentHistory {
    async fn record_play(&self, track_id: &TrackId) -> newsreel_core::Result<()> {
        self.push(track_id.clone());
        Ok(())
    }
}
