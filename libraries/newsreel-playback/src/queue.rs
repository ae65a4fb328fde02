//! Ordered play queue
//!
//! Insertion-ordered list of tracks with a cursor. Ids are unique; the
//! cursor is either unset or points at a valid entry. The queue never touches
//! the playback resource; the controller plays whatever navigation resolves to.

use newsreel_core::{Track, TrackId};

/// Ordered play queue with a current-position cursor
///
/// ```text
///   [A] [B] [C] [D]
///        ^
///   current_index = Some(1)
/// ```
#[derive(Debug, Clone, Default)]
pub struct Queue {
    tracks: Vec<Track>,
    current_index: Option<usize>,
}

impl Queue {
    /// Create new empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a track unless one with the same id is already queued
    ///
    /// Returns `true` if the track was added.
    pub fn enqueue(&mut self, track: Track) -> bool {
        if self.position_of(&track.id).is_some() {
            return false;
        }
        self.tracks.push(track);
        true
    }

    /// Make `track` the current entry
    ///
    /// Appends it if unseen, otherwise moves the cursor to its existing
    /// position. Returns the new current index.
    pub fn select(&mut self, track: Track) -> usize {
        let index = match self.position_of(&track.id) {
            Some(index) => index,
            None => {
                self.tracks.push(track);
                self.tracks.len() - 1
            }
        };
        self.current_index = Some(index);
        index
    }

    /// Replace the queued snapshot that shares `track.id`
    ///
    /// Returns `false` if no entry has that id.
    pub fn replace(&mut self, track: Track) -> bool {
        match self.position_of(&track.id) {
            Some(index) => {
                self.tracks[index] = track;
                true
            }
            None => false,
        }
    }

    /// Advance the cursor by one
    ///
    /// No-op (returns `None`) when already at the last entry.
    pub fn next(&mut self) -> Option<&Track> {
        let target = match self.current_index {
            Some(index) => index + 1,
            None => 0,
        };
        if target >= self.tracks.len() {
            return None;
        }
        self.current_index = Some(target);
        self.tracks.get(target)
    }

    /// Move the cursor back by one
    ///
    /// No-op (returns `None`) when at the first entry or nothing is selected.
    pub fn previous(&mut self) -> Option<&Track> {
        let target = self.current_index?.checked_sub(1)?;
        self.current_index = Some(target);
        self.tracks.get(target)
    }

    /// Whether `next()` would move the cursor
    pub fn has_next(&self) -> bool {
        match self.current_index {
            Some(index) => index + 1 < self.tracks.len(),
            None => !self.tracks.is_empty(),
        }
    }

    /// Whether `previous()` would move the cursor
    pub fn has_previous(&self) -> bool {
        matches!(self.current_index, Some(index) if index > 0)
    }

    /// Clear entire queue
    pub fn clear(&mut self) {
        self.tracks.clear();
        self.current_index = None;
    }

    /// Current entry
    pub fn current(&self) -> Option<&Track> {
        self.tracks.get(self.current_index?)
    }

    /// Cursor position (`None` when nothing is selected)
    pub fn current_index(&self) -> Option<usize> {
        self.current_index
    }

    /// Entry at `index`
    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    /// Position of the entry with `id`
    pub fn position_of(&self, id: &TrackId) -> Option<usize> {
        self.tracks.iter().position(|t| &t.id == id)
    }

    /// All entries in queue order
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Number of queued tracks
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Whether the queue is empty
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}
