//! Metadata merge policy
//!
//! Fetched metadata only ever fills gaps. A non-empty field on the current
//! track is never replaced, and an empty fetched field never clears anything.

use newsreel_core::{Track, TrackMetadata};

fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |s| s.trim().is_empty())
}

fn fill_text(existing: &mut Option<String>, fetched: Option<&String>) {
    if is_blank(existing.as_deref()) && !is_blank(fetched.map(String::as_str)) {
        *existing = fetched.cloned();
    }
}

/// Whether `title` should be treated as missing
pub fn is_placeholder_title(title: &str, placeholders: &[String]) -> bool {
    let title = title.trim();
    title.is_empty() || placeholders.iter().any(|p| p.trim().eq_ignore_ascii_case(title))
}

/// Merge fetched metadata into a copy of `current`
///
/// The title is only overwritten when the current one is empty or a known
/// placeholder and the fetched one is non-empty. `metadata_loading` is left
/// as-is; the caller decides when loading ends.
pub fn merge_metadata(current: &Track, fetched: &TrackMetadata, placeholders: &[String]) -> Track {
    let mut merged = current.clone();

    if is_placeholder_title(&merged.title, placeholders) {
        if let Some(title) = fetched.title.as_deref().filter(|t| !t.trim().is_empty()) {
            merged.title = title.to_string();
        }
    }

    fill_text(&mut merged.script, fetched.script.as_ref());
    fill_text(&mut merged.source_name, fetched.source_name.as_ref());
    fill_text(&mut merged.image_url, fetched.image_url.as_ref());

    if merged.chapters_are_empty() {
        if let Some(chapters) = fetched.chapters.as_ref().filter(|c| !c.is_empty()) {
            merged.chapters = Some(chapters.clone());
        }
    }

    if merged.published_at.is_none() {
        merged.published_at = fetched.published_at;
    }

    merged
}
