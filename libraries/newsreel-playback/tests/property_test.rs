//! Property-based tests for playback invariants
//!
//! Uses proptest to verify invariants across many random inputs.

use newsreel_core::{Chapter, PlaybackState, PlaybackStatus, Track, TrackMetadata};
use newsreel_playback::{
    apply_status, clamp_seek_target, is_placeholder_title, merge_metadata, PlaybackConfig,
    PlaybackSnapshot, Queue, TickOutcome,
};
use proptest::prelude::*;
use std::collections::HashSet;

// ===== Helpers =====

#[derive(Debug, Clone)]
enum QueueOp {
    Enqueue(String),
    Select(String),
    Next,
    Previous,
    Clear,
}

fn arbitrary_op() -> impl Strategy<Value = QueueOp> {
    // Small id alphabet so duplicates are common
    let id = "[a-f]";
    prop_oneof![
        4 => id.prop_map(QueueOp::Enqueue),
        2 => id.prop_map(QueueOp::Select),
        3 => Just(QueueOp::Next),
        3 => Just(QueueOp::Previous),
        1 => Just(QueueOp::Clear),
    ]
}

fn make_track(id: &str) -> Track {
    Track::new(id, format!("https://api.example.com/audio/{id}.mp3"), id.to_uppercase())
}

fn optional_text() -> impl Strategy<Value = Option<String>> {
    prop::option::of(prop_oneof![Just(String::new()), Just("  ".to_string()), "[a-z]{1,12}"])
}

fn optional_chapters() -> impl Strategy<Value = Option<Vec<Chapter>>> {
    prop::option::of(prop::collection::vec(
        (0u64..1000).prop_map(|start| Chapter::new("c", "Chapter", start, start + 1000, "https://x")),
        0..3,
    ))
}

fn arbitrary_track() -> impl Strategy<Value = Track> {
    (
        prop_oneof![Just(String::new()), Just("Untitled".to_string()), "[A-Za-z]{1,10}"],
        optional_text(),
        optional_text(),
        optional_text(),
        optional_chapters(),
    )
        .prop_map(|(title, script, source_name, image_url, chapters)| {
            let mut track = make_track("t");
            track.title = title;
            track.script = script;
            track.source_name = source_name;
            track.image_url = image_url;
            track.chapters = chapters;
            track
        })
}

fn arbitrary_metadata() -> impl Strategy<Value = TrackMetadata> {
    (
        optional_text(),
        optional_text(),
        optional_text(),
        optional_text(),
        optional_chapters(),
    )
        .prop_map(|(title, script, source_name, image_url, chapters)| TrackMetadata {
            title,
            script,
            chapters,
            source_name,
            image_url,
            ..Default::default()
        })
}

fn non_blank(value: Option<&String>) -> bool {
    value.is_some_and(|s| !s.trim().is_empty())
}

// ===== Property Tests =====

proptest! {
    /// Property: no duplicate ids and the cursor is always in range
    #[test]
    fn queue_integrity(ops in prop::collection::vec(arbitrary_op(), 0..80)) {
        let mut queue = Queue::new();

        for op in ops {
            match op {
                QueueOp::Enqueue(id) => { queue.enqueue(make_track(&id)); }
                QueueOp::Select(id) => { queue.select(make_track(&id)); }
                QueueOp::Next => { queue.next(); }
                QueueOp::Previous => { queue.previous(); }
                QueueOp::Clear => queue.clear(),
            }

            let ids: HashSet<_> = queue.tracks().iter().map(|t| t.id.clone()).collect();
            prop_assert_eq!(ids.len(), queue.len(), "duplicate id in queue");

            if let Some(index) = queue.current_index() {
                prop_assert!(index < queue.len(), "cursor {} out of range {}", index, queue.len());
            }
        }
    }

    /// Property: progress stays in [0, 1] and is 0 without a duration
    #[test]
    fn progress_bounds(
        ticks in prop::collection::vec((0u64..1_000_000, 0u64..600_000, any::<bool>(), any::<bool>()), 1..40)
    ) {
        let mut snapshot = PlaybackSnapshot {
            state: PlaybackState::Playing,
            current_track: Some(make_track("a")),
            ..Default::default()
        };

        for (position_ms, duration_ms, is_buffering, is_playing) in ticks {
            let outcome = apply_status(&mut snapshot, &PlaybackStatus {
                is_loaded: true,
                position_ms,
                duration_ms,
                is_buffering,
                is_playing,
                did_just_finish: false,
            });

            prop_assert_eq!(outcome, TickOutcome::Continue);
            prop_assert!((0.0..=1.0).contains(&snapshot.progress));
            if snapshot.duration_ms == 0 {
                prop_assert_eq!(snapshot.progress, 0.0);
            }
            prop_assert!(snapshot.state.is_active());
        }
    }

    /// Property: a finish tick always clears the track and the timeline
    #[test]
    fn finish_always_resets(position_ms in 0u64..1_000_000, duration_ms in 0u64..600_000) {
        let mut snapshot = PlaybackSnapshot {
            state: PlaybackState::Playing,
            current_track: Some(make_track("a")),
            position_ms,
            ..Default::default()
        };

        let outcome = apply_status(&mut snapshot, &PlaybackStatus {
            is_loaded: true,
            position_ms,
            duration_ms,
            did_just_finish: true,
            ..Default::default()
        });

        prop_assert_eq!(outcome, TickOutcome::Finished);
        prop_assert!(snapshot.current_track.is_none());
        prop_assert_eq!(snapshot.position_ms, 0);
        prop_assert_eq!(snapshot.progress, 0.0);
        prop_assert_eq!(snapshot.state, PlaybackState::Finished);
    }

    /// Property: seek targets land in [0, max(duration - margin, 0)]
    #[test]
    fn seek_clamping(target in any::<i64>(), duration_ms in 0u64..10_000_000) {
        let margin = PlaybackConfig::default().seek_end_margin_ms;
        let clamped = clamp_seek_target(target, duration_ms, margin);

        prop_assert!(clamped <= duration_ms.saturating_sub(margin));
        if target <= 0 {
            prop_assert_eq!(clamped, 0);
        }
        if duration_ms <= margin {
            prop_assert_eq!(clamped, 0);
        }
    }

    /// Property: merge never replaces or clears a non-empty field
    #[test]
    fn merge_safety(current in arbitrary_track(), fetched in arbitrary_metadata()) {
        let placeholders = PlaybackConfig::default().placeholder_titles;
        let merged = merge_metadata(&current, &fetched, &placeholders);

        for (before, after) in [
            (&current.script, &merged.script),
            (&current.source_name, &merged.source_name),
            (&current.image_url, &merged.image_url),
        ] {
            if non_blank(before.as_ref()) {
                prop_assert_eq!(before, after);
            }
        }

        if !current.chapters_are_empty() {
            prop_assert_eq!(&current.chapters, &merged.chapters);
        }

        if !is_placeholder_title(&current.title, &placeholders) {
            prop_assert_eq!(&current.title, &merged.title);
        }
        prop_assert!(
            !merged.title.trim().is_empty() || current.title.trim().is_empty(),
            "merge blanked the title"
        );

        prop_assert_eq!(merged.id, current.id);
        prop_assert_eq!(merged.uri, current.uri);
    }
}
