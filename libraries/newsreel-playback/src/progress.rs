//! Progress reporting
//!
//! Turns the platform's periodic status callback into position, duration,
//! progress, and buffering updates on the published snapshot.

use crate::types::PlaybackSnapshot;
use newsreel_core::{MediaHandle, PlaybackState, PlaybackStatus};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Result of applying one status tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Snapshot updated, keep listening
    Continue,
    /// Track reached its end; the subscription is done
    Finished,
}

/// Apply a status tick to the snapshot
///
/// - Position always follows the tick.
/// - Duration only changes when the tick carries a positive value.
/// - State follows buffering/playing flags, but only while a resource is
///   active; `Loading`, `Idle`, and the terminal states are left alone.
/// - `did_just_finish` moves to `Finished` and clears the current track.
pub fn apply_status(snapshot: &mut PlaybackSnapshot, status: &PlaybackStatus) -> TickOutcome {
    if status.did_just_finish {
        snapshot.state = PlaybackState::Finished;
        snapshot.current_track = None;
        snapshot.position_ms = 0;
        snapshot.progress = 0.0;
        snapshot.is_buffering = false;
        return TickOutcome::Finished;
    }

    if status.duration_ms > 0 && status.duration_ms != snapshot.duration_ms {
        snapshot.duration_ms = status.duration_ms;
    }
    snapshot.set_position(status.position_ms);
    snapshot.is_buffering = status.is_buffering;

    if snapshot.state.is_active() {
        snapshot.state = if status.is_buffering {
            PlaybackState::Buffering
        } else if status.is_playing {
            PlaybackState::Playing
        } else {
            PlaybackState::Paused
        };
    }

    TickOutcome::Continue
}

/// Live subscription to a handle's status callback
///
/// The platform callback only forwards into a channel; the tick handler runs
/// on a tokio task so it never executes on a platform thread.
pub(crate) struct ProgressReporter {
    task: JoinHandle<()>,
}

impl ProgressReporter {
    /// Install the listener on `handle` and start consuming ticks
    pub(crate) fn start<F>(handle: &dyn MediaHandle, interval: Duration, mut on_tick: F) -> Self
    where
        F: FnMut(PlaybackStatus) -> TickOutcome + Send + 'static,
    {
        let (tx, mut rx) = mpsc::unbounded_channel();
        handle.set_status_listener(
            interval,
            Some(Box::new(move |status| {
                // Receiver gone means the subscription was torn down
                let _ = tx.send(status);
            })),
        );

        let task = tokio::spawn(async move {
            while let Some(status) = rx.recv().await {
                if on_tick(status) == TickOutcome::Finished {
                    break;
                }
            }
        });

        Self { task }
    }

    /// Remove the listener and stop the consumer task
    pub(crate) fn stop(self, handle: &dyn MediaHandle, interval: Duration) {
        handle.set_status_listener(interval, None);
        self.task.abort();
    }
}
