//! Playback controller - core orchestration
//!
//! Owns the single playback resource and sequences every operation that
//! binds, drives, or releases it. Queue, metadata, history, and media-control
//! collaborators hang off the controller; none of them ever sees the handle.

use crate::{
    enhancer::MetadataEnhancer,
    error::{PlaybackError, RecoveredFault, Result},
    events::PlaybackEvent,
    history::RecentHistory,
    merge::merge_metadata,
    preflight,
    progress::{apply_status, ProgressReporter, TickOutcome},
    queue::Queue,
    types::{PlaybackConfig, PlaybackSnapshot},
    uri::{parse_origin, resolve_playback_uri},
};
use newsreel_core::{
    ContentProbe, HistoryRecorder, MediaControlBridge, MediaHandle, MediaPlatform, MetadataService,
    NowPlaying, PlaybackState, PlaybackStatus, Track, TrackId, TrackMetadata,
};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::{broadcast, watch};
use tracing::{debug, error, info, warn};
use url::Url;

/// Buffered events per subscriber before slow receivers start lagging
const EVENT_CAPACITY: usize = 256;

/// Clamp a seek target into `[0, max(duration - end_margin, 0)]`
pub fn clamp_seek_target(target_ms: i64, duration_ms: u64, end_margin_ms: u64) -> u64 {
    let upper = duration_ms.saturating_sub(end_margin_ms);
    u64::try_from(target_ms).unwrap_or(0).min(upper)
}

/// Collaborators injected into the controller
///
/// Only the platform is required. Missing collaborators simply switch the
/// matching step off (no preflight, no enhancement, ...).
#[derive(Clone)]
pub struct PlaybackServices {
    /// Platform media layer
    pub platform: Arc<dyn MediaPlatform>,
    /// Content-type probe for the preflight check
    pub probe: Option<Arc<dyn ContentProbe>>,
    /// Rich metadata source
    pub metadata: Option<Arc<dyn MetadataService>>,
    /// Play history sink
    pub history: Option<Arc<dyn HistoryRecorder>>,
    /// OS media controls
    pub media_controls: Option<Arc<dyn MediaControlBridge>>,
}

impl PlaybackServices {
    /// Services with only a platform
    pub fn new(platform: Arc<dyn MediaPlatform>) -> Self {
        Self {
            platform,
            probe: None,
            metadata: None,
            history: None,
            media_controls: None,
        }
    }

    /// Add a content probe
    #[must_use]
    pub fn with_probe(mut self, probe: Arc<dyn ContentProbe>) -> Self {
        self.probe = Some(probe);
        self
    }

    /// Add a metadata service
    #[must_use]
    pub fn with_metadata(mut self, metadata: Arc<dyn MetadataService>) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Add a history recorder
    #[must_use]
    pub fn with_history(mut self, history: Arc<dyn HistoryRecorder>) -> Self {
        self.history = Some(history);
        self
    }

    /// Add a media-control bridge
    #[must_use]
    pub fn with_media_controls(mut self, media_controls: Arc<dyn MediaControlBridge>) -> Self {
        self.media_controls = Some(media_controls);
        self
    }
}

/// Central playback management
///
/// Constructed once by the host and passed around explicitly; cloning is
/// cheap and every clone drives the same resource.
///
/// Guarantees:
/// - At most one platform handle is bound at any time; the previous one is
///   always unloaded before the next is created.
/// - `play`, `pause`, `resume`, `seek`, and `stop` are serialized, so two
///   switches never interleave.
/// - Results of background work (metadata, status ticks) are applied only if
///   the track they were computed for is still current.
#[derive(Clone)]
pub struct PlaybackController {
    shared: Arc<Shared>,
}

struct Shared {
    config: PlaybackConfig,
    origin: Option<Url>,

    platform: Arc<dyn MediaPlatform>,
    probe: Option<Arc<dyn ContentProbe>>,
    enhancer: Option<Arc<MetadataEnhancer>>,
    history: Option<Arc<dyn HistoryRecorder>>,
    media_controls: Option<Arc<dyn MediaControlBridge>>,
    recent: RecentHistory,

    // Held for the whole of every resource operation
    binding: tokio::sync::Mutex<Option<Binding>>,

    // Bumped on every bind and release; stale ticks compare against it
    generation: AtomicU64,

    snapshot: watch::Sender<PlaybackSnapshot>,
    queue: Mutex<Queue>,
    events: broadcast::Sender<PlaybackEvent>,
}

struct Binding {
    handle: Box<dyn MediaHandle>,
    track_id: TrackId,
    reporter: Option<ProgressReporter>,
}

impl PlaybackController {
    /// Create a controller
    ///
    /// # Errors
    /// Returns `InvalidConfig` if `api_origin` is set but unusable
    pub fn new(config: PlaybackConfig, services: PlaybackServices) -> Result<Self> {
        let origin = config.api_origin.as_deref().map(parse_origin).transpose()?;
        let (snapshot, _) = watch::channel(PlaybackSnapshot::default());
        let (events, _) = broadcast::channel(EVENT_CAPACITY);

        info!(
            api_origin = ?origin.as_ref().map(Url::as_str),
            preflight = config.preflight_enabled && services.probe.is_some(),
            enhancement = services.metadata.is_some(),
            "Playback controller created"
        );

        Ok(Self {
            shared: Arc::new(Shared {
                origin,
                platform: services.platform,
                probe: services.probe,
                enhancer: services
                    .metadata
                    .map(|service| Arc::new(MetadataEnhancer::new(service))),
                history: services.history,
                media_controls: services.media_controls,
                recent: RecentHistory::new(config.history_size),
                binding: tokio::sync::Mutex::new(None),
                generation: AtomicU64::new(0),
                snapshot,
                queue: Mutex::new(Queue::new()),
                events,
                config,
            }),
        })
    }

    // ===== Commands =====

    /// Play `track`, or toggle pause/resume if it is already current
    ///
    /// # Errors
    /// `ResourceCreation` or `PreflightRejected` when the switch is aborted.
    /// The controller is then `Failed` with no current track.
    pub async fn play(&self, track: Track) -> Result<()> {
        let mut binding = self.shared.binding.lock().await;

        if binding.is_some() {
            let (is_current, state) = {
                let snapshot = self.shared.snapshot.borrow();
                (
                    snapshot.current_track_id() == Some(track.id.as_str()),
                    snapshot.state,
                )
            };

            if is_current {
                match state {
                    PlaybackState::Playing => self.shared.pause_bound(binding.as_ref()).await,
                    PlaybackState::Paused => self.shared.resume_bound(binding.as_ref()).await,
                    other => debug!(track_id = %track.id, state = %other, "Toggle ignored"),
                }
                return Ok(());
            }
        }

        self.shared.switch(&mut binding, track).await
    }

    /// Pause the current track
    pub async fn pause(&self) {
        let binding = self.shared.binding.lock().await;
        if self.shared.has_current_track() {
            self.shared.pause_bound(binding.as_ref()).await;
        }
    }

    /// Resume the current track
    pub async fn resume(&self) {
        let binding = self.shared.binding.lock().await;
        if self.shared.has_current_track() {
            self.shared.resume_bound(binding.as_ref()).await;
        }
    }

    /// Release the resource and clear the current track
    pub async fn stop(&self) {
        let mut binding = self.shared.binding.lock().await;
        self.shared.release(&mut binding).await;

        let mut previous = None;
        self.shared.snapshot.send_modify(|s| {
            previous = s.current_track.take();
            s.last_error = None;
        });
        if let Some(track) = previous {
            info!(track_id = %track.id, "Playback stopped");
        }
        self.shared.clear_media_controls();
    }

    /// Move the playhead to `target_ms`
    ///
    /// The target is clamped to `[0, duration - seek_end_margin_ms]`. A failed
    /// seek is retried once; a second failure is dropped.
    pub async fn seek(&self, target_ms: i64) {
        let binding = self.shared.binding.lock().await;
        let Some(bound) = binding.as_ref().filter(|_| self.shared.has_current_track()) else {
            debug!(target_ms, "Seek ignored, no current track");
            return;
        };
        self.shared.seek_bound(bound, target_ms).await;
    }

    /// Play the next queued track
    ///
    /// Returns `Ok(false)` when there is no next track.
    pub async fn next(&self) -> Result<bool> {
        let track = self.shared.queue().next().cloned();
        self.shared.emit_queue_changed();
        match track {
            Some(track) => self.play(track).await.map(|()| true),
            None => Ok(false),
        }
    }

    /// Play the previous queued track
    ///
    /// Returns `Ok(false)` when there is no previous track.
    pub async fn previous(&self) -> Result<bool> {
        let track = self.shared.queue().previous().cloned();
        self.shared.emit_queue_changed();
        match track {
            Some(track) => self.play(track).await.map(|()| true),
            None => Ok(false),
        }
    }

    /// Append a track to the queue (ignored if its id is already queued)
    ///
    /// Re-queueing the current track while the cursor is unset points the
    /// cursor at it, so `next()` moves past it instead of toggling it.
    pub fn enqueue(&self, track: Track) -> bool {
        let current = (self.shared.snapshot.borrow().current_track_id() == Some(track.id.as_str()))
            .then(|| track.clone());
        let added = {
            let mut queue = self.shared.queue();
            let added = queue.enqueue(track);
            if let Some(current) = current.filter(|_| added && queue.current_index().is_none()) {
                queue.select(current);
            }
            added
        };
        if added {
            self.shared.emit_queue_changed();
        }
        added
    }

    /// Empty the queue
    ///
    /// Playback of the current track is not affected.
    pub fn clear_queue(&self) {
        self.shared.queue().clear();
        self.shared.emit_queue_changed();
    }

    /// Set (or clear) the token used for metadata requests
    pub async fn set_auth_token(&self, token: Option<String>) {
        if let Some(enhancer) = &self.shared.enhancer {
            enhancer.set_auth_token(token).await;
        }
    }

    /// Stop playback and tear the controller down
    pub async fn shutdown(&self) {
        self.stop().await;
        info!("Playback controller shut down");
    }

    // ===== Queries =====

    /// Latest published state
    pub fn snapshot(&self) -> PlaybackSnapshot {
        self.shared.snapshot.borrow().clone()
    }

    /// Receiver that observes every snapshot change
    pub fn watch(&self) -> watch::Receiver<PlaybackSnapshot> {
        self.shared.snapshot.subscribe()
    }

    /// Receiver for playback events
    pub fn subscribe_events(&self) -> broadcast::Receiver<PlaybackEvent> {
        self.shared.events.subscribe()
    }

    /// Track bound to the resource, if any
    pub fn current_track(&self) -> Option<Track> {
        self.shared.snapshot.borrow().current_track.clone()
    }

    /// Controller state
    pub fn playback_state(&self) -> PlaybackState {
        self.shared.snapshot.borrow().state
    }

    /// Playhead in milliseconds
    pub fn position_ms(&self) -> u64 {
        self.shared.snapshot.borrow().position_ms
    }

    /// Best known duration in milliseconds
    pub fn duration_ms(&self) -> u64 {
        self.shared.snapshot.borrow().duration_ms
    }

    /// Clamped progress ratio
    pub fn progress(&self) -> f64 {
        self.shared.snapshot.borrow().progress
    }

    /// Whether the platform last reported buffering
    pub fn is_buffering(&self) -> bool {
        self.shared.snapshot.borrow().is_buffering
    }

    /// Whether `track_id` is current and audibly playing
    pub fn is_current_and_playing(&self, track_id: &str) -> bool {
        let snapshot = self.shared.snapshot.borrow();
        snapshot.state == PlaybackState::Playing && snapshot.current_track_id() == Some(track_id)
    }

    /// Whether `next()` would find a track
    pub fn has_next(&self) -> bool {
        self.shared.queue().has_next()
    }

    /// Whether `previous()` would find a track
    pub fn has_previous(&self) -> bool {
        self.shared.queue().has_previous()
    }

    /// Ids of recently started tracks, oldest first
    pub fn recently_played(&self) -> Vec<TrackId> {
        self.shared.recent.get_all()
    }

    /// Queue contents and cursor
    pub fn queue(&self) -> (Vec<Track>, Option<usize>) {
        let queue = self.shared.queue();
        (queue.tracks().to_vec(), queue.current_index())
    }
}

impl Shared {
    fn queue(&self) -> MutexGuard<'_, Queue> {
        self.queue.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn emit(&self, event: PlaybackEvent) {
        // No subscribers is fine
        let _ = self.events.send(event);
    }

    fn emit_queue_changed(&self) {
        let (length, current_index) = {
            let queue = self.queue();
            (queue.len(), queue.current_index())
        };
        self.emit(PlaybackEvent::QueueChanged {
            length,
            current_index,
        });
    }

    fn has_current_track(&self) -> bool {
        self.snapshot.borrow().current_track.is_some()
    }

    fn set_state(&self, state: PlaybackState) {
        let changed = self.snapshot.send_if_modified(|s| {
            if s.state == state {
                return false;
            }
            s.state = state;
            true
        });
        if changed {
            debug!(state = %state, "Playback state changed");
            self.emit(PlaybackEvent::StateChanged { state });
        }
    }

    fn report_fault(&self, fault: RecoveredFault) {
        warn!(fault = fault.kind(), "{}", fault);
        self.emit(PlaybackEvent::Degraded { fault });
    }

    /// Exclusive switch to `track`
    async fn switch(self: &Arc<Self>, binding: &mut Option<Binding>, track: Track) -> Result<()> {
        info!(track_id = %track.id, uri = %track.uri, "Switching track");

        // 1. Release whatever is bound; the current track stays visible
        self.release(binding).await;

        // 2. Insert or relocate in the queue
        self.queue().select(track.clone());
        self.emit_queue_changed();

        // 3. Rebase onto the API origin if needed
        let resolved_uri = resolve_playback_uri(&track.uri, self.origin.as_ref());
        if resolved_uri != track.uri {
            info!(uri = %track.uri, resolved_uri = %resolved_uri, "Rebased track URI onto API origin");
        }

        self.set_state(PlaybackState::Loading);

        // 4. Content-type preflight
        if self.config.preflight_enabled {
            if let Some(probe) = &self.probe {
                if let Err(e) = preflight::check(probe.as_ref(), &track.uri, &resolved_uri).await {
                    self.fail(&e);
                    return Err(e);
                }
            }
        }

        // 5. Bind without auto-start
        let handle = match self.platform.create(&resolved_uri).await {
            Ok(handle) => handle,
            Err(e) => {
                let err = PlaybackError::ResourceCreation {
                    uri: track.uri.clone(),
                    resolved_uri,
                    message: e.to_string(),
                };
                self.fail(&err);
                return Err(err);
            }
        };
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(track_id = %track.id, generation, "Resource bound");

        // 6. Adopt the new track before it can be reported as playing
        let mut current = track;
        current.metadata_loading = self.enhancer.is_some() && current.needs_enhancement();
        let track_id = current.id.clone();
        let metadata_loading = current.metadata_loading;

        let mut previous_track_id = None;
        self.snapshot.send_modify(|s| {
            previous_track_id = s.current_track.take().map(|t| t.id.to_string());
            if let Some(duration_ms) = current.duration_ms {
                s.set_duration(duration_ms);
            }
            s.current_track = Some(current);
            s.last_error = None;
        });
        self.emit(PlaybackEvent::TrackChanged {
            track_id: track_id.to_string(),
            previous_track_id,
        });
        self.set_state(PlaybackState::Buffering);

        // 7. Wait for buffer readiness, then start from zero
        self.start_when_ready(handle.as_ref(), &resolved_uri).await;

        *binding = Some(Binding {
            handle,
            track_id: track_id.clone(),
            reporter: None,
        });

        // 8. Background enhancement
        if metadata_loading {
            self.spawn_enhancement(track_id.clone());
        }

        // 9. Play history
        self.recent.push(track_id.clone());
        self.spawn_history(track_id.clone());

        // 10. Status subscription
        if let Some(bound) = binding.as_mut() {
            let on_tick = self.tick_handler(generation);
            bound.reporter = Some(ProgressReporter::start(
                bound.handle.as_ref(),
                self.config.status_interval(),
                on_tick,
            ));
        }
        self.update_media_controls();

        info!(track_id = %track_id, "Now playing");
        Ok(())
    }

    /// Unload the bound handle (if any) and zero the timeline
    async fn release(&self, binding: &mut Option<Binding>) {
        if let Some(old) = binding.take() {
            self.generation.fetch_add(1, Ordering::SeqCst);
            if let Some(reporter) = old.reporter {
                reporter.stop(old.handle.as_ref(), self.config.status_interval());
            }

            match old.handle.unload().await {
                Ok(()) => debug!(track_id = %old.track_id, "Resource unloaded"),
                Err(e) => self.report_fault(RecoveredFault::UnloadFailed {
                    track_id: old.track_id.to_string(),
                    message: e.to_string(),
                }),
            }
        }

        self.snapshot.send_modify(PlaybackSnapshot::reset_timeline);
        self.set_state(PlaybackState::Idle);
    }

    /// Leave the switch in `Failed` with no current track
    fn fail(&self, err: &PlaybackError) {
        error!(uri = ?err.uri(), error = %err, "Track switch failed");
        let message = err.to_string();
        self.snapshot.send_modify(|s| {
            s.current_track = None;
            s.reset_timeline();
            s.last_error = Some(message.clone());
        });
        self.set_state(PlaybackState::Failed);
        self.emit(PlaybackEvent::Error { message });
        self.clear_media_controls();
    }

    async fn ready_duration(handle: &dyn MediaHandle) -> Option<u64> {
        match handle.status().await {
            Ok(status) if status.is_ready() => Some(status.duration_ms),
            Ok(status) => {
                debug!(
                    loaded = status.is_loaded,
                    buffering = status.is_buffering,
                    duration_ms = status.duration_ms,
                    "Resource not ready"
                );
                None
            }
            Err(e) => {
                debug!(error = %e, "Status query failed during readiness check");
                None
            }
        }
    }

    /// Buffer-readiness sequence: check, retry once, then fall back
    async fn start_when_ready(&self, handle: &dyn MediaHandle, uri: &str) {
        if let Some(duration_ms) = Self::ready_duration(handle).await {
            self.start_from_zero(handle, duration_ms).await;
            return;
        }

        tokio::time::sleep(self.config.readiness_retry_delay()).await;

        if let Some(duration_ms) = Self::ready_duration(handle).await {
            self.start_from_zero(handle, duration_ms).await;
            return;
        }

        self.report_fault(RecoveredFault::BufferTimeoutDegraded {
            uri: uri.to_string(),
        });
        match handle.play().await {
            Ok(()) => self.set_state(PlaybackState::Playing),
            Err(e) => warn!(uri = %uri, error = %e, "Fallback start failed"),
        }
    }

    /// Preroll, start at zero, and correct any start drift
    async fn start_from_zero(&self, handle: &dyn MediaHandle, duration_ms: u64) {
        self.snapshot.send_modify(|s| s.set_duration(duration_ms));
        tokio::time::sleep(self.config.preroll_delay()).await;

        if let Err(e) = handle.play_from(0).await {
            warn!(error = %e, "Start from zero failed, starting at current position");
            if let Err(e) = handle.play().await {
                warn!(error = %e, "Start failed");
                return;
            }
        }
        self.set_state(PlaybackState::Playing);

        match handle.status().await {
            Ok(status) if status.position_ms > self.config.start_drift_tolerance_ms => {
                debug!(position_ms = status.position_ms, "Start drifted, seeking back to zero");
                if let Err(e) = handle.seek(0).await {
                    warn!(error = %e, "Drift correction failed");
                }
            }
            Ok(_) => {}
            Err(e) => debug!(error = %e, "Status query after start failed"),
        }
    }

    async fn pause_bound(&self, binding: Option<&Binding>) {
        let Some(bound) = binding else {
            return;
        };
        match bound.handle.pause().await {
            Ok(()) => {
                self.set_state(PlaybackState::Paused);
                self.update_media_controls();
            }
            Err(e) => warn!(track_id = %bound.track_id, error = %e, "Pause failed"),
        }
    }

    async fn resume_bound(&self, binding: Option<&Binding>) {
        let Some(bound) = binding else {
            return;
        };
        match bound.handle.play().await {
            Ok(()) => {
                self.set_state(PlaybackState::Playing);
                self.update_media_controls();
            }
            Err(e) => warn!(track_id = %bound.track_id, error = %e, "Resume failed"),
        }
    }

    /// Handle-reported duration if known, else the last stored one
    async fn best_duration(&self, handle: &dyn MediaHandle) -> u64 {
        match handle.status().await {
            Ok(PlaybackStatus { duration_ms, .. }) if duration_ms > 0 => duration_ms,
            _ => self.snapshot.borrow().duration_ms,
        }
    }

    async fn seek_bound(&self, bound: &Binding, target_ms: i64) {
        let margin = self.config.seek_end_margin_ms;
        let clamped = clamp_seek_target(target_ms, self.best_duration(bound.handle.as_ref()).await, margin);
        self.snapshot.send_modify(|s| s.set_position(clamped));

        let Err(first) = bound.handle.seek(clamped).await else {
            debug!(target_ms, position_ms = clamped, "Seeked");
            return;
        };
        debug!(position_ms = clamped, error = %first, "Seek failed, retrying once");

        tokio::time::sleep(self.config.seek_retry_delay()).await;
        let retry = clamp_seek_target(target_ms, self.best_duration(bound.handle.as_ref()).await, margin);
        match bound.handle.seek(retry).await {
            Ok(()) => self.snapshot.send_modify(|s| s.set_position(retry)),
            Err(e) => self.report_fault(RecoveredFault::SeekDropped {
                target_ms: retry,
                message: e.to_string(),
            }),
        }
    }

    /// Status tick handler bound to one resource generation
    fn tick_handler(
        self: &Arc<Self>,
        generation: u64,
    ) -> impl FnMut(PlaybackStatus) -> TickOutcome + Send + 'static {
        let shared = Arc::downgrade(self);
        move |status| match shared.upgrade() {
            Some(shared) => shared.on_tick(generation, &status),
            None => TickOutcome::Finished,
        }
    }

    fn on_tick(&self, generation: u64, status: &PlaybackStatus) -> TickOutcome {
        let mut outcome = None;
        let mut state_change = None;
        let mut finished_track = None;

        self.snapshot.send_if_modified(|s| {
            // Checked under the watch lock so a concurrent release cannot slip in
            if self.generation.load(Ordering::SeqCst) != generation {
                return false;
            }
            let before = s.state;
            finished_track = s.current_track.as_ref().map(|t| t.id.to_string());
            outcome = Some(apply_status(s, status));
            if s.state != before {
                state_change = Some(s.state);
            }
            true
        });

        let Some(outcome) = outcome else {
            return TickOutcome::Finished;
        };

        if let Some(state) = state_change {
            self.emit(PlaybackEvent::StateChanged { state });
        }

        match outcome {
            TickOutcome::Continue => {
                let (position_ms, duration_ms, progress) = {
                    let s = self.snapshot.borrow();
                    (s.position_ms, s.duration_ms, s.progress)
                };
                self.emit(PlaybackEvent::PositionUpdate {
                    position_ms,
                    duration_ms,
                    progress,
                });
                self.update_media_controls();
            }
            TickOutcome::Finished => {
                if let Some(track_id) = finished_track {
                    info!(track_id = %track_id, "Track finished");
                    self.emit(PlaybackEvent::TrackFinished { track_id });
                }
                self.clear_media_controls();
            }
        }

        outcome
    }

    fn spawn_enhancement(self: &Arc<Self>, track_id: TrackId) {
        let Some(enhancer) = self.enhancer.clone() else {
            return;
        };
        let shared = Arc::clone(self);
        tokio::spawn(async move {
            let result = enhancer.fetch(&track_id).await;
            shared.apply_metadata(&track_id, result);
        });
    }

    /// Merge fetched metadata if `track_id` is still current
    fn apply_metadata(&self, track_id: &TrackId, result: newsreel_core::Result<Option<TrackMetadata>>) {
        let fetched = match result {
            Ok(fetched) => fetched,
            Err(e) => {
                self.report_fault(RecoveredFault::MetadataFetchFailed {
                    track_id: track_id.to_string(),
                    message: e.to_string(),
                });
                None
            }
        };

        let mut applied = None;
        self.snapshot.send_if_modified(|s| {
            let Some(current) = s.current_track.as_ref() else {
                return false;
            };
            if &current.id != track_id {
                return false;
            }

            let mut merged = match &fetched {
                Some(metadata) => merge_metadata(current, metadata, &self.config.placeholder_titles),
                None => current.clone(),
            };
            merged.metadata_loading = false;

            let mut before = current.clone();
            before.metadata_loading = false;
            applied = Some((merged.clone(), merged != before));

            s.current_track = Some(merged);
            true
        });

        let Some((merged, changed)) = applied else {
            debug!(track_id = %track_id, "Discarding metadata for a track that is no longer current");
            return;
        };

        self.queue().replace(merged);
        if changed {
            info!(track_id = %track_id, "Track metadata enhanced");
            self.emit(PlaybackEvent::MetadataUpdated {
                track_id: track_id.to_string(),
            });
            self.update_media_controls();
        }
        self.emit(PlaybackEvent::MetadataLoadingFinished {
            track_id: track_id.to_string(),
        });
    }

    fn spawn_history(self: &Arc<Self>, track_id: TrackId) {
        let Some(history) = self.history.clone() else {
            return;
        };
        let shared = Arc::downgrade(self);
        tokio::spawn(async move {
            if let Err(e) = history.record_play(&track_id).await {
                let fault = RecoveredFault::HistoryFailed {
                    track_id: track_id.to_string(),
                    message: e.to_string(),
                };
                match shared.upgrade() {
                    Some(shared) => shared.report_fault(fault),
                    None => warn!(fault = fault.kind(), "{}", fault),
                }
            }
        });
    }

    /// Best-effort push of the now-playing state to OS media controls
    fn update_media_controls(&self) {
        let Some(bridge) = &self.media_controls else {
            return;
        };
        let snapshot = self.snapshot.borrow().clone();
        let Some(track) = snapshot.current_track.as_ref() else {
            return;
        };

        let now_playing = NowPlaying {
            track,
            position_ms: snapshot.position_ms,
            duration_ms: snapshot.duration_ms,
            is_playing: snapshot.state == PlaybackState::Playing,
        };
        if let Err(e) = bridge.update_now_playing(&now_playing) {
            debug!(error = %e, "Media controls update failed");
        }
    }

    fn clear_media_controls(&self) {
        if let Some(bridge) = &self.media_controls {
            if let Err(e) = bridge.clear() {
                debug!(error = %e, "Media controls clear failed");
            }
        }
    }
}
