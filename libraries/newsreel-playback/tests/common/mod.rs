//! Shared fakes for controller tests
//!
//! The fake platform records every call it receives and counts live handles,
//! so tests can assert ordering and exclusivity directly.

#![allow(dead_code)]

use async_trait::async_trait;
use newsreel_core::{
    ContentProbe, HistoryRecorder, MediaControlBridge, MediaError, MediaHandle, MediaPlatform,
    MetadataService, NowPlaying, PlaybackStatus, StatusListener, Track, TrackId, TrackMetadata,
};
use newsreel_playback::{PlaybackConfig, PlaybackController, PlaybackServices};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Notify;

pub const DEFAULT_DURATION_MS: u64 = 180_000;

/// Let spawned tasks and channel consumers run
pub async fn settle() {
    for _ in 0..20 {
        tokio::task::yield_now().await;
    }
}

pub fn track(id: &str) -> Track {
    Track::new(id, format!("https://api.example.com/audio/{id}.mp3"), format!("Episode {id}"))
        .with_script("Full transcript")
        .with_chapters(vec![newsreel_core::Chapter::new(
            "c1",
            "Intro",
            0,
            30_000,
            "https://example.com/story",
        )])
}

/// A track missing script and chapters, so it triggers enhancement
pub fn bare_track(id: &str) -> Track {
    Track::new(id, format!("https://api.example.com/audio/{id}.mp3"), "Loading…")
        .with_script("")
        .with_chapters(Vec::new())
}

// ===== Platform =====

#[derive(Default)]
pub struct PlatformState {
    pub calls: Vec<String>,
    pub created: Vec<String>,
    pub unloaded: usize,
    pub live: usize,
    pub max_live: usize,
    pub fail_uris: HashSet<String>,
    pub not_ready_polls: usize,
    pub duration_ms: u64,
    pub start_drift_ms: u64,
    pub play_from_fails: bool,
    pub seek_failures: usize,
    pub unload_fails: bool,
    pub create_delay: Option<Duration>,
    pub status_delay: Option<Duration>,
    pub listener: Option<StatusListener>,
    pub listener_owner: Option<usize>,
}

#[derive(Clone)]
pub struct FakePlatform {
    pub state: Arc<Mutex<PlatformState>>,
}

impl FakePlatform {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(PlatformState {
                duration_ms: DEFAULT_DURATION_MS,
                ..Default::default()
            })),
        }
    }

    pub fn with<F: FnOnce(&mut PlatformState)>(&self, f: F) {
        f(&mut self.state.lock().unwrap());
    }

    pub fn created(&self) -> Vec<String> {
        self.state.lock().unwrap().created.clone()
    }

    pub fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn live(&self) -> usize {
        self.state.lock().unwrap().live
    }

    pub fn max_live(&self) -> usize {
        self.state.lock().unwrap().max_live
    }

    pub fn has_listener(&self) -> bool {
        self.state.lock().unwrap().listener.is_some()
    }

    /// Deliver a status tick through the installed listener
    pub fn emit(&self, status: PlaybackStatus) {
        let state = self.state.lock().unwrap();
        if let Some(listener) = state.listener.as_ref() {
            listener(status);
        }
    }

    pub fn tick(&self, position_ms: u64) {
        let duration_ms = self.state.lock().unwrap().duration_ms;
        self.emit(PlaybackStatus {
            is_loaded: true,
            position_ms,
            duration_ms,
            is_buffering: false,
            is_playing: true,
            did_just_finish: false,
        });
    }

    pub fn finish(&self) {
        let duration_ms = self.state.lock().unwrap().duration_ms;
        self.emit(PlaybackStatus {
            is_loaded: true,
            position_ms: duration_ms,
            duration_ms,
            is_buffering: false,
            is_playing: false,
            did_just_finish: true,
        });
    }
}

#[async_trait]
impl MediaPlatform for FakePlatform {
    async fn create(&self, uri: &str) -> newsreel_core::Result<Box<dyn MediaHandle>> {
        let delay = self.state.lock().unwrap().create_delay;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let mut state = self.state.lock().unwrap();
        state.calls.push(format!("create {uri}"));
        if state.fail_uris.contains(uri) {
            return Err(MediaError::platform("source could not be opened"));
        }

        state.created.push(uri.to_string());
        state.live += 1;
        state.max_live = state.max_live.max(state.live);
        let id = state.created.len();

        Ok(Box::new(FakeHandle {
            id,
            platform: Arc::clone(&self.state),
            inner: Mutex::new(HandleState::default()),
        }))
    }
}

#[derive(Default)]
struct HandleState {
    status_polls: usize,
    position_ms: u64,
    playing: bool,
    unloaded: bool,
}

pub struct FakeHandle {
    id: usize,
    platform: Arc<Mutex<PlatformState>>,
    inner: Mutex<HandleState>,
}

impl FakeHandle {
    fn record(&self, call: String) {
        self.platform.lock().unwrap().calls.push(call);
    }
}

#[async_trait]
impl MediaHandle for FakeHandle {
    async fn status(&self) -> newsreel_core::Result<PlaybackStatus> {
        let (not_ready_polls, duration_ms, delay) = {
            let p = self.platform.lock().unwrap();
            (p.not_ready_polls, p.duration_ms, p.status_delay)
        };
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        let mut inner = self.inner.lock().unwrap();
        let ready = inner.status_polls >= not_ready_polls;
        inner.status_polls += 1;

        Ok(PlaybackStatus {
            is_loaded: ready,
            position_ms: inner.position_ms,
            duration_ms: if ready { duration_ms } else { 0 },
            is_buffering: !ready,
            is_playing: inner.playing,
            did_just_finish: false,
        })
    }

    async fn play(&self) -> newsreel_core::Result<()> {
        self.record(format!("play #{}", self.id));
        self.inner.lock().unwrap().playing = true;
        Ok(())
    }

    async fn play_from(&self, position_ms: u64) -> newsreel_core::Result<()> {
        self.record(format!("play_from({position_ms}) #{}", self.id));
        let (fails, drift) = {
            let p = self.platform.lock().unwrap();
            (p.play_from_fails, p.start_drift_ms)
        };
        if fails {
            return Err(MediaError::Unsupported("play_from".to_string()));
        }
        let mut inner = self.inner.lock().unwrap();
        inner.position_ms = position_ms + drift;
        inner.playing = true;
        Ok(())
    }

    async fn pause(&self) -> newsreel_core::Result<()> {
        self.record(format!("pause #{}", self.id));
        self.inner.lock().unwrap().playing = false;
        Ok(())
    }

    async fn seek(&self, position_ms: u64) -> newsreel_core::Result<()> {
        self.record(format!("seek({position_ms}) #{}", self.id));
        {
            let mut p = self.platform.lock().unwrap();
            if p.seek_failures > 0 {
                p.seek_failures -= 1;
                return Err(MediaError::platform("seek interrupted"));
            }
        }
        self.inner.lock().unwrap().position_ms = position_ms;
        Ok(())
    }

    async fn unload(&self) -> newsreel_core::Result<()> {
        self.record(format!("unload #{}", self.id));
        self.inner.lock().unwrap().unloaded = true;
        let mut p = self.platform.lock().unwrap();
        p.live -= 1;
        p.unloaded += 1;
        if p.unload_fails {
            return Err(MediaError::platform("already released"));
        }
        Ok(())
    }

    fn set_status_listener(&self, _interval: Duration, listener: Option<StatusListener>) {
        let mut p = self.platform.lock().unwrap();
        match listener {
            Some(listener) => {
                p.listener = Some(listener);
                p.listener_owner = Some(self.id);
            }
            None if p.listener_owner == Some(self.id) => {
                p.listener = None;
                p.listener_owner = None;
            }
            None => {}
        }
    }
}

// ===== Metadata =====

#[derive(Default)]
pub struct FakeMetadata {
    pub responses: Mutex<HashMap<String, TrackMetadata>>,
    pub gates: Mutex<HashMap<String, Arc<Notify>>>,
    pub failing: Mutex<HashSet<String>>,
    pub calls: Mutex<Vec<(String, Option<String>)>>,
}

impl FakeMetadata {
    pub fn respond(&self, id: &str, metadata: TrackMetadata) {
        self.responses.lock().unwrap().insert(id.to_string(), metadata);
    }

    pub fn fail(&self, id: &str) {
        self.failing.lock().unwrap().insert(id.to_string());
    }

    /// Hold responses for `id` until the returned notify fires
    pub fn gate(&self, id: &str) -> Arc<Notify> {
        let notify = Arc::new(Notify::new());
        self.gates.lock().unwrap().insert(id.to_string(), Arc::clone(&notify));
        notify
    }

    pub fn calls(&self) -> Vec<(String, Option<String>)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl MetadataService for FakeMetadata {
    async fn get_by_id(
        &self,
        track_id: &TrackId,
        auth_token: Option<&str>,
    ) -> newsreel_core::Result<Option<TrackMetadata>> {
        self.calls
            .lock()
            .unwrap()
            .push((track_id.to_string(), auth_token.map(str::to_string)));

        let gate = self.gates.lock().unwrap().get(track_id.as_str()).cloned();
        if let Some(gate) = gate {
            gate.notified().await;
        }

        if self.failing.lock().unwrap().contains(track_id.as_str()) {
            return Err(MediaError::network("metadata service unavailable"));
        }
        Ok(self.responses.lock().unwrap().get(track_id.as_str()).cloned())
    }
}

// ===== History / bridge / probe =====

#[derive(Default)]
pub struct FakeHistory {
    pub recorded: Mutex<Vec<String>>,
    pub failing: Mutex<bool>,
}

#[async_trait]
impl HistoryRecorder for FakeHistory {
    async fn record_play(&self, track_id: &TrackId) -> newsreel_core::Result<()> {
        if *self.failing.lock().unwrap() {
            return Err(MediaError::network("history endpoint down"));
        }
        self.recorded.lock().unwrap().push(track_id.to_string());
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeBridge {
    pub updates: Mutex<Vec<(String, u64, bool)>>,
    pub clears: Mutex<usize>,
}

impl FakeBridge {
    pub fn last_update(&self) -> Option<(String, u64, bool)> {
        self.updates.lock().unwrap().last().cloned()
    }

    pub fn clears(&self) -> usize {
        *self.clears.lock().unwrap()
    }
}

impl MediaControlBridge for FakeBridge {
    fn update_now_playing(&self, now_playing: &NowPlaying<'_>) -> newsreel_core::Result<()> {
        self.updates.lock().unwrap().push((
            now_playing.track.title.clone(),
            now_playing.position_ms,
            now_playing.is_playing,
        ));
        Ok(())
    }

    fn clear(&self) -> newsreel_core::Result<()> {
        *self.clears.lock().unwrap() += 1;
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeProbe {
    pub types: Mutex<HashMap<String, Option<String>>>,
    pub probed: Mutex<Vec<String>>,
}

impl FakeProbe {
    pub fn set(&self, uri: &str, content_type: Option<&str>) {
        self.types
            .lock()
            .unwrap()
            .insert(uri.to_string(), content_type.map(str::to_string));
    }
}

#[async_trait]
impl ContentProbe for FakeProbe {
    async fn content_type(&self, uri: &str) -> newsreel_core::Result<Option<String>> {
        self.probed.lock().unwrap().push(uri.to_string());
        match self.types.lock().unwrap().get(uri) {
            Some(content_type) => Ok(content_type.clone()),
            None => Err(MediaError::network("connection refused")),
        }
    }
}

// ===== Harness =====

pub struct Harness {
    pub controller: PlaybackController,
    pub platform: FakePlatform,
    pub metadata: Arc<FakeMetadata>,
    pub history: Arc<FakeHistory>,
    pub bridge: Arc<FakeBridge>,
    pub probe: Arc<FakeProbe>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_config(PlaybackConfig::default())
    }

    pub fn with_config(config: PlaybackConfig) -> Self {
        let platform = FakePlatform::new();
        let metadata = Arc::new(FakeMetadata::default());
        let history = Arc::new(FakeHistory::default());
        let bridge = Arc::new(FakeBridge::default());
        let probe = Arc::new(FakeProbe::default());

        let services = PlaybackServices::new(Arc::new(platform.clone()))
            .with_probe(probe.clone())
            .with_metadata(metadata.clone())
            .with_history(history.clone())
            .with_media_controls(bridge.clone());
        let controller = PlaybackController::new(config, services).unwrap();

        Self {
            controller,
            platform,
            metadata,
            history,
            bridge,
            probe,
        }
    }
}
