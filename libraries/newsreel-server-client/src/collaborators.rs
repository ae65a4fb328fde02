//! `newsreel-core` collaborator implementations backed by the HTTP client.

use crate::client::NewsreelClient;
use async_trait::async_trait;
use newsreel_core::{ContentProbe, HistoryRecorder, MetadataService, TrackId, TrackMetadata};

#[async_trait]
impl MetadataService for NewsreelClient {
    async fn get_by_id(
        &self,
        track_id: &TrackId,
        auth_token: Option<&str>,
    ) -> newsreel_core::Result<Option<TrackMetadata>> {
        Ok(self.get_episode(track_id.as_str(), auth_token).await?)
    }
}

#[async_trait]
impl HistoryRecorder for NewsreelClient {
    async fn record_play(&self, track_id: &TrackId) -> newsreel_core::Result<()> {
        Ok(NewsreelClient::record_play(self, track_id.as_str()).await?)
    }
}

#[async_trait]
impl ContentProbe for NewsreelClient {
    async fn content_type(&self, uri: &str) -> newsreel_core::Result<Option<String>> {
        Ok(NewsreelClient::content_type(self, uri).await?)
    }
}
