//! Lazy metadata enhancement
//!
//! Fetches the rich fields (script, chapters, publisher ...) a track was
//! queued without. Pure request/response: applying the result, and deciding
//! whether it is still wanted, is the controller's job.

use newsreel_core::{MetadataService, TrackId, TrackMetadata};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// Metadata fetcher bound to a service and an optional auth token
pub struct MetadataEnhancer {
    service: Arc<dyn MetadataService>,
    auth_token: RwLock<Option<String>>,
}

impl MetadataEnhancer {
    /// Create an enhancer backed by `service`
    pub fn new(service: Arc<dyn MetadataService>) -> Self {
        Self {
            service,
            auth_token: RwLock::new(None),
        }
    }

    /// Set (or clear) the token passed to the service
    pub async fn set_auth_token(&self, token: Option<String>) {
        *self.auth_token.write().await = token;
    }

    /// Fetch metadata for `track_id`
    ///
    /// A response with no usable field is reported as `Ok(None)`.
    pub async fn fetch(&self, track_id: &TrackId) -> newsreel_core::Result<Option<TrackMetadata>> {
        let token = self.auth_token.read().await.clone();
        debug!(track_id = %track_id, authenticated = token.is_some(), "Fetching track metadata");

        let metadata = self.service.get_by_id(track_id, token.as_deref()).await?;
        Ok(metadata.filter(|m| !m.is_empty()))
    }
}
