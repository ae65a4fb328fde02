//! Main Newsreel API client.

use crate::episodes::EpisodeClient;
use crate::error::{Result, ServerClientError};
use crate::history::HistoryClient;
use crate::probe::ProbeClient;
use crate::types::ServerConfig;
use newsreel_core::TrackMetadata;
use reqwest::Client;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

/// Client for the Newsreel API.
///
/// Cheap to clone; clones share the HTTP connection pool and the stored
/// access token.
///
/// No request timeouts are configured. A slow server leaves the caller
/// waiting, exactly like the platform media layer does.
///
/// # Example
///
/// ```ignore
/// use newsreel_server_client::{NewsreelClient, ServerConfig};
///
/// let client = NewsreelClient::new(ServerConfig::with_token("https://api.example.com", "token"))?;
///
/// if let Some(episode) = client.get_episode("ep-42", None).await? {
///     println!("{:?}", episode.title);
/// }
/// client.record_play("ep-42").await?;
/// ```
#[derive(Clone)]
pub struct NewsreelClient {
    http: Client,
    config: Arc<RwLock<ServerConfig>>,
}

impl NewsreelClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ServerConfig) -> Result<Self> {
        // Validate URL
        if config.url.trim().is_empty() {
            return Err(ServerClientError::InvalidUrl("URL cannot be empty".into()));
        }

        // Parse and normalize URL
        let url = config.url.trim().trim_end_matches('/').to_string();
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ServerClientError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }

        let http = Client::builder()
            .user_agent(format!("Newsreel/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            config: Arc::new(RwLock::new(ServerConfig {
                url,
                access_token: config.access_token,
            })),
        })
    }

    /// Get the normalized base URL.
    pub async fn url(&self) -> String {
        self.config.read().await.url.clone()
    }

    /// Check if the client has an access token.
    pub async fn is_authenticated(&self) -> bool {
        self.config.read().await.access_token.is_some()
    }

    /// Replace (or clear) the stored access token.
    pub async fn set_access_token(&self, access_token: Option<String>) {
        let mut config = self.config.write().await;
        if access_token.is_none() && config.access_token.is_some() {
            info!("Access token cleared");
        }
        config.access_token = access_token;
    }

    async fn base_and_token(&self) -> (String, Option<String>) {
        let config = self.config.read().await;
        (config.url.clone(), config.access_token.clone())
    }

    /// Fetch episode metadata.
    ///
    /// `access_token` overrides the stored token for this request.
    /// Returns `Ok(None)` when the server has no such episode.
    pub async fn get_episode(
        &self,
        track_id: &str,
        access_token: Option<&str>,
    ) -> Result<Option<TrackMetadata>> {
        let (url, stored) = self.base_and_token().await;
        let token = access_token.or(stored.as_deref());
        EpisodeClient::new(&self.http, &url, token)
            .get_episode(track_id)
            .await
    }

    /// Record that a track started playing.
    pub async fn record_play(&self, track_id: &str) -> Result<()> {
        let (url, token) = self.base_and_token().await;
        HistoryClient::new(&self.http, &url, token.as_deref())
            .record_play(track_id)
            .await
    }

    /// Content type advertised for `uri` (any host, not just the API).
    pub async fn content_type(&self, uri: &str) -> Result<Option<String>> {
        ProbeClient::new(&self.http).content_type(uri).await
    }
}
