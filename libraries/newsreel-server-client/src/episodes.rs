//! Episode metadata lookups.

use crate::error::{Result, ServerClientError};
use crate::types::EpisodeResponse;
use newsreel_core::TrackMetadata;
use reqwest::{Client, StatusCode};
use tracing::debug;

/// Episode client for the Newsreel API.
pub struct EpisodeClient<'a> {
    http: &'a Client,
    base_url: &'a str,
    access_token: Option<&'a str>,
}

impl<'a> EpisodeClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a str, access_token: Option<&'a str>) -> Self {
        Self {
            http,
            base_url,
            access_token,
        }
    }

    /// Get metadata for one episode.
    pub async fn get_episode(&self, track_id: &str) -> Result<Option<TrackMetadata>> {
        let url = format!("{}/api/episodes/{}", self.base_url, track_id);
        debug!(url = %url, authenticated = self.access_token.is_some(), "Fetching episode metadata");

        let mut request = self.http.get(&url);
        if let Some(token) = self.access_token {
            request = request.bearer_auth(token);
        }
        let response = request.send().await.map_err(ServerClientError::from_send)?;

        let status = response.status();

        if status.is_success() {
            let episode: EpisodeResponse = response.json().await.map_err(|e| {
                ServerClientError::ParseError(format!("Failed to parse episode response: {}", e))
            })?;

            debug!(
                track_id = %track_id,
                has_script = episode.script.is_some(),
                chapters = episode.chapters.as_ref().map_or(0, Vec::len),
                "Fetched episode metadata"
            );

            Ok(Some(episode.into()))
        } else if status == StatusCode::NOT_FOUND {
            debug!(track_id = %track_id, "Episode not found");
            Ok(None)
        } else if status == StatusCode::UNAUTHORIZED {
            Err(ServerClientError::AuthRequired)
        } else {
            let error_text = response.text().await.unwrap_or_default();
            Err(ServerClientError::ServerError {
                status: status.as_u16(),
                message: error_text,
            })
        }
    }
}
