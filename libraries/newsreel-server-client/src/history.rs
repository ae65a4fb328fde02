//! Play history reporting.

use crate::error::{Result, ServerClientError};
use crate::types::HistoryRequest;
use reqwest::{Client, StatusCode};
use tracing::debug;

/// History client for the Newsreel API.
pub struct HistoryClient<'a> {
    http: &'a Client,
    base_url: &'a str,
    access_token: Option<&'a str>,
}

impl<'a> HistoryClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a str, access_token: Option<&'a str>) -> Self {
        Self {
            http,
            base_url,
            access_token,
        }
    }

    /// Record a play of `track_id`.
    pub async fn record_play(&self, track_id: &str) -> Result<()> {
        let url = format!("{}/api/history", self.base_url);
        debug!(url = %url, track_id = %track_id, "Recording play");

        let body = HistoryRequest {
            track_id: track_id.to_string(),
        };
        let mut request = self.http.post(&url).json(&body);
        if let Some(token) = self.access_token {
            request = request.bearer_auth(token);
        }
        let response = request.send().await.map_err(ServerClientError::from_send)?;

        let status = response.status();

        if status.is_success() {
            Ok(())
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
