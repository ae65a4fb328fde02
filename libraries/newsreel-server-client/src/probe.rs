//! Lightweight content-type probing.

use crate::error::{Result, ServerClientError};
use reqwest::header::{CONTENT_TYPE, RANGE};
use reqwest::{Client, Response};
use tracing::debug;

/// Media type of a `Content-Type` value, without parameters, lower-cased
pub fn media_type(content_type: &str) -> Option<String> {
    let essence = content_type.split(';').next().unwrap_or_default().trim();
    if essence.is_empty() {
        None
    } else {
        Some(essence.to_ascii_lowercase())
    }
}

fn response_media_type(response: &Response) -> Option<String> {
    response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(media_type)
}

/// Probe client: HEAD first, then a one-byte ranged GET.
pub struct ProbeClient<'a> {
    http: &'a Client,
}

impl<'a> ProbeClient<'a> {
    pub(crate) fn new(http: &'a Client) -> Self {
        Self { http }
    }

    /// Content type advertised for `uri`, or `None` if the server sends none.
    pub async fn content_type(&self, uri: &str) -> Result<Option<String>> {
        match self.http.head(uri).send().await {
            Ok(response) if response.status().is_success() => {
                return Ok(response_media_type(&response));
            }
            Ok(response) => {
                debug!(uri = %uri, status = response.status().as_u16(), "HEAD rejected, trying ranged GET");
            }
            Err(e) => {
                debug!(uri = %uri, error = %e, "HEAD failed, trying ranged GET");
            }
        }

        let response = self
            .http
            .get(uri)
            .header(RANGE, "bytes=0-0")
            .send()
            .await
            .map_err(ServerClientError::from_send)?;

        let status = response.status();
        if status.is_success() {
            Ok(response_media_type(&response))
        } else {
            Err(ServerClientError::ServerError {
                status: status.as_u16(),
                message: format!("probe of {} failed", uri),
            })
        }
    }
}
