//! Content-type preflight
//!
//! A HEAD (or 1-byte ranged GET) against the resolved URI catches backends
//! that answer with an HTML error page instead of audio. Network failures
//! are fail-open: the platform gets a chance to load the source anyway.

use crate::error::{PlaybackError, Result};
use crate::uri::is_network_uri;
use newsreel_core::ContentProbe;
use tracing::{debug, warn};

/// Whether a media type is playable audio
///
/// Accepts `audio/*` and `application/ogg`; parameters and case are ignored.
pub fn is_audio_content_type(content_type: &str) -> bool {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    essence.starts_with("audio/") || essence == "application/ogg"
}

/// Check the content type advertised for `resolved_uri`
///
/// Returns `PreflightRejected` (carrying `uri`) only when the server states a
/// non-audio type. Missing headers and probe failures pass.
pub async fn check(probe: &dyn ContentProbe, uri: &str, resolved_uri: &str) -> Result<()> {
    if !is_network_uri(resolved_uri) {
        return Ok(());
    }

    match probe.content_type(resolved_uri).await {
        Ok(Some(content_type)) if !is_audio_content_type(&content_type) => {
            warn!(uri = %uri, resolved_uri = %resolved_uri, content_type = %content_type, "Preflight rejected non-audio source");
            Err(PlaybackError::PreflightRejected {
                uri: uri.to_string(),
                content_type,
            })
        }
        Ok(content_type) => {
            debug!(uri = %resolved_uri, content_type = ?content_type, "Preflight passed");
            Ok(())
        }
        Err(e) => {
            warn!(uri = %resolved_uri, error = %e, "Preflight probe failed, continuing");
            Ok(())
        }
    }
}
