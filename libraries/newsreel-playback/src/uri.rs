//! Played-URI resolution
//!
//! Backends sometimes hand out URLs built from their own bind address
//! (`http://127.0.0.1:8000/...`), which a phone cannot reach. When the host or
//! port differs from the configured API origin, the URI is rebuilt on the
//! origin's scheme/host/port with path and query preserved.

use crate::error::{PlaybackError, Result};
use url::Url;

/// Schemes that go over the network and can be rebased or preflighted
pub fn is_network_uri(uri: &str) -> bool {
    Url::parse(uri).is_ok_and(|u| matches!(u.scheme(), "http" | "https"))
}

/// Parse and validate a configured API origin
pub fn parse_origin(origin: &str) -> Result<Url> {
    let url = Url::parse(origin.trim())
        .map_err(|e| PlaybackError::InvalidConfig(format!("api_origin {origin:?}: {e}")))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(PlaybackError::InvalidConfig(format!(
            "api_origin must be http or https, got {}",
            url.scheme()
        )));
    }
    if url.host_str().is_none() {
        return Err(PlaybackError::InvalidConfig(format!(
            "api_origin {origin:?} has no host"
        )));
    }

    Ok(url)
}

/// Resolve the URI actually handed to the platform
///
/// - No origin configured: unchanged.
/// - Non-network scheme (`file:`, `content:` ...): unchanged.
/// - Host and port match the origin: unchanged.
/// - Otherwise: origin scheme/host/port + original path, query, fragment.
/// - Relative URI: joined onto the origin.
pub fn resolve_playback_uri(uri: &str, origin: Option<&Url>) -> String {
    let Some(origin) = origin else {
        return uri.to_string();
    };

    match Url::parse(uri) {
        Ok(parsed) => {
            if !matches!(parsed.scheme(), "http" | "https") || same_host_and_port(&parsed, origin) {
                return uri.to_string();
            }

            let mut rebased = origin.clone();
            rebased.set_path(parsed.path());
            rebased.set_query(parsed.query());
            rebased.set_fragment(parsed.fragment());
            rebased.to_string()
        }
        Err(url::ParseError::RelativeUrlWithoutBase) => origin
            .join(uri)
            .map(|u| u.to_string())
            .unwrap_or_else(|_| uri.to_string()),
        Err(_) => uri.to_string(),
    }
}

fn same_host_and_port(a: &Url, b: &Url) -> bool {
    a.host_str() == b.host_str() && a.port_or_known_default() == b.port_or_known_default()
}
