/// Command implementations
use crate::config::CliConfig;
use crate::error::Result;
use newsreel_core::TrackMetadata;
use newsreel_playback::{is_audio_content_type, resolve_playback_uri, uri::parse_origin};
use newsreel_server_client::NewsreelClient;
use serde::Serialize;
use tracing::{info, warn};

/// Outcome of a content probe, printed as JSON
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProbeReport {
    pub uri: String,
    pub resolved_uri: String,
    pub content_type: Option<String>,
    pub playable: bool,
}

/// Rebase `uri` onto the configured origin
pub fn resolve(config: &CliConfig, uri: &str) -> Result<String> {
    let origin = config.effective_origin().map(parse_origin).transpose()?;
    Ok(resolve_playback_uri(uri, origin.as_ref()))
}

/// Resolve `uri` and report what the preflight check would decide
pub async fn probe(client: &NewsreelClient, config: &CliConfig, uri: &str) -> Result<ProbeReport> {
    let resolved_uri = resolve(config, uri)?;
    let content_type = client.content_type(&resolved_uri).await?;

    // Preflight lets through anything without a declared type
    let playable = content_type.as_deref().map_or(true, is_audio_content_type);
    if !playable {
        warn!(uri = %resolved_uri, content_type = ?content_type, "Not an audio resource");
    }

    Ok(ProbeReport {
        uri: uri.to_string(),
        resolved_uri,
        content_type,
        playable,
    })
}

/// Fetch episode metadata as pretty JSON (`null` when unknown)
pub async fn metadata(client: &NewsreelClient, track_id: &str) -> Result<String> {
    let metadata = client.get_episode(track_id, None).await?;
    match &metadata {
        None => info!(track_id = %track_id, "No metadata for episode"),
        Some(m) if m.is_empty() => info!(track_id = %track_id, "Episode metadata has no usable fields"),
        Some(_) => {}
    }
    Ok(render_metadata(metadata.as_ref()))
}

/// Pretty JSON for a metadata response; empty responses render as `null`
pub fn render_metadata(metadata: Option<&TrackMetadata>) -> String {
    let usable = metadata.filter(|m| !m.is_empty());
    serde_json::to_string_pretty(&usable).unwrap_or_else(|_| "null".to_string())
}

/// Report a play to the history endpoint
pub async fn record_play(client: &NewsreelClient, track_id: &str) -> Result<()> {
    client.record_play(track_id).await?;
    info!(track_id = %track_id, "Play recorded");
    Ok(())
}

/// Effective configuration as TOML, with the token masked
pub fn show_config(config: &CliConfig) -> String {
    let mut shown = config.clone();
    if shown.server.access_token.is_some() {
        shown.server.access_token = Some("********".to_string());
    }
    toml::to_string_pretty(&shown).unwrap_or_else(|e| format!("# failed to render config: {}", e))
}
