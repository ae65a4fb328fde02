/// CLI error types
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Server client error: {0}")]
    Client(#[from] newsreel_server_client::ServerClientError),

    #[error("Playback error: {0}")]
    Playback(#[from] newsreel_playback::PlaybackError),
}

impl From<config::ConfigError> for CliError {
    fn from(e: config::ConfigError) -> Self {
        Self::Config(e.to_string())
    }
}
