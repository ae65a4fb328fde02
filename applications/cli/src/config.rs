/// CLI configuration
use crate::error::{CliError, Result};
use newsreel_playback::{uri::parse_origin, PlaybackConfig};
use newsreel_server_client::ServerConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file picked up from the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "newsreel.toml";

/// Prefix of environment overrides, e.g. `NEWSREEL_SERVER__URL`
pub const ENV_PREFIX: &str = "NEWSREEL";

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct CliConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub playback: PlaybackConfig,
}

impl CliConfig {
    /// Load configuration from file and environment
    ///
    /// An explicit `path` must exist; the default file is optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_env(path, environment())
    }

    /// Same as [`CliConfig::load`] with a caller-supplied environment source
    pub fn load_with_env(path: Option<&Path>, env: config::Environment) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                if !path.exists() {
                    return Err(CliError::Config(format!(
                        "config file not found: {}",
                        path.display()
                    )));
                }
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        // Override with environment variables
        settings = settings.add_source(env);

        settings.build()?.try_deserialize().map_err(CliError::from)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let url = self.server.url.trim();
        if url.is_empty() {
            return Err(CliError::Config(format!(
                "server URL is required (set {}_SERVER__URL)",
                ENV_PREFIX
            )));
        }
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(CliError::Config(format!(
                "server URL must start with http:// or https://, got {}",
                url
            )));
        }

        if let Some(origin) = self.playback.api_origin.as_deref() {
            parse_origin(origin)?;
        }

        Ok(())
    }

    /// Origin used for URI rebasing: the configured one, else the server URL
    pub fn effective_origin(&self) -> Option<&str> {
        self.playback
            .api_origin
            .as_deref()
            .or_else(|| Some(self.server.url.as_str()).filter(|u| !u.trim().is_empty()))
    }
}

fn environment() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}
