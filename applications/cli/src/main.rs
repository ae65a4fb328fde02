/// Newsreel - operator CLI for the playback collaborators
use clap::{Parser, Subcommand};
use newsreel_cli::{commands, CliConfig};
use newsreel_server_client::NewsreelClient;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "newsreel")]
#[command(about = "Inspect Newsreel episode audio and metadata endpoints", long_about = None)]
struct Cli {
    /// Configuration file path (defaults to ./newsreel.toml if present)
    #[arg(short, long, global = true, env = "NEWSREEL_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the URI the player would actually open
    Resolve {
        /// Track URI as issued by the backend
        uri: String,
    },
    /// Check the content type of a track URI
    Probe {
        /// Track URI as issued by the backend
        uri: String,
    },
    /// Fetch episode metadata
    Metadata {
        /// Episode (track) id
        id: String,
    },
    /// Record a play in the server history
    RecordPlay {
        /// Episode (track) id
        id: String,
    },
    /// Print the effective configuration
    ShowConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "newsreel=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = CliConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::ShowConfig => {
            println!("{}", commands::show_config(&config));
        }
        Commands::Resolve { uri } => {
            println!("{}", commands::resolve(&config, &uri)?);
        }
        Commands::Probe { uri } => {
            let client = connect(&config)?;
            let report = commands::probe(&client, &config, &uri).await?;
            println!("{}", serde_json::to_string_pretty(&report)?);
            if !report.playable {
                anyhow::bail!("{} is not an audio resource", report.resolved_uri);
            }
        }
        Commands::Metadata { id } => {
            let client = connect(&config)?;
            println!("{}", commands::metadata(&client, &id).await?);
        }
        Commands::RecordPlay { id } => {
            let client = connect(&config)?;
            commands::record_play(&client, &id).await?;
        }
    }

    Ok(())
}

fn connect(config: &CliConfig) -> anyhow::Result<NewsreelClient> {
    config.validate()?;
    let client = NewsreelClient::new(config.server.clone())?;
    tracing::debug!(url = %config.server.url, "Client ready");
    Ok(client)
}
