//! Sentiscope CLI
//!
//! - `sentiscope serve` - host the dashboard and the analysis documents
//! - `sentiscope check` - fetch and validate every configured source
//! - `sentiscope config` - print the default configuration file

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sentiscope::config::{generate_default_config, Config};
use sentiscope::loader::{DataLoader, HttpTransport};
use sentiscope::server::{serve, AppState};

#[derive(Parser)]
#[command(name = "sentiscope", version, about = "Sentiment analysis dashboard")]
struct Cli {
    /// Path to a configuration file (defaults to the standard locations)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Host the dashboard and the analysis documents (default)
    Serve,
    /// Fetch and validate every configured source, then report per-source
    /// outcomes. Exits non-zero when nothing loads.
    Check,
    /// Print the default configuration file to stdout
    Config,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_with_env(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => Config::load_default(),
    };

    init_tracing(&config);

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => run_serve(config).await,
        Command::Check => run_check(config).await,
        Command::Config => {
            print!("{}", generate_default_config());
            Ok(())
        }
    }
}

fn init_tracing(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(format!(
            "sentiscope={},tower_http=warn",
            config.logging.level
        ))
    });

    let registry = tracing_subscriber::registry().with(filter);
    if config.logging.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn run_serve(config: Config) -> anyhow::Result<()> {
    tracing::info!("Starting Sentiscope v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "Serving dashboard from {:?}, documents from {:?}",
        config.server.static_dir,
        config.server.results_dir
    );

    serve(AppState::new(config)).await?;
    Ok(())
}

async fn run_check(config: Config) -> anyhow::Result<()> {
    let sources = config.source_specs();
    tracing::info!("Checking {} configured sources", sources.len());

    let loader = DataLoader::new(HttpTransport::new(), config.loader_config());
    let report = loader.load_all(&sources).await;

    for (source, document) in report.successes() {
        let date = document
            .metadata
            .analysis_date
            .as_deref()
            .and_then(|d| chrono::DateTime::parse_from_rfc3339(d).ok())
            .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "sin fecha".to_string());

        tracing::info!(
            source = %source.id,
            topic = %document.metadata.topic,
            comments = document.metadata.total_comments,
            analyzed = %date,
            "source ok"
        );
    }

    for (source, error) in report.failures() {
        tracing::error!(source = %source.id, url = %source.url, error = %error, "source failed");
    }

    let loaded = report.loaded_count();
    let failed = report.failed_count();
    tracing::info!(loaded, failed, "check complete");

    report
        .into_registry()
        .context("no analysis documents could be loaded")?;
    Ok(())
}
