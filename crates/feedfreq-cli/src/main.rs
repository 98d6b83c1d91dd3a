mod analyze;
mod feeds;
mod stopwords;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use feedfreq_core::{JsonFileSettingsStore, SettingsStore};
use tracing_subscriber::EnvFilter;

use crate::analyze::AnalyzeArgs;
use crate::feeds::FeedsCommands;
use crate::stopwords::StopwordsCommands;

#[derive(Debug, Parser)]
#[command(name = "feedfreq")]
#[command(about = "Word-frequency analysis over RSS and Atom feeds")]
struct Cli {
    /// Settings file (overrides FEEDFREQ_SETTINGS_PATH)
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch the selected feeds and rank the words they use
    Analyze(AnalyzeArgs),
    /// Manage the selected feed set
    Feeds {
        #[command(subcommand)]
        command: FeedsCommands,
    },
    /// Manage custom stopwords
    Stopwords {
        #[command(subcommand)]
        command: StopwordsCommands,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // `--help` and usage errors must not depend on the environment.
    let cli = Cli::parse();
    let config = feedfreq_core::load_app_config()?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let store = JsonFileSettingsStore::new(
        cli.settings
            .clone()
            .unwrap_or_else(|| config.settings_path.clone()),
    );
    tracing::debug!(env = %config.env, settings = %store.path().display(), "feedfreq starting");

    let mut out = std::io::stdout().lock();
    match cli.command {
        Commands::Analyze(args) => analyze::run_analyze(&config, &store, &args, &mut out).await,
        Commands::Feeds { command } => feeds::run_feeds(&store, &command, &mut out),
        Commands::Stopwords { command } => stopwords::run_stopwords(&store, &command, &mut out),
    }
}

/// Load settings, naming the file in the error.
pub(crate) fn load_settings(
    store: &JsonFileSettingsStore,
) -> anyhow::Result<feedfreq_core::Settings> {
    store
        .load()
        .map_err(|e| anyhow::anyhow!("{e}; fix or remove {}", store.path().display()))
}
