use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use recents::{JsonSettings, PathCapabilities, RecentsConfig, RecentsStore};
use tracing_subscriber::EnvFilter;

mod commands;

use commands::Commands;

/// Directory name under the platform config dir
const APP_NAME: &str = "WelcomeKit";

#[derive(Parser)]
#[command(name = "welcomekit")]
#[command(about = "Recent documents and document workflows", long_about = None)]
struct Cli {
    /// Settings file (defaults to the platform config directory)
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    /// Maximum number of recent documents to keep
    #[arg(long, global = true, default_value_t = recents::DEFAULT_CAPACITY)]
    capacity: usize,

    #[command(subcommand)]
    command: Commands,
}

fn open_store(settings: Option<&Path>, capacity: usize) -> anyhow::Result<RecentsStore> {
    let settings = match settings {
        Some(path) => JsonSettings::new(path),
        None => JsonSettings::default_location(APP_NAME)
            .context("no platform config directory; pass --settings")?,
    };
    tracing::debug!("Using settings at {}", settings.path().display());

    Ok(RecentsStore::with_config(
        Arc::new(settings),
        Arc::new(PathCapabilities),
        RecentsConfig::with_capacity(capacity),
    ))
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Setup logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let store = Arc::new(open_store(cli.settings.as_deref(), cli.capacity)?);
    cli.command.execute(store).await
}
