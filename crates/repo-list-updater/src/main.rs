//! Repo List Updater
//!
//! Fetches inventory files and overwrites the production manifest.

use anyhow::Result;
use clap::Parser;
use repo_list_updater::{Config, RepoListUpdater};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "repo-list-updater")]
#[command(about = "Regenerate production-repos.json from remote inventories")]
struct Cli {
    /// Inventory URL; repeat for several (overrides INVENTORY_URLS)
    #[arg(short, long = "source")]
    sources: Vec<String>,

    /// Manifest to write (overrides MANIFEST_PATH)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,repo_list_updater=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = Config::from_env_with(|key| match key {
        "INVENTORY_URLS" if !cli.sources.is_empty() => Some(cli.sources.join(",")),
        "MANIFEST_PATH" => cli
            .output
            .as_ref()
            .map(|p| p.to_string_lossy().into_owned()),
        _ => None,
    })?;

    info!("Reading {} inventory sources", config.sources.len());

    let updater = RepoListUpdater::new(config.sources);
    let names = updater.update(&config.manifest_path).await?;

    for name in &names {
        info!("- {}", name);
    }

    Ok(())
}
