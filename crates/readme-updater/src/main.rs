//! README Updater
//!
//! Counts production-repos.json and rewrites the count table in the README.

use anyhow::{Context, Result};
use clap::Parser;
use readme_updater::{update_readme, Config};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "readme-updater")]
#[command(about = "Update the production repository count table in the README")]
struct Cli {
    /// README to rewrite (overrides README_PATH)
    #[arg(short, long)]
    readme: Option<PathBuf>,

    /// Manifest to count (overrides MANIFEST_PATH)
    #[arg(short, long)]
    manifest: Option<PathBuf>,

    /// Manifest link written into the table (overrides MANIFEST_LINK)
    #[arg(short, long)]
    link: Option<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,readme_updater=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = Config::from_env_with(|key| match key {
        "README_PATH" => cli.readme.as_ref().map(|p| p.to_string_lossy().into_owned()),
        "MANIFEST_PATH" => cli.manifest.as_ref().map(|p| p.to_string_lossy().into_owned()),
        "MANIFEST_LINK" => cli.link.clone(),
        _ => None,
    })?;

    let counts = update_readme(&config.readme_path, &config.manifest_path, &config.manifest_link)
        .context("Failed to load or update repositories")?;

    info!(
        "README now reports {} production and {} development repositories",
        counts.production, counts.development
    );

    Ok(())
}
