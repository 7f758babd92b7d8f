//! Property Sync
//!
//! Defines the `is_production` custom property and sets it on every
//! repository listed in the production manifest.

use anyhow::{Context, Result};
use clap::Parser;
use property_sync::{Config, GitHubClient, SchemaFailurePolicy, Synchronizer};
use std::path::PathBuf;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "property-sync")]
#[command(about = "Tag production repositories with the is_production custom property")]
struct Cli {
    /// Organisation name (overrides ORG_NAME)
    #[arg(short, long)]
    org: Option<String>,

    /// Path to production-repos.json (overrides MANIFEST_PATH)
    #[arg(short, long)]
    manifest: Option<PathBuf>,

    /// GitHub API base URL (overrides GITHUB_API_URL)
    #[arg(long)]
    api_url: Option<String>,

    /// continue or abort when the schema cannot be defined (overrides SCHEMA_FAILURE_POLICY)
    #[arg(long)]
    schema_failure_policy: Option<SchemaFailurePolicy>,

    /// Write the run report as JSON to this path
    #[arg(long)]
    report: Option<PathBuf>,
}

impl Cli {
    fn lookup(&self, key: &str) -> Option<String> {
        match key {
            "ORG_NAME" => self.org.clone(),
            "MANIFEST_PATH" => self
                .manifest
                .as_ref()
                .map(|p| p.to_string_lossy().into_owned()),
            "GITHUB_API_URL" => self.api_url.clone(),
            "SCHEMA_FAILURE_POLICY" => self.schema_failure_policy.map(|p| p.to_string()),
            _ => None,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,property_sync=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = Config::from_env_with(|key| cli.lookup(key))?;
    info!("Organisation: {}", config.org);
    info!("GitHub API: {}", config.api_url);
    info!("Manifest: {}", config.manifest_path.display());
    info!("Schema failure policy: {}", config.schema_failure_policy);

    let client = GitHubClient::new(&config.api_url, &config.token)
        .context("Failed to create GitHub client")?;
    let synchronizer = Synchronizer::new(client, &config.org, config.schema_failure_policy);

    let report = synchronizer.run(&config.manifest_path).await?;

    if let Some(path) = &cli.report {
        report
            .save(path)
            .with_context(|| format!("Failed to write report to {}", path.display()))?;
        info!("Report written to {}", path.display());
    }

    info!(
        "Processed {} repositories: {} applied, {} verified",
        report.repositories.len(),
        report.applied_count(),
        report.verified_count()
    );
    for failed in report.failed() {
        error!("Not applied: {}", failed.repository);
    }
    if !report.is_complete() {
        warn!("Run finished with failures");
    }

    Ok(())
}
