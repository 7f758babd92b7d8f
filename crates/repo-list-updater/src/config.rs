//! Configuration management for the repo list updater

use anyhow::Result;
use prodtag_common::{Error, DEFAULT_MANIFEST_PATH};
use std::env;
use std::path::PathBuf;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Inventory files to read, in order
    pub sources: Vec<String>,

    /// Manifest to overwrite
    pub manifest_path: PathBuf,
}

impl Config {
    /// Load configuration from environment variables, `overrides` first
    pub fn from_env_with<F>(overrides: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| overrides(key).or_else(|| env::var(key).ok()))
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let sources: Vec<String> = lookup("INVENTORY_URLS")
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();

        if sources.is_empty() {
            return Err(Error::MissingConfig(
                "INVENTORY_URLS must list at least one inventory URL".to_string(),
            )
            .into());
        }

        Ok(Config {
            sources,
            manifest_path: lookup("MANIFEST_PATH")
                .unwrap_or_else(|| DEFAULT_MANIFEST_PATH.to_string())
                .into(),
        })
    }
}
