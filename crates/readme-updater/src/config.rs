//! Configuration management for the README updater

use anyhow::Result;
use prodtag_common::DEFAULT_MANIFEST_PATH;
use std::env;
use std::path::PathBuf;

pub const DEFAULT_README_PATH: &str = "ReadMe.md";

/// Link target written into the production count cell
pub const DEFAULT_MANIFEST_LINK: &str = "../production-repos.json";

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// README to rewrite
    pub readme_path: PathBuf,

    /// Manifest to count
    pub manifest_path: PathBuf,

    /// Link to the manifest as seen from the README
    pub manifest_link: String,
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
        let config = Config {
            readme_path: lookup("README_PATH")
                .unwrap_or_else(|| DEFAULT_README_PATH.to_string())
                .into(),
            manifest_path: lookup("MANIFEST_PATH")
                .unwrap_or_else(|| DEFAULT_MANIFEST_PATH.to_string())
                .into(),
            manifest_link: lookup("MANIFEST_LINK")
                .unwrap_or_else(|| DEFAULT_MANIFEST_LINK.to_string()),
        };

        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.manifest_link.trim().is_empty() {
            anyhow::bail!("MANIFEST_LINK must not be empty");
        }

        Ok(())
    }
}
