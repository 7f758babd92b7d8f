//! Configuration management for the property synchronizer
//!
//! Loads configuration from environment variables, with command-line
//! overrides applied on top.

use crate::client::DEFAULT_API_URL;
use crate::sync::SchemaFailurePolicy;
use anyhow::{Context, Result};
use prodtag_common::{Error, DEFAULT_MANIFEST_PATH};
use std::env;
use std::path::PathBuf;

/// Application configuration
#[derive(Clone)]
pub struct Config {
    /// Bearer token for the GitHub API
    pub token: String,

    /// Organisation owning the production repositories
    pub org: String,

    /// GitHub API base URL
    pub api_url: String,

    /// Path to production-repos.json
    pub manifest_path: PathBuf,

    /// Behaviour when the schema definition fails
    pub schema_failure_policy: SchemaFailurePolicy,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("token", &"<redacted>")
            .field("org", &self.org)
            .field("api_url", &self.api_url)
            .field("manifest_path", &self.manifest_path)
            .field("schema_failure_policy", &self.schema_failure_policy)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// `overrides` is consulted first for every key (command-line flags).
    pub fn from_env_with<F>(overrides: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Load .env file if it exists (for local development)
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| overrides(key).or_else(|| env::var(key).ok()))
    }

    /// Build configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let token = lookup("OAUTH_TOKEN")
            .filter(|t| !t.is_empty())
            .ok_or_else(|| {
                Error::MissingConfig("OAUTH_TOKEN environment variable is not set".to_string())
            })?;

        let org = lookup("ORG_NAME")
            .filter(|o| !o.trim().is_empty())
            .ok_or_else(|| {
                Error::MissingConfig("ORG_NAME environment variable is not set".to_string())
            })?;

        let config = Config {
            token,
            org: org.trim().to_string(),

            api_url: lookup("GITHUB_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),

            manifest_path: lookup("MANIFEST_PATH")
                .unwrap_or_else(|| DEFAULT_MANIFEST_PATH.to_string())
                .into(),

            schema_failure_policy: lookup("SCHEMA_FAILURE_POLICY")
                .map(|p| p.parse::<SchemaFailurePolicy>())
                .transpose()
                .map_err(anyhow::Error::msg)
                .context("Invalid SCHEMA_FAILURE_POLICY")?
                .unwrap_or_default(),
        };

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration
    fn validate(&self) -> Result<()> {
        if self.org.contains('/') {
            anyhow::bail!("ORG_NAME must be a bare organisation name, got '{}'", self.org);
        }

        if !self.api_url.starts_with("http://") && !self.api_url.starts_with("https://") {
            anyhow::bail!("GITHUB_API_URL must be an http(s) URL, got '{}'", self.api_url);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_config_defaults() {
        let config =
            Config::from_lookup(lookup_from(&[("OAUTH_TOKEN", "t0k3n"), ("ORG_NAME", "acme")]))
                .expect("Failed to load config");

        assert_eq!(config.token, "t0k3n");
        assert_eq!(config.org, "acme");
        assert_eq!(config.api_url, "https://api.github.com");
        assert_eq!(config.manifest_path, PathBuf::from("production-repos.json"));
        assert_eq!(config.schema_failure_policy, SchemaFailurePolicy::Continue);
    }

    #[test]
    fn test_missing_token_is_fatal() {
        let err = Config::from_lookup(lookup_from(&[("ORG_NAME", "acme")])).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<Error>(),
            Some(Error::MissingConfig(msg)) if msg.contains("OAUTH_TOKEN")
        ));
    }

    #[test]
    fn test_missing_org_is_fatal() {
        let err = Config::from_lookup(lookup_from(&[("OAUTH_TOKEN", "t0k3n"), ("ORG_NAME", " ")]))
            .unwrap_err();

        assert!(err.to_string().contains("ORG_NAME"));
    }

    #[test]
    fn test_policy_from_env() {
        let config = Config::from_lookup(lookup_from(&[
            ("OAUTH_TOKEN", "t0k3n"),
            ("ORG_NAME", "acme"),
            ("SCHEMA_FAILURE_POLICY", "abort"),
        ]))
        .unwrap();
        assert_eq!(config.schema_failure_policy, SchemaFailurePolicy::Abort);

        let result = Config::from_lookup(lookup_from(&[
            ("OAUTH_TOKEN", "t0k3n"),
            ("ORG_NAME", "acme"),
            ("SCHEMA_FAILURE_POLICY", "retry"),
        ]));
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_rejects_org_with_slash() {
        let result = Config::from_lookup(lookup_from(&[
            ("OAUTH_TOKEN", "t0k3n"),
            ("ORG_NAME", "acme/api"),
        ]));
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("bare organisation name"));
    }

    #[test]
    fn test_debug_redacts_token() {
        let config =
            Config::from_lookup(lookup_from(&[("OAUTH_TOKEN", "s3cret"), ("ORG_NAME", "acme")]))
                .unwrap();
        assert!(!format!("{:?}", config).contains("s3cret"));
    }
}
