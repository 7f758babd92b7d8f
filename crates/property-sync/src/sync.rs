//! Production property synchronizer
//!
//! Defines the `is_production` schema on the organisation, loads the
//! manifest, then sets and re-reads the property on each listed repository.
//! Repositories are processed one at a time; a failing repository is
//! recorded in the report and the batch moves on.

use crate::client::GitHubClient;
use crate::models::{PropertySchema, PropertyValue, RepoFullName, IS_PRODUCTION, TRUE_VALUE};
use prodtag_common::{manifest, Result};
use serde::Serialize;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use tracing::{error, info, warn};

/// What to do when the organisation schema cannot be defined
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SchemaFailurePolicy {
    /// Log the failure and still apply repository values
    #[default]
    Continue,
    /// Stop the run before touching any repository
    Abort,
}

impl FromStr for SchemaFailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "continue" => Ok(Self::Continue),
            "abort" => Ok(Self::Abort),
            other => Err(format!(
                "unknown schema failure policy '{}' (expected continue or abort)",
                other
            )),
        }
    }
}

impl fmt::Display for SchemaFailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Continue => write!(f, "continue"),
            Self::Abort => write!(f, "abort"),
        }
    }
}

/// Result of the schema step
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SchemaOutcome {
    Defined { status: u16 },
    Failed { error: String },
}

/// Final state of one repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RepoStatus {
    /// Value written and read back
    Verified { properties: Vec<PropertyValue> },
    /// Value written but the read-back failed
    Unverified { error: String },
    /// Value could not be written
    Failed { error: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepoOutcome {
    pub repository: String,
    #[serde(flatten)]
    pub status: RepoStatus,
}

/// Aggregate outcome of a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    pub schema: SchemaOutcome,
    pub repositories: Vec<RepoOutcome>,
}

impl SyncReport {
    /// Repositories whose value was written, verified or not
    pub fn applied_count(&self) -> usize {
        self.repositories
            .iter()
            .filter(|r| !matches!(r.status, RepoStatus::Failed { .. }))
            .count()
    }

    pub fn verified_count(&self) -> usize {
        self.repositories
            .iter()
            .filter(|r| matches!(r.status, RepoStatus::Verified { .. }))
            .count()
    }

    pub fn failed(&self) -> impl Iterator<Item = &RepoOutcome> {
        self.repositories
            .iter()
            .filter(|r| matches!(r.status, RepoStatus::Failed { .. }))
    }

    /// Schema defined and every repository written
    pub fn is_complete(&self) -> bool {
        matches!(self.schema, SchemaOutcome::Defined { .. })
            && self.applied_count() == self.repositories.len()
    }

    /// Write the report as pretty-printed JSON
    pub fn save(&self, path: &Path) -> Result<()> {
        let mut json = serde_json::to_string_pretty(self)?;
        json.push('\n');
        std::fs::write(path, json)?;
        Ok(())
    }
}

/// Applies the `is_production` property across an organisation
pub struct Synchronizer {
    client: GitHubClient,
    org: String,
    policy: SchemaFailurePolicy,
}

impl Synchronizer {
    pub fn new(client: GitHubClient, org: impl Into<String>, policy: SchemaFailurePolicy) -> Self {
        Self {
            client,
            org: org.into(),
            policy,
        }
    }

    /// Upsert the `is_production` schema on the organisation
    pub async fn define_schema(&self) -> Result<u16> {
        self.client
            .define_property_schema(&self.org, IS_PRODUCTION, &PropertySchema::is_production())
            .await
    }

    /// Full pass: schema, manifest, then every repository in manifest order
    ///
    /// Fails only on a manifest error, or on a schema error under
    /// [`SchemaFailurePolicy::Abort`].
    pub async fn run<P: AsRef<Path>>(&self, manifest_path: P) -> Result<SyncReport> {
        let schema = match self.define_schema().await {
            Ok(status) => {
                info!("Defined custom property for {}: Status {}", self.org, status);
                SchemaOutcome::Defined { status }
            }
            Err(e) => {
                error!("Failed to define custom property for {}: {}", self.org, e);
                if self.policy == SchemaFailurePolicy::Abort {
                    return Err(e);
                }
                warn!("Continuing with repository updates (schema failure policy: continue)");
                SchemaOutcome::Failed {
                    error: e.to_string(),
                }
            }
        };

        let repos = manifest::load(manifest_path.as_ref())?;

        info!("Repositories found in {}:", manifest_path.as_ref().display());
        for repo in &repos {
            info!("- {}", repo);
        }

        let repositories = self.apply(&repos).await;

        info!("Script execution completed.");

        Ok(SyncReport {
            schema,
            repositories,
        })
    }

    /// Set and verify the property on each named repository
    pub async fn apply(&self, repos: &[String]) -> Vec<RepoOutcome> {
        let mut outcomes = Vec::with_capacity(repos.len());
        for name in repos {
            outcomes.push(self.sync_repository(name).await);
        }
        outcomes
    }

    /// Set `is_production=true` on `org/name` and read the values back
    pub async fn sync_repository(&self, name: &str) -> RepoOutcome {
        let full_name = format!("{}/{}", self.org, name);
        info!("Setting custom property for: {}", name);

        let status = match RepoFullName::parse(&full_name) {
            Ok(repo) => self.set_and_verify(&repo).await,
            Err(e) => {
                error!("Failed to set properties for {}: {}", full_name, e);
                RepoStatus::Failed {
                    error: e.to_string(),
                }
            }
        };

        RepoOutcome {
            repository: full_name,
            status,
        }
    }

    async fn set_and_verify(&self, repo: &RepoFullName) -> RepoStatus {
        let properties = vec![PropertyValue::text(IS_PRODUCTION, TRUE_VALUE)];

        match self.client.set_property_values(repo, properties).await {
            Ok(status) => info!("Set properties for {}: Status {}", repo, status),
            Err(e) => {
                error!("Failed to set properties for {}: {}", repo, e);
                return RepoStatus::Failed {
                    error: e.to_string(),
                };
            }
        }

        match self.client.get_property_values(repo).await {
            Ok(properties) => {
                info!("Custom properties for {}: {:?}", repo, properties);
                RepoStatus::Verified { properties }
            }
            Err(e) => {
                error!("Failed to verify properties for {}: {}", repo, e);
                RepoStatus::Unverified {
                    error: e.to_string(),
                }
            }
        }
    }
}
