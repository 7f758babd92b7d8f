//! Production property synchronizer
//!
//! Marks production repositories of a GitHub organisation with the
//! `is_production` custom property.
//!
//! **Components:**
//! - `client`: GitHub custom properties REST client
//! - `models`: request and response bodies
//! - `sync`: schema definition, manifest loading and the per-repository loop
//! - `config`: configuration management
//!
//! **Flow:**
//! 1. Upsert the organisation schema (`PUT /orgs/{org}/properties/schema/is_production`)
//! 2. Load `production-repos.json`
//! 3. For each repository, `PATCH` the value and `GET` it back

pub mod client;
pub mod config;
pub mod models;
pub mod sync;

pub use client::GitHubClient;
pub use config::Config;
pub use models::{PropertySchema, PropertyValue, RepoFullName};
pub use sync::{
    RepoOutcome, RepoStatus, SchemaFailurePolicy, SchemaOutcome, SyncReport, Synchronizer,
};
