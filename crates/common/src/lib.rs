//! Shared pieces of the production repository tooling
//!
//! - `error`: the error type every tool reports through
//! - `manifest`: reading and writing `production-repos.json`

pub mod error;
pub mod manifest;

pub use error::{Error, Result};

/// Default manifest file name, relative to the working directory
pub const DEFAULT_MANIFEST_PATH: &str = "production-repos.json";
