use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Missing configuration: {0}")]
    MissingConfig(String),

    #[error(
        "Manifest not found at {}; current directory contains: {}",
        path.display(),
        cwd_entries.join(", ")
    )]
    ManifestNotFound {
        path: PathBuf,
        cwd_entries: Vec<String>,
    },

    #[error("Malformed manifest {}: {reason}", path.display())]
    ManifestMalformed { path: PathBuf, reason: String },

    #[error("Failed to define custom property for {org}: {message} (status {status})")]
    SchemaDefinition {
        org: String,
        status: u16,
        message: String,
    },

    #[error("Failed to set properties for {repo}: {message} (status {status})")]
    PropertyWrite {
        repo: String,
        status: u16,
        message: String,
    },

    #[error("Failed to read properties for {repo}: {message} (status {status})")]
    PropertyRead {
        repo: String,
        status: u16,
        message: String,
    },

    #[error("Invalid repository name '{0}', expected owner/repo")]
    InvalidRepositoryName(String),

    #[error("Failed to fetch inventory {url}: {message}")]
    InventoryFetch { url: String, message: String },

    #[error("README error: {0}")]
    Readme(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message_lists_directory() {
        let err = Error::ManifestNotFound {
            path: PathBuf::from("/work/production-repos.json"),
            cwd_entries: vec!["Cargo.toml".to_string(), "crates".to_string()],
        };

        let message = err.to_string();
        assert!(message.contains("/work/production-repos.json"));
        assert!(message.contains("Cargo.toml, crates"));
    }
}
