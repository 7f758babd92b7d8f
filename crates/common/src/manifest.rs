//! Production manifest file
//!
//! The manifest is a JSON array of bare repository names, e.g.
//! `["billing-api", "web-frontend"]`. Order and duplicates are kept as
//! written; callers decide whether to normalise.

use crate::error::{Error, Result};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, error};

/// Load the manifest at `path`
///
/// # Errors
/// * `ManifestNotFound` when the file does not exist, with the resolved
///   absolute path and a listing of the working directory
/// * `ManifestMalformed` when the content is not a JSON array of strings
pub fn load<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let path = path.as_ref();

    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            let resolved = absolute(path);
            let cwd_entries = list_current_dir();
            error!(
                "Manifest not found at {}; current directory contains: {:?}",
                resolved.display(),
                cwd_entries
            );
            return Err(Error::ManifestNotFound {
                path: resolved,
                cwd_entries,
            });
        }
        Err(e) => return Err(e.into()),
    };

    let names = parse(&contents).map_err(|reason| {
        error!("Error decoding manifest {}: {}", path.display(), reason);
        Error::ManifestMalformed {
            path: path.to_path_buf(),
            reason,
        }
    })?;

    debug!("Loaded {} repositories from {}", names.len(), path.display());
    Ok(names)
}

/// Write `names` to `path` as a JSON array indented by two spaces
pub fn save<P: AsRef<Path>>(path: P, names: &[String]) -> Result<()> {
    let path = path.as_ref();
    let mut json = serde_json::to_string_pretty(names)?;
    json.push('\n');
    std::fs::write(path, json)?;

    debug!("Wrote {} repositories to {}", names.len(), path.display());
    Ok(())
}

fn parse(contents: &str) -> std::result::Result<Vec<String>, String> {
    let value: Value =
        serde_json::from_str(contents).map_err(|e| format!("invalid JSON: {}", e))?;

    let Value::Array(items) = value else {
        return Err(format!(
            "expected a JSON array of repository names, found {}",
            kind(&value)
        ));
    };

    items
        .into_iter()
        .enumerate()
        .map(|(idx, item)| match item {
            Value::String(name) => Ok(name),
            other => Err(format!("entry {} is {}, expected a string", idx, kind(&other))),
        })
        .collect()
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn absolute(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    std::env::current_dir()
        .map(|cwd| cwd.join(path))
        .unwrap_or_else(|_| path.to_path_buf())
}

fn list_current_dir() -> Vec<String> {
    let mut entries: Vec<String> = std::fs::read_dir(".")
        .map(|dir| {
            dir.filter_map(|entry| entry.ok())
                .map(|entry| entry.file_name().to_string_lossy().into_owned())
                .collect()
        })
        .unwrap_or_default();
    entries.sort();
    entries
}
