//! Remote inventory files
//!
//! Two shapes are understood:
//! - YAML service inventories: every top-level list whose items carry a
//!   `repo` field
//! - Terraform module JSON: the `source` of every entry under `module_calls`

use prodtag_common::{Error, Result};
use serde_json::Value as JsonValue;
use serde_yaml::Value as YamlValue;
use tracing::{debug, warn};
use url::Url;

/// Inventory format, chosen by file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InventoryFormat {
    Yaml,
    Json,
}

impl InventoryFormat {
    /// Detect the format from the URL path; `None` for unsupported files
    pub fn from_url(url: &str) -> Option<Self> {
        let path = Url::parse(url)
            .map(|u| u.path().to_string())
            .unwrap_or_else(|_| url.to_string())
            .to_ascii_lowercase();

        if path.ends_with(".yml") || path.ends_with(".yaml") {
            Some(Self::Yaml)
        } else if path.ends_with(".json") {
            Some(Self::Json)
        } else {
            None
        }
    }
}

/// A parsed inventory document
#[derive(Debug, Clone)]
pub enum Inventory {
    Yaml(YamlValue),
    Json(JsonValue),
}

impl Inventory {
    pub fn parse(format: InventoryFormat, text: &str) -> Result<Self> {
        Ok(match format {
            InventoryFormat::Yaml => Self::Yaml(serde_yaml::from_str(text)?),
            InventoryFormat::Json => Self::Json(serde_json::from_str(text)?),
        })
    }

    /// Raw repository references, in document order
    pub fn repo_references(&self) -> Vec<String> {
        match self {
            Self::Yaml(doc) => yaml_references(doc),
            Self::Json(doc) => json_references(doc),
        }
    }
}

fn yaml_references(doc: &YamlValue) -> Vec<String> {
    let Some(top) = doc.as_mapping() else {
        return Vec::new();
    };

    top.values()
        .filter_map(YamlValue::as_sequence)
        .flatten()
        .filter_map(|item| item.get("repo"))
        .filter_map(YamlValue::as_str)
        .map(str::to_string)
        .collect()
}

fn json_references(doc: &JsonValue) -> Vec<String> {
    let source = |item: &JsonValue| {
        item.get("source").and_then(JsonValue::as_str).map(str::to_string)
    };

    match doc.get("module_calls") {
        Some(JsonValue::Array(items)) => items.iter().filter_map(source).collect(),
        // terraform-config-inspect keys module calls by name
        Some(JsonValue::Object(calls)) => calls.values().filter_map(source).collect(),
        _ => Vec::new(),
    }
}

/// Downloads inventory files
pub struct InventoryFetcher {
    client: reqwest::Client,
}

impl Default for InventoryFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl InventoryFetcher {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Fetch and parse `url`; `Ok(None)` when its extension is unsupported
    pub async fn fetch(&self, url: &str) -> Result<Option<Inventory>> {
        let Some(format) = InventoryFormat::from_url(url) else {
            warn!("Skipping {}: not a .yml, .yaml or .json file", url);
            return Ok(None);
        };

        debug!("Fetching inventory: {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::InventoryFetch {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(Error::InventoryFetch {
                url: url.to_string(),
                message: format!("HTTP {} error", response.status().as_u16()),
            });
        }

        let text = response.text().await?;
        Inventory::parse(format, &text).map(Some)
    }
}
