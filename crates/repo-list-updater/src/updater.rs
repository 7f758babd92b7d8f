//! Manifest regeneration from inventories

use crate::inventory::InventoryFetcher;
use crate::names::collect_names;
use prodtag_common::{manifest, Result};
use std::path::Path;
use tracing::info;

/// Rebuilds the production manifest from a fixed set of inventory URLs
pub struct RepoListUpdater {
    fetcher: InventoryFetcher,
    sources: Vec<String>,
}

impl RepoListUpdater {
    pub fn new(sources: Vec<String>) -> Self {
        Self {
            fetcher: InventoryFetcher::new(),
            sources,
        }
    }

    /// Fetch every source and return the cleaned, deduplicated names
    ///
    /// Any fetch or parse failure aborts before anything is written.
    pub async fn collect(&self) -> Result<Vec<String>> {
        let mut references = Vec::new();

        for url in &self.sources {
            if let Some(inventory) = self.fetcher.fetch(url).await? {
                let found = inventory.repo_references();
                info!("Found {} repository references in {}", found.len(), url);
                references.extend(found);
            }
        }

        Ok(collect_names(references))
    }

    /// Collect names and overwrite the manifest at `output`
    pub async fn update<P: AsRef<Path>>(&self, output: P) -> Result<Vec<String>> {
        let names = self.collect().await?;
        manifest::save(output.as_ref(), &names)?;

        info!(
            "Wrote {} production repositories to {}",
            names.len(),
            output.as_ref().display()
        );
        Ok(names)
    }
}
