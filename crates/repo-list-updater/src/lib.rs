//! Repo List Updater
//!
//! Regenerates `production-repos.json` from remote infrastructure
//! inventories (YAML service lists, Terraform module JSON).

pub mod config;
pub mod inventory;
pub mod names;
pub mod updater;

pub use config::Config;
pub use inventory::{Inventory, InventoryFetcher, InventoryFormat};
pub use names::{clean_repo_name, collect_names};
pub use updater::RepoListUpdater;
