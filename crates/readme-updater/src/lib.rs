//! README Updater
//!
//! Publishes the number of production repositories as a Markdown table
//! inside the README.

pub mod config;
pub mod readme;

pub use config::Config;
pub use readme::{render_table, splice, update_readme, RepoCounts, END_MARKER, START_MARKER};
