//! README count table
//!
//! Custom properties cannot be searched on GitHub, so the number of
//! production repositories is published as a table in the README between
//! two marker lines.

use prodtag_common::{manifest, Error, Result};
use std::path::Path;
use tracing::info;

pub const START_MARKER: &str = "<!--START_PRODUCTION_COUNT-->";
pub const END_MARKER: &str = "<!--END_PRODUCTION_COUNT-->";

/// Repository counts written to the README
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RepoCounts {
    pub production: usize,
    /// Not tracked yet; always zero
    pub development: usize,
}

/// Markdown table block, including its leading and trailing newline
pub fn render_table(counts: RepoCounts, prod_link: &str) -> String {
    format!(
        "
| **Repository Type**       | **Count** |
|---------------------------|-----------|
| Production Repositories   | [{}]({})        |
| Development Repositories  | {}        |
",
        counts.production, prod_link, counts.development
    )
}

/// Replace the content between the marker lines with `table`
///
/// The last line containing each marker is used. Without a start marker
/// preceding an end marker, a fresh marker block is appended instead.
pub fn splice(content: &str, table: &str) -> String {
    let lines: Vec<&str> = content.split_inclusive('\n').collect();
    let start = lines.iter().rposition(|line| line.contains(START_MARKER));
    let end = lines.iter().rposition(|line| line.contains(END_MARKER));

    match (start, end) {
        (Some(start), Some(end)) if start < end => {
            let mut spliced = String::with_capacity(content.len() + table.len());
            spliced.extend(lines[..=start].iter().copied());
            spliced.push_str(table);
            spliced.extend(lines[end..].iter().copied());
            spliced
        }
        _ => format!("{}\n{}\n{}\n{}\n", content, START_MARKER, table, END_MARKER),
    }
}

/// Count the manifest entries and rewrite the table in `readme_path`
///
/// # Errors
/// * Manifest errors as raised by [`manifest::load`]
/// * `Readme` when the README cannot be read or written
pub fn update_readme(
    readme_path: &Path,
    manifest_path: &Path,
    prod_link: &str,
) -> Result<RepoCounts> {
    let repos = manifest::load(manifest_path)?;
    let counts = RepoCounts {
        production: repos.len(),
        development: 0,
    };
    info!("Number of production repositories: {}", counts.production);

    let content = std::fs::read_to_string(readme_path).map_err(|e| {
        Error::Readme(format!("Failed to read {}: {}", readme_path.display(), e))
    })?;

    let updated = splice(&content, &render_table(counts, prod_link));

    std::fs::write(readme_path, updated).map_err(|e| {
        Error::Readme(format!("Failed to write {}: {}", readme_path.display(), e))
    })?;

    info!("Updated {}", readme_path.display());
    Ok(counts)
}
