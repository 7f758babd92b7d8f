//! Repository name cleaning
//!
//! Inventories reference repositories in many shapes: clone URLs,
//! Terraform module sources, SSH remotes. Everything is reduced to the bare
//! repository name.

use std::collections::BTreeSet;
use url::Url;

/// Artifact produced by malformed source entries; never a real repository
pub const SENTINEL: &str = "https";

/// Reduce a repository reference to its bare name
///
/// `https://github.com/org/my-repo.git` and
/// `git::https://github.com/org/my-repo.git//modules/vpc?ref=v1` both give
/// `my-repo`.
pub fn clean_repo_name(reference: &str) -> String {
    let reference = reference.trim();
    // Terraform forced getter, e.g. `git::https://...`
    let reference = reference
        .split_once("::")
        .map(|(_, rest)| rest)
        .unwrap_or(reference);

    let path = match Url::parse(reference) {
        Ok(url) => url.path().to_string(),
        Err(_) => reference
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .to_string(),
    };

    let path = path.trim_start_matches('/');
    // Terraform subdirectory, e.g. `repo.git//modules/vpc`
    let path = path.split("//").next().unwrap_or_default();
    let last = path.trim_end_matches('/').rsplit('/').next().unwrap_or_default();

    last.strip_suffix(".git").unwrap_or(last).to_string()
}

/// Clean, deduplicate and sort references, dropping the sentinel and blanks
pub fn collect_names<I, S>(references: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    references
        .into_iter()
        .map(|r| clean_repo_name(r.as_ref()))
        .filter(|name| !name.is_empty() && name != SENTINEL)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
