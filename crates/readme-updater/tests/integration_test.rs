//! Integration tests for the README updater

use prodtag_common::Error;
use readme_updater::{update_readme, RepoCounts, END_MARKER, START_MARKER};
use std::path::PathBuf;

const LINK: &str = "../production-repos.json";

fn setup(readme: &str, manifest: &str) -> (tempfile::TempDir, PathBuf, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let readme_path = dir.path().join("ReadMe.md");
    let manifest_path = dir.path().join("production-repos.json");
    std::fs::write(&readme_path, readme).unwrap();
    std::fs::write(&manifest_path, manifest).unwrap();
    (dir, readme_path, manifest_path)
}

#[test]
fn test_rewrites_table_between_markers() {
    let original = format!(
        "# Production Repos\n\nSee below.\n\n{}\n| stale |\n{}\n\nMaintained by platform.\n",
        START_MARKER, END_MARKER
    );
    let (_dir, readme, manifest) = setup(&original, r#"["a", "b", "c", "d", "e"]"#);

    let counts = update_readme(&readme, &manifest, LINK).unwrap();

    assert_eq!(
        counts,
        RepoCounts {
            production: 5,
            development: 0
        }
    );

    let updated = std::fs::read_to_string(&readme).unwrap();
    assert!(updated.starts_with("# Production Repos\n\nSee below.\n\n"));
    assert!(updated.ends_with(&format!("{}\n\nMaintained by platform.\n", END_MARKER)));
    assert!(updated.contains("[5](../production-repos.json)"));
    assert!(!updated.contains("| stale |"));
}

#[test]
fn test_appends_markers_once() {
    let (_dir, readme, manifest) = setup("# Production Repos\n", r#"["api"]"#);

    update_readme(&readme, &manifest, LINK).unwrap();
    update_readme(&readme, &manifest, LINK).unwrap();

    let updated = std::fs::read_to_string(&readme).unwrap();
    assert!(updated.starts_with("# Production Repos\n"));
    assert_eq!(updated.matches(START_MARKER).count(), 1);
    assert_eq!(updated.matches(END_MARKER).count(), 1);
    assert!(updated.trim_end().ends_with(END_MARKER));
    assert!(updated.contains("[1](../production-repos.json)"));
}

#[test]
fn test_missing_readme_is_an_error() {
    let (dir, _readme, manifest) = setup("", "[]");

    let result = update_readme(&dir.path().join("absent.md"), &manifest, LINK);

    assert!(matches!(result, Err(Error::Readme(_))));
}

#[test]
fn test_malformed_manifest_leaves_readme_alone() {
    let (_dir, readme, manifest) = setup("# Production Repos\n", r#"{"api": 1}"#);

    let result = update_readme(&readme, &manifest, LINK);

    assert!(matches!(result, Err(Error::ManifestMalformed { .. })));
    assert_eq!(std::fs::read_to_string(&readme).unwrap(), "# Production Repos\n");
}
