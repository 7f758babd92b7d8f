//! Integration tests for the repo list updater

use axum::{http::StatusCode, routing::get, Router};
use prodtag_common::{manifest, Error};
use repo_list_updater::RepoListUpdater;

const SERVICES_YAML: &str = r#"
services:
  - name: web
    repo: https://github.com/acme/web.git
  - name: api
    repo: https://github.com/acme/api.git
  - name: broken
    repo: https
jobs:
  - name: nightly
    repo: git@github.com:acme/batch-jobs.git
"#;

const MODULES_JSON: &str = r#"{
  "path": "infra",
  "module_calls": [
    {"name": "network", "source": "git::https://github.com/acme/network.git//vpc?ref=v2"},
    {"name": "web", "source": "https://github.com/acme/web.git"}
  ]
}"#;

/// Serve the inventory fixtures and return the base URL
async fn start_inventory_server() -> String {
    let app = Router::new()
        .route("/services.yml", get(|| async { SERVICES_YAML }))
        .route("/modules.json", get(|| async { MODULES_JSON }))
        .route("/notes.txt", get(|| async { "repo: https://github.com/acme/ignored.git" }))
        .route("/missing.json", get(|| async { StatusCode::NOT_FOUND }));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to port");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

#[tokio::test]
async fn test_update_writes_cleaned_manifest() {
    let base = start_inventory_server().await;
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("production-repos.json");

    let updater = RepoListUpdater::new(vec![
        format!("{}/services.yml", base),
        format!("{}/modules.json", base),
        format!("{}/notes.txt", base),
    ]);

    let names = updater.update(&output).await.unwrap();

    assert_eq!(names, vec!["api", "batch-jobs", "network", "web"]);
    assert_eq!(manifest::load(&output).unwrap(), names);
}

#[tokio::test]
async fn test_fetch_failure_leaves_manifest_untouched() {
    let base = start_inventory_server().await;
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("production-repos.json");
    std::fs::write(&output, "[\"existing\"]").unwrap();

    let updater = RepoListUpdater::new(vec![
        format!("{}/services.yml", base),
        format!("{}/missing.json", base),
    ]);

    match updater.update(&output).await {
        Err(Error::InventoryFetch { url, message }) => {
            assert!(url.ends_with("/missing.json"));
            assert_eq!(message, "HTTP 404 error");
        }
        other => panic!("expected fetch error, got {:?}", other),
    }
    assert_eq!(manifest::load(&output).unwrap(), vec!["existing"]);
}
