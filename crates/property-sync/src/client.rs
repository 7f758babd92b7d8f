//! Client for the GitHub custom properties REST API

use crate::models::{
    ApiErrorBody, PropertySchema, PropertyValue, PropertyValuesUpdate, RepoFullName,
};
use anyhow::Context;
use prodtag_common::{Error, Result};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::{Response, StatusCode};
use tracing::debug;

/// Public GitHub API endpoint
pub const DEFAULT_API_URL: &str = "https://api.github.com";

const API_VERSION: &str = "2022-11-28";

/// Client for organisation and repository custom properties
pub struct GitHubClient {
    base_url: String,
    client: reqwest::Client,
}

impl GitHubClient {
    /// Create a client authenticating every request with `token`
    pub fn new(base_url: impl Into<String>, token: &str) -> Result<Self> {
        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", token))
            .context("OAuth token contains invalid header characters")?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));
        headers.insert("x-github-api-version", HeaderValue::from_static(API_VERSION));
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("prodtag-property-sync/", env!("CARGO_PKG_VERSION"))),
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .context("Failed to build HTTP client")?;

        let base_url: String = base_url.into();
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Create or replace an organisation custom property definition
    ///
    /// Succeeds only on 200; returns the status code.
    pub async fn define_property_schema(
        &self,
        org: &str,
        property_name: &str,
        schema: &PropertySchema,
    ) -> Result<u16> {
        let url = format!(
            "{}/orgs/{}/properties/schema/{}",
            self.base_url, org, property_name
        );

        debug!("Defining property schema: PUT {}", url);

        let response = self.client.put(&url).json(schema).send().await?;

        if response.status() != StatusCode::OK {
            let (status, message) = error_details(response).await;
            return Err(Error::SchemaDefinition {
                org: org.to_string(),
                status,
                message,
            });
        }

        Ok(response.status().as_u16())
    }

    /// Create or update property values on a repository
    ///
    /// Succeeds only on 204; returns the status code.
    pub async fn set_property_values(
        &self,
        repo: &RepoFullName,
        properties: Vec<PropertyValue>,
    ) -> Result<u16> {
        let url = self.values_url(repo);

        debug!("Setting property values: PATCH {}", url);

        let response = self
            .client
            .patch(&url)
            .json(&PropertyValuesUpdate { properties })
            .send()
            .await?;

        if response.status() != StatusCode::NO_CONTENT {
            let (status, message) = error_details(response).await;
            return Err(Error::PropertyWrite {
                repo: repo.to_string(),
                status,
                message,
            });
        }

        Ok(response.status().as_u16())
    }

    /// Get all custom property values of a repository
    pub async fn get_property_values(&self, repo: &RepoFullName) -> Result<Vec<PropertyValue>> {
        let url = self.values_url(repo);

        debug!("Fetching property values: GET {}", url);

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            let (status, message) = error_details(response).await;
            return Err(Error::PropertyRead {
                repo: repo.to_string(),
                status,
                message,
            });
        }

        Ok(response.json().await?)
    }

    fn values_url(&self, repo: &RepoFullName) -> String {
        format!(
            "{}/repos/{}/{}/properties/values",
            self.base_url, repo.owner, repo.repo
        )
    }
}

/// Status code and the API `message` field, or `HTTP {status} error`
async fn error_details(response: Response) -> (u16, String) {
    let status = response.status().as_u16();
    let message = response
        .text()
        .await
        .ok()
        .and_then(|body| serde_json::from_str::<ApiErrorBody>(&body).ok())
        .and_then(|body| body.message)
        .unwrap_or_else(|| format!("HTTP {} error", status));

    (status, message)
}
