//! Data models for the GitHub custom properties API

use prodtag_common::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Name of the organisation property marking production repositories
pub const IS_PRODUCTION: &str = "is_production";

/// Value written to every production repository
///
/// The API string-encodes custom property values whatever the declared type.
pub const TRUE_VALUE: &str = "true";

/// Declared type of a custom property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueType {
    String,
    SingleSelect,
    MultiSelect,
    TrueFalse,
}

/// Who may change the value of a custom property on a repository
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValuesEditableBy {
    OrgActors,
    OrgAndRepoActors,
}

/// Organisation-level custom property definition (PUT body)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertySchema {
    pub value_type: ValueType,
    pub required: bool,
    pub default_value: String,
    pub description: String,
    /// Serialized as `null` when unset
    pub allowed_values: Option<Vec<String>>,
    pub values_editable_by: ValuesEditableBy,
}

impl PropertySchema {
    /// The fixed `is_production` boolean schema
    pub fn is_production() -> Self {
        Self {
            value_type: ValueType::TrueFalse,
            required: false,
            default_value: String::new(),
            description: "Indicates if the repository is in production".to_string(),
            allowed_values: None,
            values_editable_by: ValuesEditableBy::OrgAndRepoActors,
        }
    }
}

/// Value of a custom property as returned by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CustomPropertyValue {
    Text(String),
    List(Vec<String>),
}

impl fmt::Display for CustomPropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CustomPropertyValue::Text(text) => write!(f, "{}", text),
            CustomPropertyValue::List(items) => write!(f, "[{}]", items.join(", ")),
        }
    }
}

/// A single property name/value pair on a repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyValue {
    pub property_name: String,
    pub value: Option<CustomPropertyValue>,
}

impl PropertyValue {
    pub fn text(property_name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            property_name: property_name.into(),
            value: Some(CustomPropertyValue::Text(value.into())),
        }
    }
}

/// PATCH body for repository property values
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyValuesUpdate {
    pub properties: Vec<PropertyValue>,
}

/// Error body returned by the API
#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorBody {
    pub message: Option<String>,
}

/// Repository identified as `owner/repo`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoFullName {
    pub owner: String,
    pub repo: String,
}

impl RepoFullName {
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
        }
    }

    /// Parse `owner/repo`
    ///
    /// Both parts go into request paths unescaped, so each must be a valid
    /// GitHub name: ASCII letters, digits, `.`, `-` and `_`, and not `.` or `..`.
    pub fn parse(full_name: &str) -> Result<Self> {
        match full_name.split('/').collect::<Vec<_>>().as_slice() {
            [owner, repo] if is_valid_name(owner) && is_valid_name(repo) => {
                Ok(Self::new(*owner, *repo))
            }
            _ => Err(Error::InvalidRepositoryName(full_name.to_string())),
        }
    }
}

fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
}

impl fmt::Display for RepoFullName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_schema_body() {
        let body = serde_json::to_value(PropertySchema::is_production()).unwrap();

        assert_eq!(
            body,
            json!({
                "value_type": "true_false",
                "required": false,
                "default_value": "",
                "description": "Indicates if the repository is in production",
                "allowed_values": null,
                "values_editable_by": "org_and_repo_actors"
            })
        );
    }

    #[test]
    fn test_value_is_sent_as_string() {
        let update = PropertyValuesUpdate {
            properties: vec![PropertyValue::text(IS_PRODUCTION, TRUE_VALUE)],
        };

        let body = serde_json::to_value(&update).unwrap();
        assert_eq!(
            body,
            json!({"properties": [{"property_name": "is_production", "value": "true"}]})
        );
    }

    #[test]
    fn test_read_values_with_null_and_list() {
        let values: Vec<PropertyValue> = serde_json::from_value(json!([
            {"property_name": "is_production", "value": "true"},
            {"property_name": "team", "value": null},
            {"property_name": "langs", "value": ["rust", "go"]}
        ]))
        .unwrap();

        assert_eq!(values[0], PropertyValue::text("is_production", "true"));
        assert_eq!(values[1].value, None);
        assert_eq!(
            values[2].value.as_ref().map(ToString::to_string),
            Some("[rust, go]".to_string())
        );
    }

    #[test]
    fn test_repo_full_name_parse() {
        let name = RepoFullName::parse("acme/billing-api").unwrap();
        assert_eq!(name.owner, "acme");
        assert_eq!(name.repo, "billing-api");
        assert_eq!(name.to_string(), "acme/billing-api");

        assert!(RepoFullName::parse("billing-api").is_err());
        assert!(RepoFullName::parse("acme/").is_err());
        assert!(RepoFullName::parse("acme/nested/repo").is_err());
    }

    #[test]
    fn test_repo_full_name_rejects_path_and_query_characters() {
        assert!(RepoFullName::parse("acme/gitops.github.io").is_ok());
        assert!(RepoFullName::parse("acme/my_repo-2").is_ok());

        for name in [
            "acme/..",
            "acme/.",
            "../api",
            "acme/api?x",
            "acme/api#frag",
            "acme/api%2Fx",
            "acme/api x",
            "acme/caf\u{e9}",
        ] {
            assert!(
                matches!(RepoFullName::parse(name), Err(Error::InvalidRepositoryName(_))),
                "{} should be rejected",
                name
            );
        }
    }
}
