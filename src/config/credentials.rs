//! The persisted JIRA credentials.

use serde::{Deserialize, Serialize};

use super::{ConfigError, Result};

/// Login details and defaults for a single JIRA instance.
///
/// Stored verbatim (password included) as one JSON object.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Credentials {
    /// The JIRA username.
    pub login: String,

    /// The JIRA password, in plaintext.
    pub password: String,

    /// The project ID new tickets are filed under (e.g. "11000").
    #[serde(rename = "projectid", default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,

    /// The issue type ID new tickets are created with (e.g. "6").
    #[serde(rename = "issuetype", default, skip_serializing_if = "Option::is_none")]
    pub issue_type: Option<String>,

    /// The JIRA instance URL (e.g. "https://company.atlassian.net").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
}

impl Credentials {
    /// Replace the endpoint for this run without touching the stored file.
    pub fn with_endpoint_override(mut self, endpoint: Option<&str>) -> Self {
        if let Some(endpoint) = endpoint {
            self.endpoint = Some(endpoint.to_string());
        }
        self
    }

    /// Validate these credentials before authenticating.
    ///
    /// Checks that:
    /// - The login is non-empty
    /// - An endpoint is configured and is an http(s) URL
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::ValidationError` describing the first problem.
    pub fn validate(&self) -> Result<()> {
        if self.login.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "login cannot be empty".to_string(),
            ));
        }

        let endpoint = self.endpoint().ok_or_else(|| {
            ConfigError::ValidationError("no JIRA endpoint configured".to_string())
        })?;

        if !endpoint.starts_with("https://") && !endpoint.starts_with("http://") {
            return Err(ConfigError::ValidationError(format!(
                "endpoint '{}' must start with http:// or https://",
                endpoint
            )));
        }

        Ok(())
    }

    /// The configured endpoint, if set and non-empty.
    pub fn endpoint(&self) -> Option<&str> {
        non_empty(&self.endpoint)
    }

    /// The project ID, failing if it was never configured.
    pub fn require_project_id(&self) -> Result<&str> {
        non_empty(&self.project_id).ok_or_else(|| {
            ConfigError::ValidationError(
                "no project ID configured; add \"projectid\" to the credentials file".to_string(),
            )
        })
    }

    /// The issue type ID, failing if it was never configured.
    pub fn require_issue_type(&self) -> Result<&str> {
        non_empty(&self.issue_type).ok_or_else(|| {
            ConfigError::ValidationError(
                "no issue type configured; add \"issuetype\" to the credentials file".to_string(),
            )
        })
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

// Keep the password out of logs and panic messages.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("login", &self.login)
            .field("password", &"<redacted>")
            .field("project_id", &self.project_id)
            .field("issue_type", &self.issue_type)
            .field("endpoint", &self.endpoint)
            .finish()
    }
}
