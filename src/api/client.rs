//! JIRA API client implementation.
//!
//! This module provides the client for the JIRA REST API v2. It logs in
//! once with a session cookie and then issues plain request/response calls
//! for search, issue creation, and workflow transitions. Failed calls are
//! not retried.

use std::time::Duration;

use reqwest::{header, Client, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, error, info, instrument, warn};

use super::auth::Session;
use super::error::{ApiError, Result};
use super::types::{
    CloseTicket, CreateIssueRequest, CreatedIssue, NewTicket, SearchResult, SessionRequest,
    SessionResponse, Transition, TransitionRequest, TransitionsResponse,
};
use crate::config::Credentials;

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Index of the first search result requested.
pub const SEARCH_START_AT: u32 = 0;

/// Number of search results requested. Matches beyond this are not fetched.
pub const SEARCH_MAX_RESULTS: u32 = 100;

/// The JIRA API client.
///
/// Holds an authenticated session; construct it with [`JiraClient::authenticate`].
#[derive(Debug)]
pub struct JiraClient {
    /// The HTTP client.
    client: Client,
    /// The base URL for the JIRA instance.
    base_url: String,
    /// The session obtained at login.
    session: Session,
}

impl JiraClient {
    /// Log in to JIRA and return a client bound to the new session.
    ///
    /// Calls `POST /rest/auth/1/session` with the stored login and password.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No endpoint is configured
    /// - The HTTP client cannot be built
    /// - The instance cannot be reached (`ConnectionFailed`)
    /// - The login is rejected (`Unauthorized`)
    /// - The response carries no session cookie (`InvalidResponse`)
    #[instrument(skip(credentials), fields(login = %credentials.login))]
    pub async fn authenticate(credentials: &Credentials) -> Result<Self> {
        let endpoint = credentials
            .endpoint()
            .ok_or_else(|| ApiError::InvalidUrl("no JIRA endpoint configured".to_string()))?;
        let base_url = normalize_base_url(endpoint);
        let client = Self::build_http_client()?;

        info!(endpoint = %base_url, "Acquiring JIRA session");

        let url = format!("{}/rest/auth/1/session", base_url);
        let body = SessionRequest {
            username: &credentials.login,
            password: &credentials.password,
        };

        let response = client
            .post(&url)
            .header(header::ACCEPT, "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!("Session request failed: {}", e);
                ApiError::ConnectionFailed(format!("Cannot connect to {}: {}", base_url, e))
            })?;

        let session: SessionResponse = Self::handle_response(response).await?;
        if session.session.name.is_empty() || session.session.value.is_empty() {
            return Err(ApiError::InvalidResponse(
                "login succeeded but no session cookie was returned".to_string(),
            ));
        }

        info!("JIRA session acquired");
        Ok(Self {
            client,
            base_url,
            session: Session::new(&credentials.login, &session.session),
        })
    }

    /// Build the HTTP client with appropriate settings.
    fn build_http_client() -> Result<Client> {
        Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .map_err(ApiError::Network)
    }

    /// Search for issues using JQL.
    ///
    /// Always requests the first page only (`startAt=0`, `maxResults=100`);
    /// callers can check [`SearchResult::has_more`] to detect truncation.
    #[instrument(skip(self), fields(jql = %jql))]
    pub async fn search(&self, jql: &str) -> Result<SearchResult> {
        let url = format!(
            "{}/rest/api/2/search?jql={}&startAt={}&maxResults={}",
            self.base_url,
            urlencoding::encode(jql),
            SEARCH_START_AT,
            SEARCH_MAX_RESULTS
        );

        let result: SearchResult = self.get(&url).await?;
        debug!("Found {} issues (total: {})", result.issues.len(), result.total);
        Ok(result)
    }

    /// Create a new issue.
    ///
    /// Calls `POST /rest/api/2/issue` and returns the server's reply, whose
    /// key is passed through unchanged.
    #[instrument(skip(self, ticket), fields(project = %ticket.project_id))]
    pub async fn create_issue(&self, ticket: &NewTicket) -> Result<CreatedIssue> {
        let url = format!("{}/rest/api/2/issue", self.base_url);
        let request = CreateIssueRequest::from(ticket);

        let created: CreatedIssue = self.post(&url, &request).await.map_err(|e| match e {
            ApiError::BadRequest(msg) => ApiError::CreateFailed(msg),
            other => other,
        })?;

        info!(issue_key = %created.key, "Created issue");
        Ok(created)
    }

    /// Get the transitions currently available on an issue.
    #[instrument(skip(self), fields(issue_key = %key))]
    pub async fn get_transitions(&self, key: &str) -> Result<Vec<Transition>> {
        let url = format!("{}/rest/api/2/issue/{}/transitions", self.base_url, key);
        let response: TransitionsResponse = self.get(&url).await.map_err(|e| {
            if matches!(e, ApiError::NotFound(_)) {
                ApiError::NotFound(format!("Issue '{}' not found", key))
            } else {
                e
            }
        })?;

        debug!("Issue has {} transitions", response.transitions.len());
        Ok(response.transitions)
    }

    /// Apply a transition to an issue.
    #[instrument(skip(self, request), fields(issue_key = %key, transition_id = %request.transition.id))]
    pub async fn transition_issue(&self, key: &str, request: &TransitionRequest) -> Result<()> {
        let url = format!("{}/rest/api/2/issue/{}/transitions", self.base_url, key);

        let response = self
            .client
            .post(&url)
            .header(header::COOKIE, self.session.header_value())
            .header(header::ACCEPT, "application/json")
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NO_CONTENT || status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        debug!("Error response body: {}", body);
        Err(match Self::error_from_response(status, &url, &body) {
            ApiError::BadRequest(msg) => ApiError::TransitionFailed(msg),
            other => other,
        })
    }

    /// Close a ticket using the caller's transition, resolution and assignee.
    ///
    /// Looks up the issue's available transitions, picks the one named
    /// `close.transition` (case-insensitive) and submits it.
    ///
    /// # Errors
    ///
    /// Returns `TransitionFailed` if no transition with that name is
    /// available on the issue.
    #[instrument(skip(self, close), fields(issue_key = %close.key))]
    pub async fn close_ticket(&self, close: &CloseTicket) -> Result<Transition> {
        let transitions = self.get_transitions(&close.key).await?;

        let transition = find_transition(&transitions, &close.transition)
            .cloned()
            .ok_or_else(|| {
                let available = transitions
                    .iter()
                    .map(|t| t.name.as_str())
                    .collect::<Vec<_>>()
                    .join(", ");
                ApiError::TransitionFailed(format!(
                    "'{}' is not available for {} (available: {})",
                    close.transition,
                    close.key,
                    if available.is_empty() { "none" } else { available.as_str() }
                ))
            })?;

        let request = TransitionRequest::new(&transition.id, close);
        self.transition_issue(&close.key, &request).await?;

        info!(transition = %transition.name, "Transitioned issue");
        Ok(transition)
    }

    /// Perform a GET request with the session cookie.
    async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = self
            .client
            .get(url)
            .header(header::COOKIE, self.session.header_value())
            .header(header::ACCEPT, "application/json")
            .send()
            .await?;

        Self::handle_response(response).await
    }

    /// Perform a POST request with a JSON body and the session cookie.
    async fn post<B: Serialize, T: DeserializeOwned>(&self, url: &str, body: &B) -> Result<T> {
        let response = self
            .client
            .post(url)
            .header(header::COOKIE, self.session.header_value())
            .header(header::ACCEPT, "application/json")
            .json(body)
            .send()
            .await?;

        Self::handle_response(response).await
    }

    /// Handle the HTTP response, checking for errors and parsing JSON.
    async fn handle_response<T: DeserializeOwned>(response: Response) -> Result<T> {
        let status = response.status();
        let url = response.url().to_string();

        if status.is_success() {
            response
                .json::<T>()
                .await
                .map_err(|e| ApiError::InvalidResponse(format!("Failed to parse response: {}", e)))
        } else {
            let error_body = response.text().await.unwrap_or_default();
            debug!("Error response body: {}", error_body);

            Err(Self::error_from_response(status, &url, &error_body))
        }
    }

    /// Create an appropriate error from an HTTP response.
    fn error_from_response(status: StatusCode, url: &str, body: &str) -> ApiError {
        let context = if body.is_empty() {
            url.to_string()
        } else {
            // JIRA returns {"errorMessages": [...], "errors": {field: message}}
            if let Ok(json) = serde_json::from_str::<serde_json::Value>(body) {
                if let Some(arr) = json.get("errorMessages").and_then(|m| m.as_array()) {
                    if !arr.is_empty() {
                        return ApiError::from_status(
                            status,
                            &arr.iter()
                                .filter_map(|v| v.as_str())
                                .collect::<Vec<_>>()
                                .join(", "),
                        );
                    }
                }
                if let Some(obj) = json.get("errors").and_then(|e| e.as_object()) {
                    let error_strings: Vec<String> = obj
                        .iter()
                        .map(|(k, v)| match v.as_str() {
                            Some(s) => format!("{}: {}", k, s),
                            None => format!("{}: {}", k, v),
                        })
                        .collect();
                    if !error_strings.is_empty() {
                        return ApiError::from_status(status, &error_strings.join(", "));
                    }
                }
            }
            url.to_string()
        };

        ApiError::from_status(status, &context)
    }

    /// The login the session belongs to.
    pub fn login(&self) -> &str {
        self.session.login()
    }

    /// Web URL for viewing an issue.
    pub fn browse_url(&self, key: &str) -> String {
        format!("{}/browse/{}", self.base_url, key)
    }
}

/// Find a transition by name, ignoring case.
fn find_transition<'a>(transitions: &'a [Transition], name: &str) -> Option<&'a Transition> {
    transitions
        .iter()
        .find(|t| t.name.eq_ignore_ascii_case(name.trim()))
}

/// Normalize the base URL by removing trailing slashes.
fn normalize_base_url(url: &str) -> String {
    let url = url.trim().trim_end_matches('/');

    // Warn if not HTTPS (but don't enforce for local testing)
    if !url.starts_with("https://") && !url.contains("localhost") && !url.contains("127.0.0.1") {
        warn!("URL does not use HTTPS: {}. This is insecure for production use.", url);
    }

    url.to_string()
}
