//! JIRA API request and response types.
//!
//! These types model the JIRA REST API v2 payloads used for session login,
//! issue search, issue creation, and workflow transitions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Login request body for `POST /rest/auth/1/session`.
#[derive(Serialize)]
pub struct SessionRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// Response from `POST /rest/auth/1/session`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    /// The session cookie to send on subsequent requests.
    pub session: SessionCookie,
}

/// A session cookie name/value pair.
#[derive(Clone, Deserialize, PartialEq, Eq)]
pub struct SessionCookie {
    /// The cookie name, usually "JSESSIONID".
    pub name: String,
    /// The cookie value.
    pub value: String,
}

impl SessionCookie {
    /// Render as a `Cookie` header value.
    pub fn header_value(&self) -> String {
        format!("{}={}", self.name, self.value)
    }
}

impl fmt::Debug for SessionCookie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionCookie")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Search result from JQL query.
///
/// Returned by `GET /rest/api/2/search`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    /// The index of the first result.
    pub start_at: u32,
    /// Maximum results requested.
    pub max_results: u32,
    /// Total number of matching issues.
    pub total: u32,
    /// The list of issues.
    #[serde(default)]
    pub issues: Vec<Issue>,
}

impl SearchResult {
    /// Check if there are more matches than this page holds.
    pub fn has_more(&self) -> bool {
        (self.start_at as usize).saturating_add(self.issues.len()) < self.total as usize
    }
}

/// A JIRA issue as returned in search results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issue {
    /// The issue ID.
    pub id: String,
    /// The issue key (e.g., "PROJ-123").
    pub key: String,
    /// The issue fields.
    pub fields: IssueFields,
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.key, self.fields.summary)
    }
}

/// Issue fields requested by search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueFields {
    /// The issue summary/title.
    #[serde(default)]
    pub summary: String,
}

/// Everything needed to file a new ticket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTicket {
    pub assignee: String,
    pub summary: String,
    pub description: String,
    pub issue_type_id: String,
    pub project_id: String,
}

/// Request body for `POST /rest/api/2/issue`.
#[derive(Debug, Serialize)]
pub struct CreateIssueRequest {
    pub fields: CreateIssueFields,
}

/// Fields set on a newly created issue.
#[derive(Debug, Serialize)]
pub struct CreateIssueFields {
    pub assignee: NameRef,
    pub summary: String,
    pub description: String,
    pub issuetype: IdRef,
    pub project: IdRef,
}

impl From<&NewTicket> for CreateIssueRequest {
    fn from(ticket: &NewTicket) -> Self {
        Self {
            fields: CreateIssueFields {
                assignee: NameRef::new(&ticket.assignee),
                summary: ticket.summary.clone(),
                description: ticket.description.clone(),
                issuetype: IdRef::new(&ticket.issue_type_id),
                project: IdRef::new(&ticket.project_id),
            },
        }
    }
}

/// Response from `POST /rest/api/2/issue`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedIssue {
    /// The issue ID.
    pub id: String,
    /// The server-assigned issue key.
    pub key: String,
    /// REST URL of the new issue.
    #[serde(rename = "self", default)]
    pub self_url: String,
}

/// Reference to an entity by ID, e.g. `{"id": "10000"}`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct IdRef {
    pub id: String,
}

impl IdRef {
    pub fn new(id: &str) -> Self {
        Self { id: id.to_string() }
    }
}

/// Reference to an entity by name, e.g. `{"name": "Done"}`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct NameRef {
    pub name: String,
}

impl NameRef {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }
}

/// A workflow transition available on an issue.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Transition {
    /// The transition ID.
    pub id: String,
    /// The transition name (e.g. "Done").
    pub name: String,
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Response from `GET /rest/api/2/issue/{key}/transitions`.
#[derive(Debug, Clone, Deserialize)]
pub struct TransitionsResponse {
    #[serde(default)]
    pub transitions: Vec<Transition>,
}

/// Caller-supplied details for closing a ticket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloseTicket {
    /// The issue key to transition.
    pub key: String,
    /// Name of the transition to apply.
    pub transition: String,
    /// Resolution to set.
    pub resolution: String,
    /// Login to assign the issue to.
    pub assignee: String,
    /// Comment to add, if any.
    pub comment: Option<String>,
}

/// Request body for `POST /rest/api/2/issue/{key}/transitions`.
#[derive(Debug, Serialize)]
pub struct TransitionRequest {
    pub transition: IdRef,
    pub fields: TransitionFields,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update: Option<TransitionUpdate>,
}

impl TransitionRequest {
    /// Build the request applying `transition_id` with the caller's values.
    pub fn new(transition_id: &str, close: &CloseTicket) -> Self {
        Self {
            transition: IdRef::new(transition_id),
            fields: TransitionFields {
                assignee: NameRef::new(&close.assignee),
                resolution: NameRef::new(&close.resolution),
            },
            update: close.comment.as_deref().map(|body| TransitionUpdate {
                comment: vec![CommentOperation {
                    add: CommentBody {
                        body: body.to_string(),
                    },
                }],
            }),
        }
    }
}

/// Fields set while transitioning.
#[derive(Debug, Serialize)]
pub struct TransitionFields {
    pub assignee: NameRef,
    pub resolution: NameRef,
}

/// Update operations applied while transitioning.
#[derive(Debug, Serialize)]
pub struct TransitionUpdate {
    pub comment: Vec<CommentOperation>,
}

#[derive(Debug, Serialize)]
pub struct CommentOperation {
    pub add: CommentBody,
}

#[derive(Debug, Serialize)]
pub struct CommentBody {
    pub body: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn close_ticket(comment: Option<&str>) -> CloseTicket {
        CloseTicket {
            key: "OPS-42".to_string(),
            transition: "Done".to_string(),
            resolution: "Fixed".to_string(),
            assignee: "jdoe".to_string(),
            comment: comment.map(str::to_string),
        }
    }

    #[test]
    fn test_parse_session_response() {
        let json = r#"{
            "session": {"name": "JSESSIONID", "value": "6E3487971234567896704A9EB4AE501F"},
            "loginInfo": {"failedLoginCount": 1, "loginCount": 2, "previousLoginTime": "2013-11-29T09:43:03.000+0100"}
        }"#;

        let response: SessionResponse = serde_json::from_str(json).unwrap();
        assert_eq!(
            response.session.header_value(),
            "JSESSIONID=6E3487971234567896704A9EB4AE501F"
        );
    }

    #[test]
    fn test_session_cookie_debug_hides_value() {
        let cookie = SessionCookie {
            name: "JSESSIONID".to_string(),
            value: "secret-session".to_string(),
        };
        assert!(!format!("{:?}", cookie).contains("secret-session"));
    }

    #[test]
    fn test_parse_search_result() {
        let json = r#"{
            "startAt": 0,
            "maxResults": 100,
            "total": 2,
            "issues": [
                {"id": "1", "key": "OPS-1", "fields": {"summary": "First"}},
                {"id": "2", "key": "OPS-2", "fields": {"summary": "Second"}}
            ]
        }"#;

        let result: SearchResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.issues.len(), 2);
        assert_eq!(result.issues[1].fields.summary, "Second");
        assert_eq!(result.issues[0].to_string(), "OPS-1: First");
        assert!(!result.has_more());
    }

    #[test]
    fn test_search_result_has_more() {
        let result = SearchResult {
            start_at: 0,
            max_results: 1,
            total: 5,
            issues: vec![Issue {
                id: "1".to_string(),
                key: "OPS-1".to_string(),
                fields: IssueFields {
                    summary: "Only".to_string(),
                },
            }],
        };
        assert!(result.has_more());
    }

    #[test]
    fn test_has_more_near_u32_max() {
        let result = SearchResult {
            start_at: u32::MAX,
            max_results: 100,
            total: u32::MAX,
            issues: vec![Issue {
                id: "1".to_string(),
                key: "OPS-1".to_string(),
                fields: IssueFields {
                    summary: "Last".to_string(),
                },
            }],
        };
        assert!(!result.has_more());
    }

    #[test]
    fn test_create_request_shape() {
        let ticket = NewTicket {
            assignee: "jdoe".to_string(),
            summary: "Fix bug".to_string(),
            description: "details".to_string(),
            issue_type_id: "6".to_string(),
            project_id: "11000".to_string(),
        };

        let body = serde_json::to_value(CreateIssueRequest::from(&ticket)).unwrap();
        assert_eq!(
            body,
            json!({
                "fields": {
                    "assignee": {"name": "jdoe"},
                    "summary": "Fix bug",
                    "description": "details",
                    "issuetype": {"id": "6"},
                    "project": {"id": "11000"}
                }
            })
        );
    }

    #[test]
    fn test_transition_request_with_comment() {
        let body =
            serde_json::to_value(TransitionRequest::new("31", &close_ticket(Some("shipped"))))
                .unwrap();
        assert_eq!(
            body,
            json!({
                "transition": {"id": "31"},
                "fields": {
                    "assignee": {"name": "jdoe"},
                    "resolution": {"name": "Fixed"}
                },
                "update": {"comment": [{"add": {"body": "shipped"}}]}
            })
        );
    }

    #[test]
    fn test_transition_request_without_comment_omits_update() {
        let body = serde_json::to_value(TransitionRequest::new("31", &close_ticket(None))).unwrap();
        assert!(body.get("update").is_none());
    }

    #[test]
    fn test_parse_transitions() {
        let json = r#"{"expand": "transitions", "transitions": [
            {"id": "11", "name": "To Do"},
            {"id": "31", "name": "Done"}
        ]}"#;
        let response: TransitionsResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.transitions.len(), 2);
        assert_eq!(response.transitions[1].to_string(), "Done");
    }
}
