//! Dispatch of a parsed command against an authenticated session.
//!
//! Each subcommand is one round trip to JIRA followed by printing the result.

mod filter;

use std::io::Write;

use tracing::{info, warn};

pub use filter::CannedFilter;

use crate::api::{CloseTicket, JiraClient, NewTicket};
use crate::cli::{Command, RunConfig};
use crate::config::Credentials;
use crate::error::Result;

/// Run the configured command, writing its output to `out`.
pub async fn dispatch(
    config: &RunConfig,
    credentials: &Credentials,
    client: &JiraClient,
    out: &mut dyn Write,
) -> Result<()> {
    match &config.command {
        Command::Create {
            summary,
            desc,
            no_browser,
        } => {
            let key = create_ticket(client, credentials, summary, desc, out).await?;
            if !*no_browser && cfg!(target_os = "macos") {
                open_in_browser(&client.browse_url(&key));
            }
            Ok(())
        }
        Command::Close {
            ticketnum,
            transition,
            resolution,
            assignee,
            comment,
        } => {
            let close = CloseTicket {
                key: ticketnum.clone(),
                transition: transition.clone(),
                resolution: resolution.clone(),
                assignee: assignee
                    .clone()
                    .unwrap_or_else(|| client.login().to_string()),
                comment: comment.clone(),
            };
            close_ticket(client, &close, out).await
        }
        Command::Weekly => run_filter(client, CannedFilter::Weekly, out).await,
        Command::All => run_filter(client, CannedFilter::All, out).await,
        Command::Todo => run_filter(client, CannedFilter::Todo, out).await,
        Command::Backlog => run_filter(client, CannedFilter::Backlog, out).await,
        Command::Inprogress => run_filter(client, CannedFilter::InProgress, out).await,
    }
}

/// Run a canned search for the logged-in user and print `KEY: summary` lines.
pub async fn run_filter(
    client: &JiraClient,
    filter: CannedFilter,
    out: &mut dyn Write,
) -> Result<()> {
    let jql = filter.jql(client.login());
    info!(%filter, "Running canned search");

    let result = client.search(&jql).await?;
    for issue in &result.issues {
        writeln!(out, "{}", issue)?;
    }

    if result.has_more() {
        warn!(
            total = result.total,
            shown = result.issues.len(),
            "Search results truncated"
        );
        writeln!(
            out,
            "(showing the first {} of {} matching tickets)",
            result.issues.len(),
            result.total
        )?;
    }

    Ok(())
}

/// Create a ticket assigned to the logged-in user and return its key.
pub async fn create_ticket(
    client: &JiraClient,
    credentials: &Credentials,
    summary: &str,
    description: &str,
    out: &mut dyn Write,
) -> Result<String> {
    let ticket = NewTicket {
        assignee: client.login().to_string(),
        summary: summary.to_string(),
        description: description.to_string(),
        issue_type_id: credentials.require_issue_type()?.to_string(),
        project_id: credentials.require_project_id()?.to_string(),
    };

    let created = client.create_issue(&ticket).await?;
    writeln!(out, "Created issue {}", created.key)?;
    writeln!(out, "{}", client.browse_url(&created.key))?;
    Ok(created.key)
}

/// Close a ticket and report which transition was applied.
pub async fn close_ticket(
    client: &JiraClient,
    close: &CloseTicket,
    out: &mut dyn Write,
) -> Result<()> {
    let transition = client.close_ticket(close).await?;
    writeln!(
        out,
        "{} moved via '{}' (resolution: {}, assignee: {})",
        close.key, transition.name, close.resolution, close.assignee
    )?;
    Ok(())
}

/// Open a URL in the default browser; failure only warrants a warning.
fn open_in_browser(url: &str) {
    if let Err(e) = open::that(url) {
        warn!("Failed to open browser: {}", e);
        eprintln!("warning: could not open {} in a browser: {}", url, e);
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::config::ConfigError;
    use crate::error::AppError;

    fn credentials(endpoint: &str) -> Credentials {
        Credentials {
            login: "jdoe".to_string(),
            password: "hunter2".to_string(),
            project_id: Some("11000".to_string()),
            issue_type: Some("6".to_string()),
            endpoint: Some(endpoint.to_string()),
        }
    }

    async fn connect(server: &MockServer, credentials: &Credentials) -> JiraClient {
        Mock::given(method("POST"))
            .and(path("/rest/auth/1/session"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "session": {"name": "JSESSIONID", "value": "abc"}
            })))
            .mount(server)
            .await;
        JiraClient::authenticate(credentials).await.unwrap()
    }

    fn run_config(command: Command) -> RunConfig {
        RunConfig {
            endpoint_override: None,
            command,
        }
    }

    #[tokio::test]
    async fn test_search_prints_key_and_summary() {
        let server = MockServer::start().await;
        let creds = credentials(&server.uri());
        let client = connect(&server, &creds).await;

        Mock::given(method("GET"))
            .and(path("/rest/api/2/search"))
            .and(query_param("jql", "(assignee = jdoe) AND status = 'In Progress'"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "startAt": 0,
                "maxResults": 100,
                "total": 2,
                "issues": [
                    {"id": "1", "key": "OPS-1", "fields": {"summary": "Rotate certs"}},
                    {"id": "2", "key": "OPS-2", "fields": {"summary": "Patch hosts"}}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let mut out = Vec::new();
        dispatch(&run_config(Command::Inprogress), &creds, &client, &mut out)
            .await
            .unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "OPS-1: Rotate certs\nOPS-2: Patch hosts\n"
        );
    }

    #[tokio::test]
    async fn test_truncated_search_is_reported() {
        let server = MockServer::start().await;
        let creds = credentials(&server.uri());
        let client = connect(&server, &creds).await;

        Mock::given(method("GET"))
            .and(path("/rest/api/2/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "startAt": 0,
                "maxResults": 100,
                "total": 340,
                "issues": [{"id": "1", "key": "OPS-1", "fields": {"summary": "One"}}]
            })))
            .mount(&server)
            .await;

        let mut out = Vec::new();
        run_filter(&client, CannedFilter::All, &mut out).await.unwrap();

        let printed = String::from_utf8(out).unwrap();
        assert!(printed.contains("OPS-1: One"));
        assert!(printed.contains("showing the first 1 of 340"));
    }

    #[tokio::test]
    async fn test_create_prints_and_returns_server_key() {
        let server = MockServer::start().await;
        let creds = credentials(&server.uri());
        let client = connect(&server, &creds).await;

        Mock::given(method("POST"))
            .and(path("/rest/api/2/issue"))
            .and(body_json(serde_json::json!({
                "fields": {
                    "assignee": {"name": "jdoe"},
                    "summary": "Fix bug",
                    "description": "details",
                    "issuetype": {"id": "6"},
                    "project": {"id": "11000"}
                }
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
                "id": "10", "key": "OPS-900", "self": "x"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let mut out = Vec::new();
        let key = create_ticket(&client, &creds, "Fix bug", "details", &mut out)
            .await
            .unwrap();

        assert_eq!(key, "OPS-900");
        let printed = String::from_utf8(out).unwrap();
        assert!(printed.starts_with("Created issue OPS-900\n"));
        assert!(printed.contains(&format!("{}/browse/OPS-900", server.uri())));
    }

    #[tokio::test]
    async fn test_create_without_project_fails_before_request() {
        let server = MockServer::start().await;
        let mut creds = credentials(&server.uri());
        let client = connect(&server, &creds).await;
        creds.project_id = None;

        Mock::given(method("POST"))
            .and(path("/rest/api/2/issue"))
            .respond_with(ResponseTemplate::new(201))
            .expect(0)
            .mount(&server)
            .await;

        let mut out = Vec::new();
        let err = create_ticket(&client, &creds, "s", "d", &mut out)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::Config(ConfigError::ValidationError(_))
        ));
    }

    #[tokio::test]
    async fn test_close_defaults_assignee_to_login() {
        let server = MockServer::start().await;
        let creds = credentials(&server.uri());
        let client = connect(&server, &creds).await;

        Mock::given(method("GET"))
            .and(path("/rest/api/2/issue/OPS-5/transitions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "transitions": [{"id": "5", "name": "Done"}]
            })))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/rest/api/2/issue/OPS-5/transitions"))
            .and(body_json(serde_json::json!({
                "transition": {"id": "5"},
                "fields": {
                    "assignee": {"name": "jdoe"},
                    "resolution": {"name": "Done"}
                }
            })))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let command = Command::Close {
            ticketnum: "OPS-5".to_string(),
            transition: "Done".to_string(),
            resolution: "Done".to_string(),
            assignee: None,
            comment: None,
        };
        let mut out = Vec::new();
        dispatch(&run_config(command), &creds, &client, &mut out)
            .await
            .unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "OPS-5 moved via 'Done' (resolution: Done, assignee: jdoe)\n"
        );
    }
}
