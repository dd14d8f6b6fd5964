//! JiraShell - a command-line JIRA tool.
//!
//! Stores credentials in `~/.jirashell.json`, logs in with a session
//! cookie, and runs one canned search, ticket creation, or ticket close per
//! invocation.

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;

use std::io::Write;

use tracing::info;

use crate::api::JiraClient;
use crate::cli::RunConfig;
use crate::config::{CredentialPrompt, CredentialStore};
use crate::error::Result;

/// Load credentials, log in, and run the configured command.
pub async fn run(
    config: &RunConfig,
    store: &CredentialStore,
    prompt: &mut dyn CredentialPrompt,
    out: &mut dyn Write,
) -> Result<()> {
    let credentials = store
        .load_or_create(prompt)?
        .with_endpoint_override(config.endpoint_override.as_deref());
    credentials.validate()?;

    let client = JiraClient::authenticate(&credentials).await?;
    info!(command = ?config.command, "Dispatching command");

    commands::dispatch(config, &credentials, &client, out).await
}
