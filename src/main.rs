//! JiraShell - a command-line JIRA tool.

use std::process::ExitCode;

use clap::Parser;

use jirashell::cli::{Cli, RunConfig};
use jirashell::config::{CredentialStore, TerminalPrompt};
use jirashell::error::AppError;
use jirashell::logging;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let config: RunConfig = Cli::parse().into();

    if let Err(e) = logging::init() {
        eprintln!("warning: logging disabled: {}", e);
    }

    match run(&config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Command failed");
            eprintln!("error: {}", e.user_message());
            if let Some(action) = e.suggested_action() {
                eprintln!("hint: {}", action);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(config: &RunConfig) -> Result<(), AppError> {
    let store = CredentialStore::open_default()?;
    let mut prompt = TerminalPrompt;
    let mut stdout = std::io::stdout().lock();
    jirashell::run(config, &store, &mut prompt, &mut stdout).await
}
