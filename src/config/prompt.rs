//! Interactive capture of credentials on first run.

use dialoguer::{Input, Password};

use super::{ConfigError, Result};

/// A single value asked for when no credentials file exists yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialField {
    Endpoint,
    ProjectId,
    IssueType,
    Username,
    Password,
}

impl CredentialField {
    /// All fields, in the order they are asked.
    pub const ALL: [CredentialField; 5] = [
        CredentialField::Endpoint,
        CredentialField::ProjectId,
        CredentialField::IssueType,
        CredentialField::Username,
        CredentialField::Password,
    ];

    /// The question shown to the user.
    pub fn prompt_text(&self) -> &'static str {
        match self {
            CredentialField::Endpoint => "Enter endpoint name, e.g. https://company.atlassian.net",
            CredentialField::ProjectId => "Enter Project ID (e.g. 11000)",
            CredentialField::IssueType => "Enter Issue Type ID (e.g. 6)",
            CredentialField::Username => "Enter Username",
            CredentialField::Password => "Enter Password",
        }
    }

    /// Whether the answer must be read without echo.
    pub fn is_secret(&self) -> bool {
        matches!(self, CredentialField::Password)
    }

    fn name(&self) -> &'static str {
        match self {
            CredentialField::Endpoint => "endpoint",
            CredentialField::ProjectId => "project ID",
            CredentialField::IssueType => "issue type",
            CredentialField::Username => "username",
            CredentialField::Password => "password",
        }
    }
}

/// Source of answers for the first-run credential questions.
pub trait CredentialPrompt {
    /// Ask for one field and return the raw answer.
    fn ask(&mut self, field: CredentialField) -> Result<String>;
}

/// Prompts on the controlling terminal.
#[derive(Debug, Default)]
pub struct TerminalPrompt;

impl CredentialPrompt for TerminalPrompt {
    fn ask(&mut self, field: CredentialField) -> Result<String> {
        let answer = if field.is_secret() {
            Password::new()
                .with_prompt(field.prompt_text())
                .allow_empty_password(true)
                .interact()
        } else {
            Input::<String>::new()
                .with_prompt(field.prompt_text())
                .allow_empty(true)
                .interact_text()
        };

        answer.map_err(|e| ConfigError::PromptError {
            field: field.name().to_string(),
            message: e.to_string(),
        })
    }
}
