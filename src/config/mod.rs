//! Configuration management for JiraShell.
//!
//! This module handles loading, prompting for, and saving the user's
//! credentials file (`~/.jirashell.json`).

mod credentials;
mod prompt;
mod store;

use thiserror::Error;

pub use credentials::Credentials;
pub use prompt::{CredentialField, CredentialPrompt, TerminalPrompt};
pub use store::{CredentialStore, CONFIG_FILE_NAME};

/// Errors that can occur while reading or writing the credentials file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The user's home directory could not be determined.
    #[error("could not determine home directory")]
    NoHomeDir,

    /// The credentials file exists but could not be read.
    #[error("failed to read credentials file: {0}")]
    ReadError(#[source] std::io::Error),

    /// The credentials file could not be written.
    #[error("failed to write credentials file: {0}")]
    WriteError(#[source] std::io::Error),

    /// The credentials file is not a valid JSON credentials object.
    #[error("failed to parse credentials file: {0}")]
    ParseError(#[source] serde_json::Error),

    /// The credentials could not be serialized.
    #[error("failed to serialize credentials: {0}")]
    SerializeError(#[source] serde_json::Error),

    /// Reading an answer from the terminal failed.
    #[error("failed to read {field}: {message}")]
    PromptError { field: String, message: String },

    /// The credentials are incomplete or malformed.
    #[error("{0}")]
    ValidationError(String),
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
