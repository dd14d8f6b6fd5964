//! Loading and saving the credentials file.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use super::prompt::{CredentialField, CredentialPrompt};
use super::{ConfigError, Credentials, Result};

/// File name of the credentials file inside the home directory.
pub const CONFIG_FILE_NAME: &str = ".jirashell.json";

/// Reads and writes the credentials file at a fixed path.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    /// Create a store backed by the given file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Create a store backed by `~/.jirashell.json`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NoHomeDir` if the home directory is unknown.
    pub fn open_default() -> Result<Self> {
        Ok(Self::new(Self::default_path()?))
    }

    /// The default credentials path, `${HOME}/.jirashell.json`.
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
        Ok(home.join(CONFIG_FILE_NAME))
    }

    /// Load stored credentials, or ask for them and save them if none exist.
    ///
    /// An existing file is never rewritten, even when it fails to parse.
    /// Answers that fail validation are not saved.
    #[instrument(skip(self, prompt), fields(path = %self.path.display()))]
    pub fn load_or_create(&self, prompt: &mut dyn CredentialPrompt) -> Result<Credentials> {
        if self.path.exists() {
            return self.load();
        }

        info!("No credentials file found, prompting");
        let credentials = capture(prompt)?;
        credentials.validate()?;
        self.save(&credentials)?;
        Ok(credentials)
    }

    /// Read and parse the credentials file.
    ///
    /// # Errors
    ///
    /// Returns `ReadError` if the file cannot be read and `ParseError` if it
    /// is not a valid credentials object.
    pub fn load(&self) -> Result<Credentials> {
        let raw = fs::read_to_string(&self.path).map_err(ConfigError::ReadError)?;
        let credentials: Credentials =
            serde_json::from_str(&raw).map_err(ConfigError::ParseError)?;
        debug!(login = %credentials.login, "Loaded credentials");
        Ok(credentials)
    }

    /// Serialize and write the credentials file.
    pub fn save(&self, credentials: &Credentials) -> Result<()> {
        let json = serde_json::to_string(credentials).map_err(ConfigError::SerializeError)?;
        write_private(&self.path, json.as_bytes()).map_err(ConfigError::WriteError)?;
        info!("Saved credentials");
        Ok(())
    }
}

/// Ask for every field in order and trim the answers.
fn capture(prompt: &mut dyn CredentialPrompt) -> Result<Credentials> {
    let mut ask = |field| prompt.ask(field).map(|answer| answer.trim().to_string());

    let endpoint = ask(CredentialField::Endpoint)?;
    let project_id = ask(CredentialField::ProjectId)?;
    let issue_type = ask(CredentialField::IssueType)?;
    let login = ask(CredentialField::Username)?;
    let password = ask(CredentialField::Password)?;

    Ok(Credentials {
        login,
        password,
        project_id: Some(project_id),
        issue_type: Some(issue_type),
        endpoint: Some(endpoint),
    })
}

#[cfg(unix)]
fn write_private(path: &Path, contents: &[u8]) -> io::Result<()> {
    use std::io::Write;
    use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

    let mut file = fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)?;
    file.write_all(contents)?;
    // mode() only applies on creation
    file.set_permissions(fs::Permissions::from_mode(0o600))
}

#[cfg(not(unix))]
fn write_private(path: &Path, contents: &[u8]) -> io::Result<()> {
    fs::write(path, contents)
}
