//! Centralized error types for JiraShell.
//!
//! Every failure is fatal: errors propagate as `AppError` to `main`, which
//! prints `user_message()` (and a suggested action, if any) and exits.

use thiserror::Error;

use crate::api::error::ApiError;
use crate::config::ConfigError;

/// The main application error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Credentials file errors.
    #[error("{0}")]
    Config(#[from] ConfigError),

    /// API-related errors.
    #[error("{0}")]
    Api(#[from] ApiError),

    /// IO errors (writing output, etc.).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// Get a user-friendly message for display.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Config(e) => match e {
                ConfigError::NoHomeDir => {
                    "Could not find your home directory to store credentials.".to_string()
                }
                ConfigError::ReadError(_) => {
                    "Could not read the credentials file. Please check it is readable.".to_string()
                }
                ConfigError::WriteError(_) => {
                    "Could not save credentials. Please check file permissions.".to_string()
                }
                ConfigError::ParseError(err) => {
                    format!("The credentials file is not valid JSON: {}", err)
                }
                ConfigError::SerializeError(_) => {
                    "Could not save credentials. Internal error.".to_string()
                }
                ConfigError::PromptError { field, .. } => {
                    format!("Could not read the {} from the terminal.", field)
                }
                ConfigError::ValidationError(msg) => format!("Configuration error: {}", msg),
            },
            AppError::Api(e) => match e {
                ApiError::Unauthorized => {
                    "Authentication failed. Please check your login and password.".to_string()
                }
                ApiError::Forbidden => {
                    "Access denied. You don't have permission to access this resource.".to_string()
                }
                ApiError::NotFound(resource) => format!("'{}' was not found.", resource),
                ApiError::BadRequest(msg) => format!("JIRA rejected the request: {}", msg),
                ApiError::RateLimited => {
                    "Too many requests. Please wait a moment and try again.".to_string()
                }
                ApiError::ServerError(_) => {
                    "JIRA server error. Please try again later.".to_string()
                }
                ApiError::Network(_) => {
                    "Connection failed. Please check your internet connection.".to_string()
                }
                ApiError::InvalidUrl(msg) => format!("Invalid JIRA URL: {}", msg),
                ApiError::InvalidResponse(_) => {
                    "Unexpected response from JIRA. Please try again.".to_string()
                }
                ApiError::ConnectionFailed(_) => {
                    "Could not connect to JIRA. Please check the endpoint and network.".to_string()
                }
                ApiError::CreateFailed(msg) => format!("Failed to create issue: {}", msg),
                ApiError::TransitionFailed(msg) => format!("Failed to close issue: {}", msg),
            },
            AppError::Io(_) => "Could not write output.".to_string(),
        }
    }

    /// Get a suggested action for the user.
    pub fn suggested_action(&self) -> Option<&'static str> {
        match self {
            AppError::Config(ConfigError::ParseError(_))
            | AppError::Config(ConfigError::ValidationError(_)) => {
                Some("Fix or delete ~/.jirashell.json; it will be recreated on the next run.")
            }
            AppError::Api(ApiError::Unauthorized) => Some(
                "Delete ~/.jirashell.json and run again to re-enter your credentials.",
            ),
            AppError::Api(ApiError::Network(_)) | AppError::Api(ApiError::ConnectionFailed(_)) => {
                Some("Check your internet connection and JIRA endpoint (or pass --endpoint).")
            }
            _ => None,
        }
    }
}

/// Result type for application operations.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_from_config_error() {
        let app_err: AppError = ConfigError::NoHomeDir.into();
        assert!(matches!(app_err, AppError::Config(ConfigError::NoHomeDir)));
    }

    #[test]
    fn test_app_error_from_api_error() {
        let app_err: AppError = ApiError::Unauthorized.into();
        assert!(matches!(app_err, AppError::Api(ApiError::Unauthorized)));
    }

    #[test]
    fn test_user_message_unauthorized() {
        let msg = AppError::Api(ApiError::Unauthorized).user_message();
        assert!(msg.contains("Authentication failed"));
        assert!(msg.contains("password"));
    }

    #[test]
    fn test_user_message_parse_error_includes_detail() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{\"login\":").unwrap_err();
        let msg = AppError::Config(ConfigError::ParseError(parse_err)).user_message();
        assert!(msg.contains("not valid JSON"));
    }

    #[test]
    fn test_user_message_transition_failed() {
        let err = AppError::Api(ApiError::TransitionFailed("'Done' is not available".to_string()));
        assert!(err.user_message().contains("'Done' is not available"));
    }

    #[test]
    fn test_suggested_action_unauthorized() {
        let action = AppError::Api(ApiError::Unauthorized).suggested_action();
        assert!(action.unwrap().contains(".jirashell.json"));
    }

    #[test]
    fn test_no_suggested_action_for_not_found() {
        let err = AppError::Api(ApiError::NotFound("OPS-1".to_string()));
        assert!(err.suggested_action().is_none());
    }
}
