//! Session handling for JIRA API.
//!
//! This module holds the cookie obtained from JIRA's session login
//! endpoint. The password is only used for that one login request and is
//! not kept here.

use super::types::SessionCookie;

/// An authenticated JIRA session.
#[derive(Clone)]
pub struct Session {
    /// The user's login name.
    login: String,
    /// The `Cookie` header value sent with every request.
    cookie_header: String,
}

impl Session {
    /// Create a session from the cookie JIRA issued for `login`.
    pub fn new(login: &str, cookie: &SessionCookie) -> Self {
        Self {
            login: login.to_string(),
            cookie_header: cookie.header_value(),
        }
    }

    /// Get the `Cookie` header value for HTTP requests.
    pub fn header_value(&self) -> &str {
        &self.cookie_header
    }

    /// Get the login the session belongs to.
    pub fn login(&self) -> &str {
        &self.login
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("login", &self.login)
            .finish_non_exhaustive()
    }
}
