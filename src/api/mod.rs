//! JIRA API client and types.
//!
//! This module provides the interface for communicating with the JIRA REST API.

mod auth;
mod client;
pub mod error;
pub mod types;

pub use auth::Session;
pub use client::{JiraClient, SEARCH_MAX_RESULTS, SEARCH_START_AT};
pub use error::ApiError;
pub use types::{CloseTicket, CreatedIssue, Issue, NewTicket, SearchResult, Transition};
