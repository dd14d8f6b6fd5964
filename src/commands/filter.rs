//! Canned JQL searches for the logged-in user.

use std::fmt;

/// A fixed search over the user's own tickets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CannedFilter {
    /// Tickets updated since the start of the week.
    Weekly,
    /// Every ticket that is not finished.
    All,
    /// Tickets parked as "TO DO LATER".
    Todo,
    /// Tickets in the backlog.
    Backlog,
    /// Tickets in progress.
    InProgress,
}

impl CannedFilter {
    /// Build the JQL for this filter with `login` as the assignee.
    pub fn jql(&self, login: &str) -> String {
        match self {
            CannedFilter::Weekly => format!(
                "(assignee = {}) AND updatedDate > startOfWeek() ORDER BY updatedDate ASC",
                login
            ),
            CannedFilter::All => format!(
                "(assignee = {}) AND (status = Open OR status = Reopened OR status = 'In Progress' OR status = 'TO DO LATER' OR status = 'Backlog')",
                login
            ),
            CannedFilter::Todo => format!("(assignee = {}) AND status = 'TO DO LATER'", login),
            CannedFilter::Backlog => format!("(assignee = {}) AND status = 'Backlog'", login),
            CannedFilter::InProgress => {
                format!("(assignee = {}) AND status = 'In Progress'", login)
            }
        }
    }
}

impl fmt::Display for CannedFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CannedFilter::Weekly => "weekly",
            CannedFilter::All => "all",
            CannedFilter::Todo => "todo",
            CannedFilter::Backlog => "backlog",
            CannedFilter::InProgress => "inprogress",
        };
        f.write_str(name)
    }
}
