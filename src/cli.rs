//! Command-line interface definition.

use clap::{Parser, Subcommand};

/// A command-line jira tool.
#[derive(Debug, Parser)]
#[command(name = "jirashell", version, about)]
pub struct Cli {
    /// JIRA URL to use instead of the stored endpoint
    #[arg(long, global = true, value_name = "URL")]
    pub endpoint: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands.
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Weekly report
    Weekly,
    /// All tickets
    All,
    /// To Do later tickets
    Todo,
    /// Backlogs
    Backlog,
    /// In progress tickets
    Inprogress,

    /// Create a ticket
    Create {
        /// Summary of the ticket
        summary: String,
        /// Description of the ticket
        desc: String,
        /// Don't open the new ticket in a browser
        #[arg(long)]
        no_browser: bool,
    },

    /// Mark ticket as done
    Close {
        /// Key of the ticket to close (e.g. OPS-123)
        ticketnum: String,
        /// Workflow transition to apply
        #[arg(long, default_value = "Done")]
        transition: String,
        /// Resolution to set
        #[arg(long, default_value = "Done")]
        resolution: String,
        /// Login to assign the ticket to (defaults to you)
        #[arg(long)]
        assignee: Option<String>,
        /// Comment to add while closing
        #[arg(long)]
        comment: Option<String>,
    },
}

/// Everything one invocation needs, resolved once from the arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Overrides the stored endpoint when set.
    pub endpoint_override: Option<String>,
    /// The operation to perform.
    pub command: Command,
}

impl From<Cli> for RunConfig {
    fn from(cli: Cli) -> Self {
        Self {
            endpoint_override: cli.endpoint,
            command: cli.command,
        }
    }
}
