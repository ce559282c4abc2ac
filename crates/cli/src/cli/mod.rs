// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

mod args;

use crate::colors;
use crate::help;
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

pub use args::{DraftArgs, EditArgs, LimitArgs};

/// Parse a string that must not be empty or whitespace-only.
fn non_empty_string(s: &str) -> Result<String, String> {
    if s.trim().is_empty() {
        Err("cannot be empty".to_string())
    } else {
        Ok(s.to_string())
    }
}

#[derive(Parser)]
#[command(name = "stint")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(disable_version_flag = true)]
#[command(about = "A multi-tenant issue tracker with review rounds and sprints")]
#[command(help_template = help::template())]
#[command(before_help = help::commands())]
#[command(after_help = help::quickstart())]
#[command(styles = help::styles())]
#[allow(clippy::manual_non_exhaustive)]
pub struct Cli {
    /// Act as this member login (overrides config)
    #[arg(long, global = true, value_name = "login")]
    pub actor: Option<String>,

    /// Workspace code (overrides config)
    #[arg(long, short = 'w', global = true, value_name = "code")]
    pub workspace: Option<String>,

    /// Print structured JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// Print version
    #[arg(short = 'v', short_alias = 'V', long = "version", action = clap::ArgAction::Version)]
    version: (),

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Create the data directory and register the acting member
    #[command(after_help = colors::examples("\
Examples:
  stint init alice alice@example.com           Register alice and act as her
  stint init bob bob@example.com --name Bob    Register with a display name"))]
    Init {
        /// Login id of the member to register
        #[arg(value_parser = non_empty_string)]
        login: String,

        /// Email address
        #[arg(value_parser = non_empty_string)]
        email: String,

        /// Display name (defaults to the login)
        #[arg(long)]
        name: Option<String>,

        /// Database path (relative to the data directory)
        #[arg(long)]
        database: Option<PathBuf>,
    },

    /// Manage workspaces
    #[command(subcommand)]
    Workspace(WorkspaceCommand),

    /// Manage members, invitations and roles
    #[command(subcommand)]
    Member(MemberCommand),

    /// Manage positions
    #[command(subcommand)]
    Position(PositionCommand),

    /// Create and work on issues
    #[command(subcommand)]
    Issue(IssueCommand),

    /// Manage reviewers and reviews
    #[command(subcommand)]
    Review(ReviewCommand),

    /// Discuss issues and reviews
    #[command(subcommand)]
    Comment(CommentCommand),

    /// Relate two issues
    #[command(after_help = colors::examples("\
Examples:
  stint relate PROJ-1 blocks PROJ-2       PROJ-2 cannot finish before PROJ-1
  stint relate PROJ-3 caused-by PROJ-1    Record a cause
  stint relate PROJ-4 relevant PROJ-5     Plain cross-reference"))]
    Relate {
        source: String,
        /// Relation (blocks, blocked-by, causes, caused-by, relevant)
        relation: String,
        target: String,
    },

    /// Remove the relation between two issues
    Unrelate { source: String, target: String },

    /// Plan and run sprints
    #[command(subcommand)]
    Sprint(SprintCommand),

    /// Show the event log of an issue or the workspace
    Log {
        /// Issue key (omit for recent workspace events)
        key: Option<String>,

        #[command(flatten)]
        limits: LimitArgs,
    },

    /// Generate shell completions
    Completion {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum WorkspaceCommand {
    /// Create a workspace owned by the actor
    Create {
        #[arg(value_parser = non_empty_string)]
        name: String,

        /// Issue key prefix, e.g. PROJ
        #[arg(long, short)]
        prefix: String,

        #[arg(long, short)]
        description: Option<String>,
    },

    /// Show a workspace
    Show,

    /// List the actor's workspaces
    List,

    /// Rename, describe or re-prefix the workspace
    Edit {
        #[arg(long, short)]
        name: Option<String>,

        /// New description (empty to clear)
        #[arg(long, short)]
        description: Option<String>,

        /// Prefix for new issue keys; existing keys are kept
        #[arg(long, short)]
        prefix: Option<String>,
    },

    /// Make a workspace the default
    Use { code: String },

    /// List workspace members
    Members,
}

#[derive(Subcommand)]
pub enum MemberCommand {
    /// Register another member
    Register {
        #[arg(value_parser = non_empty_string)]
        login: String,
        #[arg(value_parser = non_empty_string)]
        email: String,
        #[arg(long)]
        name: Option<String>,
    },

    /// Invite a member to the workspace
    Invite { login: String },

    /// Accept an invitation addressed to the actor
    Accept { invitation: i64 },

    /// Reject an invitation addressed to the actor
    Reject { invitation: i64 },

    /// Change a member's role (admin, manager, collaborator, viewer)
    Role { login: String, role: String },

    /// Hand workspace ownership to another member
    Transfer { login: String },

    /// Set or clear a member's position
    Position {
        login: String,

        /// Position id; omit to clear
        position: Option<i64>,
    },

    /// Remove a member from the workspace
    Remove { login: String },

    /// Leave the workspace
    Leave,

    /// Change the actor's nickname in the workspace
    Nickname {
        #[arg(value_parser = non_empty_string)]
        nickname: String,
    },
}

#[derive(Subcommand)]
pub enum PositionCommand {
    /// Create a position
    Create {
        #[arg(value_parser = non_empty_string)]
        name: String,

        /// Color (red, orange, yellow, green, blue, indigo, purple, gray)
        #[arg(long, default_value = "gray")]
        color: String,

        #[arg(long, short)]
        description: Option<String>,
    },

    /// Delete a position no member holds
    Delete { id: i64 },
}

#[derive(Subcommand)]
pub enum IssueCommand {
    /// Create a new issue
    #[command(after_help = colors::examples("\
Examples:
  stint issue new \"Fix login\"                     Create a task
  stint issue new bug \"Crash\" --severity major    Create a bug
  stint issue new story \"Signup\" --parent PROJ-1  Create a story under an epic"))]
    New {
        /// Issue type (epic, story, task, bug, sub_task) or title if type is omitted
        #[arg(value_parser = non_empty_string)]
        type_or_title: String,

        /// Title (if type was provided as first arg)
        #[arg(value_parser = non_empty_string)]
        title: Option<String>,

        #[command(flatten)]
        draft: DraftArgs,
    },

    /// Show issue details
    Show { key: String },

    /// Edit an issue's fields
    #[command(after_help = colors::examples("\
Examples:
  stint issue edit PROJ-1 --title \"Fix login\" -p high    Retitle and reprioritize
  stint issue edit PROJ-2 --steps \"open, click\"         Bug reproducing steps
  stint issue edit PROJ-3 --summary \"\"                  Clear the summary"))]
    Edit {
        key: String,

        #[command(flatten)]
        fields: EditArgs,
    },

    /// List issues
    List {
        /// Only issues in this status
        #[arg(long, short)]
        status: Option<String>,
    },

    /// Move an issue to a new status
    Status { key: String, status: String },

    /// Change a bug's severity
    Severity { key: String, severity: String },

    /// Move an issue under a parent
    Parent { key: String, parent: String },

    /// Detach an issue from its parent
    Unparent { key: String },

    /// Assign a member
    Assign { key: String, login: String },

    /// Unassign a member
    Unassign { key: String, login: String },

    /// Watch an issue
    Watch { key: String },

    /// Stop watching an issue
    Unwatch { key: String },
}

#[derive(Subcommand)]
pub enum ReviewCommand {
    /// Add a reviewer
    Add { key: String, login: String },

    /// Remove a reviewer
    Remove { key: String, login: String },

    /// Open the next review round
    Request { key: String },

    /// Submit the actor's review (approved, changes_requested, commented)
    Submit {
        key: String,
        verdict: String,

        #[arg(long, short, default_value = "")]
        title: String,

        #[arg(long, short, default_value = "")]
        content: String,
    },

    /// Change the verdict of an existing review
    Status { review: i64, verdict: String },

    /// Rewrite the title or content of the actor's review
    Edit {
        review: i64,

        #[arg(long, short)]
        title: Option<String>,

        #[arg(long, short)]
        content: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum CommentCommand {
    /// Comment on an issue or one of its reviews
    #[command(after_help = colors::examples("\
Examples:
  stint comment add PROJ-1 \"Looks good\"               Comment on the issue
  stint comment add PROJ-1 \"Why?\" --review 3          Comment on review 3
  stint comment add PROJ-1 \"Agreed\" --reply-to 7      Reply to comment 7"))]
    Add {
        key: String,

        #[arg(value_parser = non_empty_string)]
        content: String,

        /// Review id to comment on
        #[arg(long)]
        review: Option<i64>,

        /// Comment id to reply to
        #[arg(long, value_name = "ID")]
        reply_to: Option<i64>,
    },

    /// Rewrite one of the actor's comments
    Edit {
        id: i64,

        #[arg(value_parser = non_empty_string)]
        content: String,
    },

    /// Delete a comment
    Delete { id: i64 },

    /// List an issue's comments
    List { key: String },
}

#[derive(Subcommand)]
pub enum SprintCommand {
    /// Plan a sprint
    New {
        #[arg(value_parser = non_empty_string)]
        title: String,

        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        start: String,

        /// End date (YYYY-MM-DD)
        #[arg(long)]
        end: String,

        #[arg(long, short)]
        goal: Option<String>,
    },

    /// Show a sprint
    Show { key: String },

    /// Edit a planned or active sprint
    Edit {
        key: String,

        #[arg(long, short)]
        title: Option<String>,

        /// New goal (empty to clear)
        #[arg(long, short)]
        goal: Option<String>,

        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        start: Option<String>,

        /// End date (YYYY-MM-DD)
        #[arg(long)]
        end: Option<String>,
    },

    /// Add an issue to a sprint
    Add { sprint: String, issue: String },

    /// Remove an issue from a sprint
    Remove { sprint: String, issue: String },

    /// Start a planned sprint
    Start { key: String },

    /// Complete an active sprint
    Complete { key: String },

    /// Cancel a sprint
    Cancel { key: String },
}
