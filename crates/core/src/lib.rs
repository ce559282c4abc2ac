// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! stint-core: domain model and storage for the stint issue tracker
//!
//! Issues move through a status state machine gated by review rounds and
//! blocking relations. Workspaces scope issue keys, members and sprints.
//! The [`service`] layer runs each use-case in one SQLite transaction.

pub mod comment;
pub mod db;
pub mod edit;
pub mod error;
pub mod event;
pub mod hierarchy;
pub mod issue;
pub mod keys;
pub mod member;
pub mod participants;
pub mod relation;
pub mod review;
pub mod service;
pub mod sprint;
pub mod workspace;

#[cfg(test)]
mod testing;

pub use db::{Database, Store};
pub use comment::Comment;
pub use edit::IssueUpdate;
pub use error::{Error, ErrorKind, Result};
pub use event::{Action, Event};
pub use issue::{
    BugSeverity, Difficulty, Issue, IssueDetails, IssueDraft, IssueType, Priority, Status,
};
pub use member::{
    Color, Invitation, InvitationStatus, Member, Position, WorkspaceMember, WorkspaceRole,
};
pub use participants::IssueAssignee;
pub use relation::{RelationEdge, RelationType};
pub use review::{IssueReviewer, Review, ReviewStatus};
pub use service::{IssueService, SprintService, WorkspaceService};
pub use sprint::{Sprint, SprintStatus, SprintUpdate};
pub use workspace::Workspace;
