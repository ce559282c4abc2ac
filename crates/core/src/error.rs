// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for stint-core operations.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// All possible errors that can occur in stint-core operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    InvalidOperation(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("cannot change status of {key} from {from} to {to}\n  hint: from '{from}' you can go to: {valid_targets}")]
    InvalidTransition {
        key: String,
        from: String,
        to: String,
        valid_targets: String,
    },

    #[error("issue not found: {0}")]
    IssueNotFound(String),

    #[error("workspace not found: {0}")]
    WorkspaceNotFound(String),

    #[error("member not found: {0}")]
    MemberNotFound(String),

    #[error("review not found: {0}")]
    ReviewNotFound(i64),

    #[error("sprint not found: {0}")]
    SprintNotFound(String),

    #[error("position not found: {0}")]
    PositionNotFound(i64),

    #[error("invitation not found: {0}")]
    InvitationNotFound(i64),

    #[error("comment not found: {0}")]
    CommentNotFound(i64),

    #[error(
        "invalid issue type: '{0}'\n  hint: valid types are: epic, story, task, bug, sub_task"
    )]
    InvalidIssueType(String),

    #[error("invalid status: '{0}'\n  hint: valid statuses are: todo, in_progress, paused, in_review, done, closed, deleted")]
    InvalidStatus(String),

    #[error("invalid relation: '{0}'\n  hint: valid relations are: relevant, blocks, blocked_by, causes, caused_by")]
    InvalidRelationType(String),

    #[error("invalid review status: '{0}'\n  hint: valid statuses are: approved, changes_requested, commented")]
    InvalidReviewStatus(String),

    #[error("invalid role: '{0}'\n  hint: valid roles are: owner, admin, manager, collaborator, viewer")]
    InvalidRole(String),

    #[error("invalid {field}: '{value}'")]
    InvalidValue { field: &'static str, value: String },

    #[error("failed to generate a unique workspace code after {0} attempts")]
    CodeGenerationFailed(u32),

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("corrupted data: {0}")]
    CorruptedData(String),
}

/// Coarse classification of an [`Error`], used by callers that map errors
/// onto a transport (exit codes, HTTP-style status codes).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// A business rule rejected the operation.
    InvalidOperation,
    /// The actor lacks the relationship the operation requires.
    Forbidden,
    /// A referenced entity does not exist.
    NotFound,
    /// Input could not be parsed.
    InvalidInput,
    /// Storage or serialization failure.
    Internal,
}

impl ErrorKind {
    /// HTTP-style status code for this kind.
    pub fn status_code(&self) -> u16 {
        match self {
            ErrorKind::InvalidOperation | ErrorKind::InvalidInput => 400,
            ErrorKind::Forbidden => 403,
            ErrorKind::NotFound => 404,
            ErrorKind::Internal => 500,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::InvalidOperation => "invalid_operation",
            ErrorKind::Forbidden => "forbidden",
            ErrorKind::NotFound => "not_found",
            ErrorKind::InvalidInput => "invalid_input",
            ErrorKind::Internal => "internal",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Error {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidOperation(_)
            | Error::InvalidTransition { .. }
            | Error::CodeGenerationFailed(_) => ErrorKind::InvalidOperation,
            Error::Forbidden(_) => ErrorKind::Forbidden,
            Error::IssueNotFound(_)
            | Error::WorkspaceNotFound(_)
            | Error::MemberNotFound(_)
            | Error::ReviewNotFound(_)
            | Error::SprintNotFound(_)
            | Error::PositionNotFound(_)
            | Error::InvitationNotFound(_)
            | Error::CommentNotFound(_) => ErrorKind::NotFound,
            Error::InvalidIssueType(_)
            | Error::InvalidStatus(_)
            | Error::InvalidRelationType(_)
            | Error::InvalidReviewStatus(_)
            | Error::InvalidRole(_)
            | Error::InvalidValue { .. } => ErrorKind::InvalidInput,
            Error::Database(_) | Error::Io(_) | Error::Json(_) | Error::CorruptedData(_) => {
                ErrorKind::Internal
            }
        }
    }
}

/// A specialized Result type for stint-core operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
