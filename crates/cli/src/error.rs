// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use serde::Serialize;
use stint_core::ErrorKind;
use thiserror::Error;

/// Errors surfaced by the `stint` command line.
///
/// Domain failures pass through as [`Error::Core`] so their kind survives
/// all the way to the exit code and the JSON error body.
#[derive(Debug, Error)]
pub enum Error {
    #[error("not initialized: run 'stint init' first")]
    NotInitialized,

    #[error("already initialized at {0}")]
    AlreadyInitialized(String),

    #[error("no acting member\n  hint: pass --actor <login> or set 'actor' in stint.toml")]
    NoActor,

    #[error("no workspace selected\n  hint: pass --workspace <code> or run 'stint workspace use <code>'")]
    NoWorkspace,

    #[error("invalid date '{0}': expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("{0}")]
    Core(#[from] stint_core::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("config error: {0}")]
    Config(String),
}

/// A specialized Result type for stint CLI operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The structured form of an error, printed with `--json`.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub kind: ErrorKind,
    pub status: u16,
    pub message: String,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Core(e) => e.kind(),
            Error::NotInitialized
            | Error::AlreadyInitialized(_)
            | Error::NoActor
            | Error::NoWorkspace => ErrorKind::InvalidOperation,
            Error::InvalidDate(_) | Error::Config(_) => ErrorKind::InvalidInput,
            Error::Io(_) | Error::Json(_) => ErrorKind::Internal,
        }
    }

    pub fn body(&self) -> ErrorBody {
        let kind = self.kind();
        ErrorBody {
            kind,
            status: kind.status_code(),
            message: self.to_string(),
        }
    }

    /// Process exit code: 1 for rejected operations, 2 for bad input,
    /// 3 for internal failures.
    pub fn exit_code(&self) -> i32 {
        match self.kind() {
            ErrorKind::InvalidOperation | ErrorKind::Forbidden | ErrorKind::NotFound => 1,
            ErrorKind::InvalidInput => 2,
            ErrorKind::Internal => 3,
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
