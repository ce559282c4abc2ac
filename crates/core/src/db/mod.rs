// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! SQLite-backed storage.
//!
//! [`Database`] owns the connection. All reads and writes go through a
//! [`Store`], which borrows either the bare connection (reads) or an open
//! transaction (writes, via [`Database::unit_of_work`]).

mod comments;
mod events;
mod issues;
mod relations;
mod reviews;
mod schema;
mod sprints;
mod workspaces;

pub use schema::{run_migrations, SCHEMA};

use chrono::{DateTime, Utc};
use rusqlite::{Connection, TransactionBehavior};
use std::path::Path;
use std::time::Duration;

use crate::error::{Error, Result};

/// Default time a writer waits for the database lock.
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5000;

/// Parse a string value from the database, returning a rusqlite error on parse failure.
fn parse_db<T: std::str::FromStr>(
    value: &str,
    column: &str,
) -> std::result::Result<T, rusqlite::Error> {
    value.parse().map_err(|_| corrupted(format!("invalid value '{value}' in column '{column}'")))
}

/// Parse an RFC3339 timestamp from the database.
fn parse_timestamp(
    value: &str,
    column: &str,
) -> std::result::Result<DateTime<Utc>, rusqlite::Error> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| corrupted(format!("invalid timestamp '{value}' in column '{column}'")))
}

fn parse_timestamp_opt(
    value: Option<String>,
    column: &str,
) -> std::result::Result<Option<DateTime<Utc>>, rusqlite::Error> {
    value.map(|v| parse_timestamp(&v, column)).transpose()
}

fn corrupted(message: String) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(
        0,
        rusqlite::types::Type::Text,
        Box::new(Error::CorruptedData(message)),
    )
}

/// SQLite database connection.
pub struct Database {
    /// The underlying SQLite connection.
    pub conn: Connection,
}

impl Database {
    /// Open a database connection at the given path, creating and migrating if needed.
    pub fn open(path: &Path) -> Result<Self> {
        Self::open_with_timeout(path, DEFAULT_BUSY_TIMEOUT_MS)
    }

    pub fn open_with_timeout(path: &Path, busy_timeout_ms: u64) -> Result<Self> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;
        conn.execute_batch(
            "PRAGMA foreign_keys = ON;
             PRAGMA journal_mode = WAL;",
        )?;
        conn.busy_timeout(Duration::from_millis(busy_timeout_ms))?;

        let db = Database { conn };
        run_migrations(&db.conn)?;
        tracing::debug!(path = %path.display(), "database opened");
        Ok(db)
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        let db = Database { conn };
        run_migrations(&db.conn)?;
        Ok(db)
    }

    /// Read access outside of a transaction.
    pub fn store(&self) -> Store<'_> {
        Store { conn: &self.conn }
    }

    /// Run `f` inside one write transaction.
    ///
    /// The transaction is opened with `BEGIN IMMEDIATE`, so the write lock is
    /// held from the first read. Any error rolls everything back.
    pub fn unit_of_work<T, F>(&mut self, f: F) -> Result<T>
    where
        F: FnOnce(&Store<'_>) -> Result<T>,
    {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        tracing::debug!("transaction begin");

        let result = f(&Store { conn: &tx });
        match result {
            Ok(value) => {
                tx.commit()?;
                tracing::debug!("transaction commit");
                Ok(value)
            }
            Err(err) => {
                // Dropping the transaction rolls it back.
                drop(tx);
                tracing::debug!(error = %err, "transaction rollback");
                Err(err)
            }
        }
    }
}

/// Repository operations over a borrowed connection or transaction.
pub struct Store<'a> {
    conn: &'a Connection,
}

impl Store<'_> {
    fn last_insert_rowid(&self) -> i64 {
        self.conn.last_insert_rowid()
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
