// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! The workspace aggregate: issue key counter and member count.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::keys::validate_key_prefix;

/// Maximum number of members a workspace can hold.
pub const MAX_MEMBER_COUNT: u32 = 500;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workspace {
    /// Database-assigned identifier (0 until stored).
    pub id: i64,
    /// Unique external code, e.g. `3F9A0C12`.
    pub code: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub key_prefix: String,
    /// Number the next issue key will carry. Starts at 1, never reused.
    pub next_issue_number: u32,
    pub next_sprint_number: u32,
    pub member_count: u32,
    pub created_at: DateTime<Utc>,
}

impl Workspace {
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        description: Option<String>,
        key_prefix: &str,
        now: DateTime<Utc>,
    ) -> Result<Self> {
        let key_prefix = key_prefix.to_uppercase();
        validate_key_prefix(&key_prefix)?;
        Ok(Workspace {
            id: 0,
            code: code.into(),
            name: name.into(),
            description,
            key_prefix,
            next_issue_number: 1,
            next_sprint_number: 1,
            member_count: 0,
            created_at: now,
        })
    }

    /// The key the next issue will receive.
    pub fn issue_key(&self) -> String {
        format!("{}-{}", self.key_prefix, self.next_issue_number)
    }

    /// Consume the next issue key.
    pub fn take_issue_key(&mut self) -> String {
        let key = self.issue_key();
        self.next_issue_number += 1;
        key
    }

    pub fn take_sprint_key(&mut self) -> String {
        let key = format!("SPRINT-{}", self.next_sprint_number);
        self.next_sprint_number += 1;
        key
    }

    pub fn rename(&mut self, name: &str) -> Result<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::InvalidOperation(
                "workspace name cannot be empty".to_string(),
            ));
        }
        self.name = name.to_string();
        Ok(())
    }

    /// Change the prefix used for new issue keys. Existing keys keep theirs;
    /// the counter is not reset, so keys stay unique.
    pub fn update_key_prefix(&mut self, key_prefix: &str) -> Result<()> {
        let key_prefix = key_prefix.to_uppercase();
        validate_key_prefix(&key_prefix)?;
        self.key_prefix = key_prefix;
        Ok(())
    }

    pub fn increase_member_count(&mut self) -> Result<()> {
        if self.member_count >= MAX_MEMBER_COUNT {
            return Err(Error::InvalidOperation(format!(
                "workspace {} has reached the maximum of {MAX_MEMBER_COUNT} members",
                self.code
            )));
        }
        self.member_count += 1;
        Ok(())
    }

    pub fn decrease_member_count(&mut self) -> Result<()> {
        if self.member_count == 0 {
            return Err(Error::InvalidOperation(format!(
                "workspace {} has no members to remove",
                self.code
            )));
        }
        self.member_count -= 1;
        Ok(())
    }
}

#[cfg(test)]
#[path = "workspace_tests.rs"]
mod tests;
