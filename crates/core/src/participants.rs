// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Assignees and watchers of an issue.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::error::{Error, Result};
use crate::issue::Issue;
use crate::member::WorkspaceMember;

/// Maximum number of assignees a single issue can carry.
pub const MAX_ASSIGNEES: usize = 50;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IssueAssignee {
    pub member_id: i64,
    pub assigned_at: DateTime<Utc>,
}

impl Issue {
    pub fn is_assignee(&self, member_id: i64) -> bool {
        self.assignees.iter().any(|a| a.member_id == member_id)
    }

    pub fn assignee_ids(&self) -> Vec<i64> {
        self.assignees.iter().map(|a| a.member_id).collect()
    }

    pub fn add_assignee(&mut self, member: &WorkspaceMember, now: DateTime<Utc>) -> Result<()> {
        if self.assignees.len() >= MAX_ASSIGNEES {
            return Err(Error::InvalidOperation(format!(
                "the max number of assignees for a single issue is {MAX_ASSIGNEES}. issue key: {}",
                self.key
            )));
        }
        if member.workspace_code != self.workspace_code {
            return Err(Error::InvalidOperation(format!(
                "assignee must belong to workspace {}. member id: {}",
                self.workspace_code, member.id
            )));
        }
        if self.is_assignee(member.id) {
            return Err(Error::InvalidOperation(format!(
                "member {} is already assigned to {}",
                member.id, self.key
            )));
        }
        self.assignees.push(IssueAssignee {
            member_id: member.id,
            assigned_at: now,
        });
        self.updated_at = now;
        Ok(())
    }

    pub fn remove_assignee(&mut self, member_id: i64, now: DateTime<Utc>) -> Result<()> {
        let before = self.assignees.len();
        self.assignees.retain(|a| a.member_id != member_id);
        if self.assignees.len() == before {
            return Err(Error::InvalidOperation(format!(
                "member {member_id} is not assigned to {}",
                self.key
            )));
        }
        self.updated_at = now;
        Ok(())
    }

    /// Returns false if the member was already watching.
    pub fn add_watcher(&mut self, member_id: i64) -> bool {
        self.watchers.insert(member_id)
    }

    /// Returns false if the member was not watching.
    pub fn remove_watcher(&mut self, member_id: i64) -> bool {
        self.watchers.remove(&member_id)
    }

    pub fn validate_is_assignee(&self, member_id: i64) -> Result<()> {
        if !self.is_assignee(member_id) {
            return Err(Error::Forbidden(format!(
                "member {member_id} is not an assignee of {}",
                self.key
            )));
        }
        Ok(())
    }

    pub fn validate_is_assignee_or_author(&self, member_id: i64) -> Result<()> {
        if self.created_by == Some(member_id) || self.is_assignee(member_id) {
            return Ok(());
        }
        Err(Error::Forbidden(format!(
            "member {member_id} is neither an assignee nor the author of {}",
            self.key
        )))
    }

    /// Everyone with an interest in updates to this issue.
    pub fn subscriber_ids(&self) -> BTreeSet<i64> {
        let mut ids: BTreeSet<i64> = self.watchers.clone();
        ids.extend(self.created_by);
        ids.extend(self.assignees.iter().map(|a| a.member_id));
        ids.extend(self.reviewers.iter().map(|r| r.member_id));
        ids
    }
}

#[cfg(test)]
#[path = "participants_tests.rs"]
mod tests;
