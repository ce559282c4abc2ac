// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Parent/child links between issues.
//!
//! Epics sit at the top and never have a parent. Stories, tasks and bugs
//! hang off an epic; sub-tasks hang off a story, task or bug.

use chrono::{DateTime, Utc};

use crate::error::{Error, Result};
use crate::issue::{Issue, IssueType};

impl IssueType {
    /// Whether an issue of this type may have a parent of `parent` type.
    pub fn accepts_parent(&self, parent: IssueType) -> bool {
        match self {
            IssueType::Epic => false,
            IssueType::Story | IssueType::Task | IssueType::Bug => parent == IssueType::Epic,
            IssueType::SubTask => matches!(
                parent,
                IssueType::Story | IssueType::Task | IssueType::Bug
            ),
        }
    }
}

impl Issue {
    /// Check that `parent` may become this issue's parent.
    pub fn validate_parent(&self, parent: &Issue) -> Result<()> {
        if self.key == parent.key {
            return Err(Error::InvalidOperation(format!(
                "{} cannot be its own parent",
                self.key
            )));
        }
        if self.workspace_code != parent.workspace_code {
            return Err(Error::InvalidOperation(format!(
                "parent {} must belong to workspace {}",
                parent.key, self.workspace_code
            )));
        }
        if !self.issue_type().accepts_parent(parent.issue_type()) {
            let reason = match self.issue_type() {
                IssueType::Epic => "an epic cannot have a parent".to_string(),
                IssueType::SubTask => "a sub-task's parent must be a story, task or bug".to_string(),
                other => format!("a {other}'s parent must be an epic"),
            };
            return Err(Error::InvalidOperation(format!(
                "cannot set {} ({}) as parent of {}: {reason}",
                parent.key,
                parent.issue_type(),
                self.key
            )));
        }
        Ok(())
    }

    /// Re-parent this issue under `new_parent`.
    ///
    /// `old_parent` must be the currently loaded parent, if any; its child
    /// list is updated alongside.
    pub fn update_parent(
        &mut self,
        new_parent: &mut Issue,
        old_parent: Option<&mut Issue>,
        now: DateTime<Utc>,
    ) -> Result<()> {
        self.validate_parent(new_parent)?;

        if let Some(old) = old_parent {
            old.child_ids.retain(|id| *id != self.id);
        }
        self.parent_id = Some(new_parent.id);
        if !new_parent.child_ids.contains(&self.id) {
            new_parent.child_ids.push(self.id);
        }
        self.updated_at = now;
        Ok(())
    }

    /// Detach from the current parent. Returns false if there was none.
    pub fn remove_parent(&mut self, parent: Option<&mut Issue>, now: DateTime<Utc>) -> bool {
        if !self.has_parent() {
            return false;
        }
        if let Some(parent) = parent {
            parent.child_ids.retain(|id| *id != self.id);
        }
        self.parent_id = None;
        self.updated_at = now;
        true
    }
}

#[cfg(test)]
#[path = "hierarchy_tests.rs"]
mod tests;
