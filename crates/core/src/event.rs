// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Audit trail of issue changes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Types of actions that can be recorded in the event log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Issue was created.
    Created,
    /// Status changed (old -> new).
    StatusChanged,
    /// Fields, priority or severity changed.
    Edited,
    /// A new review round was requested.
    ReviewRequested,
    ReviewerAdded,
    ReviewerRemoved,
    /// A review was submitted or its verdict changed.
    Reviewed,
    ReviewEdited,
    Commented,
    CommentEdited,
    CommentDeleted,
    Assigned,
    Unassigned,
    Watched,
    Unwatched,
    /// A relation was added.
    Related,
    /// A relation was removed.
    Unrelated,
    ParentChanged,
    ParentRemoved,
    AddedToSprint,
    RemovedFromSprint,
}

impl Action {
    /// Returns the string representation used in storage and display.
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Created => "created",
            Action::StatusChanged => "status_changed",
            Action::Edited => "edited",
            Action::ReviewRequested => "review_requested",
            Action::ReviewerAdded => "reviewer_added",
            Action::ReviewerRemoved => "reviewer_removed",
            Action::Reviewed => "reviewed",
            Action::ReviewEdited => "review_edited",
            Action::Commented => "commented",
            Action::CommentEdited => "comment_edited",
            Action::CommentDeleted => "comment_deleted",
            Action::Assigned => "assigned",
            Action::Unassigned => "unassigned",
            Action::Watched => "watched",
            Action::Unwatched => "unwatched",
            Action::Related => "related",
            Action::Unrelated => "unrelated",
            Action::ParentChanged => "parent_changed",
            Action::ParentRemoved => "parent_removed",
            Action::AddedToSprint => "added_to_sprint",
            Action::RemovedFromSprint => "removed_from_sprint",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Action {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "created" => Ok(Action::Created),
            "status_changed" => Ok(Action::StatusChanged),
            "edited" => Ok(Action::Edited),
            "review_requested" => Ok(Action::ReviewRequested),
            "reviewer_added" => Ok(Action::ReviewerAdded),
            "reviewer_removed" => Ok(Action::ReviewerRemoved),
            "reviewed" => Ok(Action::Reviewed),
            "review_edited" => Ok(Action::ReviewEdited),
            "commented" => Ok(Action::Commented),
            "comment_edited" => Ok(Action::CommentEdited),
            "comment_deleted" => Ok(Action::CommentDeleted),
            "assigned" => Ok(Action::Assigned),
            "unassigned" => Ok(Action::Unassigned),
            "watched" => Ok(Action::Watched),
            "unwatched" => Ok(Action::Unwatched),
            "related" => Ok(Action::Related),
            "unrelated" => Ok(Action::Unrelated),
            "parent_changed" => Ok(Action::ParentChanged),
            "parent_removed" => Ok(Action::ParentRemoved),
            "added_to_sprint" => Ok(Action::AddedToSprint),
            "removed_from_sprint" => Ok(Action::RemovedFromSprint),
            _ => Err(Error::InvalidValue {
                field: "action",
                value: s.to_string(),
            }),
        }
    }
}

/// An audit log entry recording a change to an issue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Database-assigned identifier.
    pub id: i64,
    /// The issue this event belongs to.
    pub issue_id: i64,
    /// Workspace member who made the change, if known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actor_id: Option<i64>,
    /// What type of change occurred.
    pub action: Action,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub old_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_value: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Event {
    pub fn new(issue_id: i64, action: Action, now: DateTime<Utc>) -> Self {
        Event {
            id: 0, // Will be set by database
            issue_id,
            actor_id: None,
            action,
            old_value: None,
            new_value: None,
            created_at: now,
        }
    }

    /// Sets the old and new values for this event (builder pattern).
    pub fn with_values(mut self, old: Option<String>, new: Option<String>) -> Self {
        self.old_value = old;
        self.new_value = new;
        self
    }

    /// Sets the acting member (builder pattern).
    pub fn by(mut self, actor_id: i64) -> Self {
        self.actor_id = Some(actor_id);
        self
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
