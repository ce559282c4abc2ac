// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Discussion threads on issues and reviews.
//!
//! A comment belongs to an issue and optionally to one of its reviews.
//! Replies are one level deep and stay in their parent's thread. Deleting
//! a comment keeps the row so replies still hang off it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::member::{WorkspaceMember, WorkspaceRole};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    /// Database-assigned identifier (0 until stored).
    pub id: i64,
    pub issue_id: i64,
    /// Set for comments on a review.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<i64>,
    /// Workspace member who wrote the comment.
    pub author_id: i64,
    pub content: String,
    #[serde(default)]
    pub deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn validate_content(content: &str) -> Result<String> {
    let content = content.trim();
    if content.is_empty() {
        return Err(Error::InvalidOperation("comment cannot be empty".to_string()));
    }
    Ok(content.to_string())
}

impl Comment {
    /// A top-level comment on an issue, or on one of its reviews.
    pub fn new(
        issue_id: i64,
        review_id: Option<i64>,
        author_id: i64,
        content: &str,
        now: DateTime<Utc>,
    ) -> Result<Self> {
        Ok(Comment {
            id: 0,
            issue_id,
            review_id,
            parent_id: None,
            author_id,
            content: validate_content(content)?,
            deleted: false,
            created_at: now,
            updated_at: now,
        })
    }

    /// A reply in `parent`'s thread.
    pub fn reply_to(
        parent: &Comment,
        author_id: i64,
        content: &str,
        now: DateTime<Utc>,
    ) -> Result<Self> {
        if parent.is_reply() {
            return Err(Error::InvalidOperation(format!(
                "comment {} is a reply; reply to comment {} instead",
                parent.id,
                parent.parent_id.unwrap_or(parent.id)
            )));
        }
        if parent.deleted {
            return Err(Error::InvalidOperation(format!(
                "comment {} was deleted",
                parent.id
            )));
        }
        let mut reply = Comment::new(parent.issue_id, parent.review_id, author_id, content, now)?;
        reply.parent_id = Some(parent.id);
        Ok(reply)
    }

    pub fn is_reply(&self) -> bool {
        self.parent_id.is_some()
    }

    /// Rewrite the content. Only the author may.
    pub fn edit(&mut self, actor_id: i64, content: &str, now: DateTime<Utc>) -> Result<()> {
        if actor_id != self.author_id {
            return Err(Error::Forbidden(format!(
                "only the author can edit comment {}",
                self.id
            )));
        }
        if self.deleted {
            return Err(Error::InvalidOperation(format!("comment {} was deleted", self.id)));
        }
        self.content = validate_content(content)?;
        self.updated_at = now;
        Ok(())
    }

    /// Mark the comment deleted. The author or a manager may.
    pub fn delete(&mut self, actor: &WorkspaceMember, now: DateTime<Utc>) -> Result<()> {
        if actor.id != self.author_id && !actor.role.is_at_least(WorkspaceRole::Manager) {
            return Err(Error::Forbidden(format!(
                "{} cannot delete comment {} written by member {}",
                actor.nickname, self.id, self.author_id
            )));
        }
        if self.deleted {
            return Err(Error::InvalidOperation(format!(
                "comment {} was already deleted",
                self.id
            )));
        }
        self.deleted = true;
        self.updated_at = now;
        Ok(())
    }
}

#[cfg(test)]
#[path = "comment_tests.rs"]
mod tests;
