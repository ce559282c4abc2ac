// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Time-boxed groups of issues.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::issue::Issue;
use crate::workspace::Workspace;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SprintStatus {
    Planning,
    Active,
    Completed,
    Cancelled,
}

impl SprintStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SprintStatus::Planning => "planning",
            SprintStatus::Active => "active",
            SprintStatus::Completed => "completed",
            SprintStatus::Cancelled => "cancelled",
        }
    }

    pub fn can_transition_to(&self, target: SprintStatus) -> bool {
        matches!(
            (self, target),
            (SprintStatus::Planning, SprintStatus::Active)
                | (SprintStatus::Active, SprintStatus::Completed)
                | (SprintStatus::Planning, SprintStatus::Cancelled)
                | (SprintStatus::Active, SprintStatus::Cancelled)
        )
    }

    /// Issues can be added or removed in these statuses.
    pub fn is_open(&self) -> bool {
        matches!(self, SprintStatus::Planning | SprintStatus::Active)
    }
}

impl fmt::Display for SprintStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SprintStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "planning" => Ok(SprintStatus::Planning),
            "active" => Ok(SprintStatus::Active),
            "completed" => Ok(SprintStatus::Completed),
            "cancelled" | "canceled" => Ok(SprintStatus::Cancelled),
            _ => Err(Error::InvalidValue {
                field: "sprint status",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sprint {
    pub id: i64,
    /// `SPRINT-{n}`, unique per workspace.
    pub key: String,
    pub workspace_code: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goal: Option<String>,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
    pub status: SprintStatus,
    /// Ids of issues in the sprint, in insertion order.
    #[serde(default)]
    pub issue_ids: Vec<i64>,
    pub created_at: DateTime<Utc>,
}

/// Sprint fields to change. `None` keeps a field; an empty goal clears it.
#[derive(Debug, Clone, Default)]
pub struct SprintUpdate {
    pub title: Option<String>,
    pub goal: Option<String>,
    pub start_at: Option<DateTime<Utc>>,
    pub end_at: Option<DateTime<Utc>>,
}

impl Sprint {
    pub fn create(
        workspace: &mut Workspace,
        title: impl Into<String>,
        goal: Option<String>,
        start_at: DateTime<Utc>,
        end_at: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Result<Self> {
        validate_dates(start_at, end_at)?;
        Ok(Sprint {
            id: 0,
            key: workspace.take_sprint_key(),
            workspace_code: workspace.code.clone(),
            title: title.into(),
            goal,
            start_at,
            end_at,
            status: SprintStatus::Planning,
            issue_ids: Vec::new(),
            created_at: now,
        })
    }

    /// Edit title, goal or dates of an open sprint.
    pub fn update(&mut self, update: SprintUpdate) -> Result<()> {
        self.validate_open()?;
        let title = match update.title.as_deref().map(str::trim) {
            Some("") => {
                return Err(Error::InvalidOperation("sprint title cannot be empty".to_string()))
            }
            other => other.map(str::to_string),
        };
        self.update_dates(
            update.start_at.unwrap_or(self.start_at),
            update.end_at.unwrap_or(self.end_at),
        )?;
        if let Some(title) = title {
            self.title = title;
        }
        if let Some(goal) = update.goal {
            self.goal = Some(goal).filter(|g| !g.trim().is_empty());
        }
        Ok(())
    }

    pub fn update_dates(&mut self, start_at: DateTime<Utc>, end_at: DateTime<Utc>) -> Result<()> {
        validate_dates(start_at, end_at)?;
        self.start_at = start_at;
        self.end_at = end_at;
        Ok(())
    }

    pub fn update_status(&mut self, status: SprintStatus) -> Result<()> {
        if !self.status.can_transition_to(status) {
            return Err(Error::InvalidOperation(format!(
                "cannot change sprint {} from {} to {}",
                self.key, self.status, status
            )));
        }
        self.status = status;
        Ok(())
    }

    pub fn add_issue(&mut self, issue: &Issue) -> Result<()> {
        self.validate_open()?;
        if issue.workspace_code != self.workspace_code {
            return Err(Error::InvalidOperation(format!(
                "issue {} does not belong to the workspace of sprint {}",
                issue.key, self.key
            )));
        }
        if self.issue_ids.contains(&issue.id) {
            return Err(Error::InvalidOperation(format!(
                "issue {} is already in sprint {}",
                issue.key, self.key
            )));
        }
        self.issue_ids.push(issue.id);
        Ok(())
    }

    pub fn remove_issue(&mut self, issue: &Issue) -> Result<()> {
        self.validate_open()?;
        let before = self.issue_ids.len();
        self.issue_ids.retain(|id| *id != issue.id);
        if self.issue_ids.len() == before {
            return Err(Error::InvalidOperation(format!(
                "issue {} is not in sprint {}",
                issue.key, self.key
            )));
        }
        Ok(())
    }

    fn validate_open(&self) -> Result<()> {
        if !self.status.is_open() {
            return Err(Error::InvalidOperation(format!(
                "sprint {} is {}; it can only change while planning or active",
                self.key, self.status
            )));
        }
        Ok(())
    }
}

fn validate_dates(start_at: DateTime<Utc>, end_at: DateTime<Utc>) -> Result<()> {
    if end_at <= start_at {
        return Err(Error::InvalidOperation(format!(
            "sprint end {} must be after start {}",
            end_at.to_rfc3339(),
            start_at.to_rfc3339()
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "sprint_tests.rs"]
mod tests;
