// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Core issue types and the status state machine.
//!
//! An [`Issue`] is a shared core struct plus an [`IssueDetails`] variant
//! carrying the fields specific to epics, stories, tasks, bugs and sub-tasks.
//! Review, relation, assignee and hierarchy behaviour live in their own
//! modules as further `impl Issue` blocks.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::participants::IssueAssignee;
use crate::relation::RelationEdge;
use crate::review::IssueReviewer;
use crate::workspace::Workspace;

/// Classification of issues by their scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueType {
    /// Large initiative grouping stories, tasks and bugs.
    Epic,
    /// User-facing feature described as a user story.
    Story,
    /// Standard unit of work.
    Task,
    /// Defect to fix.
    Bug,
    /// Piece of a story, task or bug.
    SubTask,
}

impl IssueType {
    /// Returns the string representation used in storage and display.
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueType::Epic => "epic",
            IssueType::Story => "story",
            IssueType::Task => "task",
            IssueType::Bug => "bug",
            IssueType::SubTask => "sub_task",
        }
    }
}

impl fmt::Display for IssueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for IssueType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "epic" => Ok(IssueType::Epic),
            "story" => Ok(IssueType::Story),
            "task" => Ok(IssueType::Task),
            "bug" => Ok(IssueType::Bug),
            "sub_task" | "sub-task" | "subtask" => Ok(IssueType::SubTask),
            _ => Err(Error::InvalidIssueType(s.to_string())),
        }
    }
}

/// Workflow status of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// Not yet started. Initial state for new issues.
    Todo,
    /// Currently being worked on.
    InProgress,
    /// Work suspended.
    Paused,
    /// Waiting on reviewer verdicts.
    InReview,
    /// Successfully completed.
    Done,
    /// Closed without completion.
    Closed,
    /// Soft-deleted; the row is kept.
    Deleted,
}

impl Status {
    /// Returns the string representation used in storage and display.
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Todo => "todo",
            Status::InProgress => "in_progress",
            Status::Paused => "paused",
            Status::InReview => "in_review",
            Status::Done => "done",
            Status::Closed => "closed",
            Status::Deleted => "deleted",
        }
    }

    /// Statuses reachable from this one in a single transition.
    pub fn allowed_next(&self) -> &'static [Status] {
        match self {
            Status::Todo => &[Status::InProgress, Status::Closed, Status::Deleted],
            Status::InProgress => &[
                Status::InReview,
                Status::Done,
                Status::Closed,
                Status::Deleted,
                Status::Paused,
            ],
            Status::Paused => &[Status::InProgress, Status::Closed, Status::Deleted],
            Status::InReview => &[Status::Done],
            Status::Done | Status::Closed | Status::Deleted => &[],
        }
    }

    /// Check if a transition from this status to target is in the table.
    pub fn can_transition_to(&self, target: Status) -> bool {
        self.allowed_next().contains(&target)
    }

    /// Get valid transition targets as a formatted string.
    pub fn valid_targets(&self) -> String {
        let targets = self.allowed_next();
        if targets.is_empty() {
            return "nothing (terminal status)".to_string();
        }
        targets
            .iter()
            .map(Status::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Returns true for done, closed and deleted.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Status::Done | Status::Closed | Status::Deleted)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Status {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "todo" => Ok(Status::Todo),
            "in_progress" => Ok(Status::InProgress),
            "paused" => Ok(Status::Paused),
            "in_review" => Ok(Status::InReview),
            "done" => Ok(Status::Done),
            "closed" => Ok(Status::Closed),
            "deleted" => Ok(Status::Deleted),
            _ => Err(Error::InvalidStatus(s.to_string())),
        }
    }
}

/// Issue priority, ordered from lowest to highest.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Lowest,
    Low,
    #[default]
    Medium,
    High,
    Highest,
    Emergency,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Lowest => "lowest",
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::Highest => "highest",
            Priority::Emergency => "emergency",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Priority {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "lowest" => Ok(Priority::Lowest),
            "low" => Ok(Priority::Low),
            "medium" | "med" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            "highest" => Ok(Priority::Highest),
            "emergency" => Ok(Priority::Emergency),
            _ => Err(Error::InvalidValue {
                field: "priority",
                value: s.to_string(),
            }),
        }
    }
}

/// Estimated difficulty of a piece of work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    Normal,
    Hard,
}

impl FromStr for Difficulty {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "normal" => Ok(Difficulty::Normal),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(Error::InvalidValue {
                field: "difficulty",
                value: s.to_string(),
            }),
        }
    }
}

/// Bug severity, ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BugSeverity {
    Minor,
    Major,
    Critical,
    Blocker,
}

impl BugSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            BugSeverity::Minor => "minor",
            BugSeverity::Major => "major",
            BugSeverity::Critical => "critical",
            BugSeverity::Blocker => "blocker",
        }
    }

    /// Severities at or above critical need immediate attention.
    pub fn needs_immediate_attention(&self) -> bool {
        *self >= BugSeverity::Critical
    }

    /// Minimum priority a bug of this severity is raised to.
    pub fn minimum_priority(&self) -> Option<Priority> {
        match self {
            BugSeverity::Blocker => Some(Priority::Emergency),
            BugSeverity::Critical => Some(Priority::Highest),
            BugSeverity::Major | BugSeverity::Minor => None,
        }
    }
}

impl fmt::Display for BugSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for BugSeverity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "minor" => Ok(BugSeverity::Minor),
            "major" => Ok(BugSeverity::Major),
            "critical" => Ok(BugSeverity::Critical),
            "blocker" => Ok(BugSeverity::Blocker),
            _ => Err(Error::InvalidValue {
                field: "severity",
                value: s.to_string(),
            }),
        }
    }
}

/// Per-type fields of an issue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum IssueDetails {
    Epic {
        business_goal: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        target_release_date: Option<NaiveDate>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        hard_deadline: Option<NaiveDate>,
    },
    Story {
        user_story: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        acceptance_criteria: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        difficulty: Option<Difficulty>,
    },
    Task {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        difficulty: Option<Difficulty>,
    },
    Bug {
        reproducing_steps: String,
        severity: BugSeverity,
        #[serde(default)]
        affected_versions: BTreeSet<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        difficulty: Option<Difficulty>,
    },
    SubTask {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        difficulty: Option<Difficulty>,
    },
}

impl IssueDetails {
    /// The discriminator of this variant.
    pub fn issue_type(&self) -> IssueType {
        match self {
            IssueDetails::Epic { .. } => IssueType::Epic,
            IssueDetails::Story { .. } => IssueType::Story,
            IssueDetails::Task { .. } => IssueType::Task,
            IssueDetails::Bug { .. } => IssueType::Bug,
            IssueDetails::SubTask { .. } => IssueType::SubTask,
        }
    }

    /// Details with empty per-type fields for the given type.
    pub fn empty(issue_type: IssueType) -> Self {
        match issue_type {
            IssueType::Epic => IssueDetails::Epic {
                business_goal: String::new(),
                target_release_date: None,
                hard_deadline: None,
            },
            IssueType::Story => IssueDetails::Story {
                user_story: String::new(),
                acceptance_criteria: None,
                difficulty: None,
            },
            IssueType::Task => IssueDetails::Task { difficulty: None },
            IssueType::Bug => IssueDetails::Bug {
                reproducing_steps: String::new(),
                severity: BugSeverity::Minor,
                affected_versions: BTreeSet::new(),
                difficulty: None,
            },
            IssueType::SubTask => IssueDetails::SubTask { difficulty: None },
        }
    }
}

/// Caller-provided fields for a new issue.
#[derive(Debug, Clone)]
pub struct IssueDraft {
    pub title: String,
    pub content: String,
    pub summary: Option<String>,
    pub priority: Option<Priority>,
    pub due_at: Option<DateTime<Utc>>,
    pub story_point: Option<u32>,
    pub details: IssueDetails,
}

impl IssueDraft {
    pub fn new(title: impl Into<String>, details: IssueDetails) -> Self {
        IssueDraft {
            title: title.into(),
            content: String::new(),
            summary: None,
            priority: None,
            due_at: None,
            story_point: None,
            details,
        }
    }

    /// Sets the content (builder pattern).
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    /// Sets the priority (builder pattern).
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }
}

/// A tracked unit of work within a workspace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    /// Database-assigned identifier (0 until stored).
    pub id: i64,
    /// Workspace-scoped key, e.g. `PROJ-12`.
    pub key: String,
    /// Code of the owning workspace.
    pub workspace_code: String,
    pub title: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    pub status: Status,
    pub priority: Priority,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub story_point: Option<u32>,
    /// Number of review rounds requested so far.
    pub current_review_round: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<i64>,
    /// Derived inverse of `parent_id`.
    #[serde(default)]
    pub child_ids: Vec<i64>,
    /// Workspace member who created the issue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review_requested_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub details: IssueDetails,
    #[serde(default)]
    pub reviewers: Vec<IssueReviewer>,
    #[serde(default)]
    pub assignees: Vec<IssueAssignee>,
    /// Workspace member ids watching this issue.
    #[serde(default)]
    pub watchers: BTreeSet<i64>,
    /// Relations held by this issue, in insertion order.
    #[serde(default)]
    pub relations: Vec<RelationEdge>,
}

impl Issue {
    /// Creates a new issue, consuming the workspace's next issue number.
    pub fn create(
        workspace: &mut Workspace,
        draft: IssueDraft,
        created_by: Option<i64>,
        now: DateTime<Utc>,
    ) -> Self {
        let key = workspace.take_issue_key();
        let mut issue = Issue {
            id: 0, // Will be set by database
            key,
            workspace_code: workspace.code.clone(),
            title: draft.title,
            content: draft.content,
            summary: draft.summary,
            status: Status::Todo,
            priority: draft.priority.unwrap_or_default(),
            due_at: draft.due_at,
            story_point: draft.story_point,
            current_review_round: 0,
            parent_id: None,
            child_ids: Vec::new(),
            created_by,
            started_at: None,
            review_requested_at: None,
            resolved_at: None,
            created_at: now,
            updated_at: now,
            details: draft.details,
            reviewers: Vec::new(),
            assignees: Vec::new(),
            watchers: BTreeSet::new(),
            relations: Vec::new(),
        };
        issue.raise_priority_by_severity();
        issue
    }

    pub fn issue_type(&self) -> IssueType {
        self.details.issue_type()
    }

    pub fn has_parent(&self) -> bool {
        self.parent_id.is_some()
    }

    /// Move the issue to `new_status`, recording the matching timestamp.
    pub fn update_status(&mut self, new_status: Status, now: DateTime<Utc>) -> Result<()> {
        self.validate_status_transition(new_status)?;
        self.status = new_status;
        self.record_status_timestamp(new_status, now);
        self.updated_at = now;
        Ok(())
    }

    pub fn update_priority(&mut self, priority: Priority, now: DateTime<Utc>) {
        self.priority = priority;
        self.updated_at = now;
    }

    /// Change a bug's severity, raising its priority to match.
    pub fn update_severity(&mut self, new_severity: BugSeverity, now: DateTime<Utc>) -> Result<()> {
        match &mut self.details {
            IssueDetails::Bug { severity, .. } => *severity = new_severity,
            _ => {
                return Err(Error::InvalidOperation(format!(
                    "only bugs have a severity. issue key: {}, type: {}",
                    self.key,
                    self.issue_type()
                )))
            }
        }
        self.raise_priority_by_severity();
        self.updated_at = now;
        Ok(())
    }

    /// Reject the operation unless this issue is of `expected` type.
    pub fn validate_issue_type(&self, expected: IssueType) -> Result<()> {
        if self.issue_type() != expected {
            return Err(Error::InvalidOperation(format!(
                "issue type does not match. issue type: {}, required type: {}",
                self.issue_type(),
                expected
            )));
        }
        Ok(())
    }

    fn validate_status_transition(&self, new_status: Status) -> Result<()> {
        if !self.status.can_transition_to(new_status) {
            return Err(Error::InvalidTransition {
                key: self.key.clone(),
                from: self.status.to_string(),
                to: new_status.to_string(),
                valid_targets: self.status.valid_targets(),
            });
        }

        if new_status == Status::Done {
            self.validate_transition_to_done()?;
        }

        if let IssueDetails::Bug { severity, .. } = &self.details {
            if new_status == Status::Paused && severity.needs_immediate_attention() {
                return Err(Error::InvalidOperation(format!(
                    "bug {} has severity {}; only bugs below critical can be paused",
                    self.key, severity
                )));
            }
        }

        Ok(())
    }

    fn validate_transition_to_done(&self) -> Result<()> {
        if self.has_any_changes_requested() {
            return Err(Error::InvalidOperation(format!(
                "cannot complete {}: every review for round {} must be approved or a comment",
                self.key, self.current_review_round
            )));
        }
        self.validate_blocking_issues_are_done()
    }

    fn record_status_timestamp(&mut self, new_status: Status, now: DateTime<Utc>) {
        match new_status {
            Status::InProgress if self.started_at.is_none() => self.started_at = Some(now),
            Status::InReview => self.review_requested_at = Some(now),
            Status::Done => self.resolved_at = Some(now),
            _ => {}
        }
    }

    fn raise_priority_by_severity(&mut self) {
        if let IssueDetails::Bug { severity, .. } = &self.details {
            if let Some(minimum) = severity.minimum_priority() {
                if self.priority < minimum {
                    self.priority = minimum;
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "issue_tests.rs"]
mod tests;
