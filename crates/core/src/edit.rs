// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Field edits on an existing issue.

use chrono::{DateTime, NaiveDate, Utc};
use std::collections::BTreeSet;

use crate::error::{Error, Result};
use crate::issue::{Difficulty, Issue, IssueDetails, IssueType, Priority, Status};

/// Fields to change on an issue. `None` leaves a field as it is; an empty
/// string clears an optional text field.
#[derive(Debug, Clone, Default)]
pub struct IssueUpdate {
    pub title: Option<String>,
    pub content: Option<String>,
    pub summary: Option<String>,
    pub due_at: Option<DateTime<Utc>>,
    pub priority: Option<Priority>,
    pub story_point: Option<u32>,
    pub difficulty: Option<Difficulty>,
    pub business_goal: Option<String>,
    pub target_release_date: Option<NaiveDate>,
    pub hard_deadline: Option<NaiveDate>,
    pub user_story: Option<String>,
    pub acceptance_criteria: Option<String>,
    pub reproducing_steps: Option<String>,
    pub affected_versions: Option<BTreeSet<String>>,
}

impl IssueUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.content.is_none()
            && self.summary.is_none()
            && self.due_at.is_none()
            && self.priority.is_none()
            && self.story_point.is_none()
            && self.difficulty.is_none()
            && self.business_goal.is_none()
            && self.target_release_date.is_none()
            && self.hard_deadline.is_none()
            && self.user_story.is_none()
            && self.acceptance_criteria.is_none()
            && self.reproducing_steps.is_none()
            && self.affected_versions.is_none()
    }
}

fn non_empty(text: String) -> Option<String> {
    Some(text).filter(|t| !t.trim().is_empty())
}

impl Issue {
    /// Apply `update`, returning the names of the fields it touched.
    ///
    /// Fields belonging to another issue type are rejected rather than
    /// ignored. A bug's priority may not drop below what its severity needs.
    pub fn apply_update(&mut self, update: IssueUpdate, now: DateTime<Utc>) -> Result<Vec<&'static str>> {
        if update.is_empty() {
            return Err(Error::InvalidOperation(format!("nothing to update on {}", self.key)));
        }
        if self.status == Status::Deleted {
            return Err(Error::InvalidOperation(format!("{} is deleted", self.key)));
        }

        let mut details = self.details.clone();
        let mut changed = apply_details(&mut details, &update).map_err(|field| {
            Error::InvalidOperation(format!(
                "{} is a {}; it has no {field}",
                self.key,
                self.issue_type()
            ))
        })?;

        if let Some(priority) = update.priority {
            if let IssueDetails::Bug { severity, .. } = &details {
                if let Some(minimum) = severity.minimum_priority() {
                    if priority < minimum {
                        return Err(Error::InvalidOperation(format!(
                            "{} has severity {severity}; priority must stay at {minimum} or above",
                            self.key
                        )));
                    }
                }
            }
        }

        if let Some(title) = update.title {
            let title = title.trim();
            if title.is_empty() {
                return Err(Error::InvalidOperation("issue title cannot be empty".to_string()));
            }
            self.title = title.to_string();
            changed.push("title");
        }
        if let Some(content) = update.content {
            self.content = content;
            changed.push("content");
        }
        if let Some(summary) = update.summary {
            self.summary = non_empty(summary);
            changed.push("summary");
        }
        if let Some(due_at) = update.due_at {
            self.due_at = Some(due_at);
            changed.push("due_at");
        }
        if let Some(story_point) = update.story_point {
            self.story_point = Some(story_point);
            changed.push("story_point");
        }
        if let Some(priority) = update.priority {
            self.update_priority(priority, now);
            changed.push("priority");
        }

        self.details = details;
        self.updated_at = now;
        Ok(changed)
    }
}

/// Write the per-type fields of `update` into `details`. On a field the
/// variant does not carry, returns that field's name.
fn apply_details(
    details: &mut IssueDetails,
    update: &IssueUpdate,
) -> std::result::Result<Vec<&'static str>, &'static str> {
    let typed = [
        ("business_goal", update.business_goal.is_some(), IssueType::Epic),
        ("target_release_date", update.target_release_date.is_some(), IssueType::Epic),
        ("hard_deadline", update.hard_deadline.is_some(), IssueType::Epic),
        ("user_story", update.user_story.is_some(), IssueType::Story),
        ("acceptance_criteria", update.acceptance_criteria.is_some(), IssueType::Story),
        ("reproducing_steps", update.reproducing_steps.is_some(), IssueType::Bug),
        ("affected_versions", update.affected_versions.is_some(), IssueType::Bug),
    ];
    let issue_type = details.issue_type();
    if let Some((field, ..)) = typed.iter().find(|(_, set, owner)| *set && *owner != issue_type) {
        return Err(*field);
    }

    let mut changed = Vec::new();
    if let Some(value) = update.difficulty {
        match details {
            IssueDetails::Story { difficulty, .. }
            | IssueDetails::Task { difficulty }
            | IssueDetails::Bug { difficulty, .. }
            | IssueDetails::SubTask { difficulty } => *difficulty = Some(value),
            IssueDetails::Epic { .. } => return Err("difficulty"),
        }
        changed.push("difficulty");
    }

    match details {
        IssueDetails::Epic {
            business_goal,
            target_release_date,
            hard_deadline,
        } => {
            if let Some(value) = &update.business_goal {
                *business_goal = value.clone();
                changed.push("business_goal");
            }
            if let Some(value) = update.target_release_date {
                *target_release_date = Some(value);
                changed.push("target_release_date");
            }
            if let Some(value) = update.hard_deadline {
                *hard_deadline = Some(value);
                changed.push("hard_deadline");
            }
        }
        IssueDetails::Story {
            user_story,
            acceptance_criteria,
            ..
        } => {
            if let Some(value) = &update.user_story {
                *user_story = value.clone();
                changed.push("user_story");
            }
            if let Some(value) = &update.acceptance_criteria {
                *acceptance_criteria = non_empty(value.clone());
                changed.push("acceptance_criteria");
            }
        }
        IssueDetails::Bug {
            reproducing_steps,
            affected_versions,
            ..
        } => {
            if let Some(value) = &update.reproducing_steps {
                *reproducing_steps = value.clone();
                changed.push("reproducing_steps");
            }
            if let Some(value) = &update.affected_versions {
                *affected_versions = value.clone();
                changed.push("affected_versions");
            }
        }
        IssueDetails::Task { .. } | IssueDetails::SubTask { .. } => {}
    }

    Ok(changed)
}

#[cfg(test)]
#[path = "edit_tests.rs"]
mod tests;
