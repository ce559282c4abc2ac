// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use rusqlite::{params, OptionalExtension, Row};
use std::collections::BTreeSet;

use crate::error::{Error, Result};
use crate::issue::{Issue, IssueDetails, Status};
use crate::participants::IssueAssignee;

use super::{corrupted, parse_db, parse_timestamp, parse_timestamp_opt, Store};

const ISSUE_COLUMNS: &str = "id, workspace_code, key, type, title, content, summary, status,
     priority, due_at, story_point, current_review_round, parent_id, created_by, started_at,
     review_requested_at, resolved_at, created_at, updated_at, details";

/// Row to issue core; collections are filled in by [`Store::load_collections`].
fn issue_from_row(row: &Row<'_>) -> rusqlite::Result<Issue> {
    let type_str: String = row.get(3)?;
    let status_str: String = row.get(7)?;
    let priority_str: String = row.get(8)?;
    let created_str: String = row.get(17)?;
    let updated_str: String = row.get(18)?;
    let details_str: String = row.get(19)?;

    let details: IssueDetails = serde_json::from_str(&details_str)
        .map_err(|e| corrupted(format!("invalid details json: {e}")))?;
    let stored_type: crate::issue::IssueType = parse_db(&type_str, "type")?;
    if details.issue_type() != stored_type {
        return Err(corrupted(format!(
            "details type {} does not match column type {stored_type}",
            details.issue_type()
        )));
    }

    Ok(Issue {
        id: row.get(0)?,
        workspace_code: row.get(1)?,
        key: row.get(2)?,
        title: row.get(4)?,
        content: row.get(5)?,
        summary: row.get(6)?,
        status: parse_db(&status_str, "status")?,
        priority: parse_db(&priority_str, "priority")?,
        due_at: parse_timestamp_opt(row.get(9)?, "due_at")?,
        story_point: row.get(10)?,
        current_review_round: row.get(11)?,
        parent_id: row.get(12)?,
        child_ids: Vec::new(),
        created_by: row.get(13)?,
        started_at: parse_timestamp_opt(row.get(14)?, "started_at")?,
        review_requested_at: parse_timestamp_opt(row.get(15)?, "review_requested_at")?,
        resolved_at: parse_timestamp_opt(row.get(16)?, "resolved_at")?,
        created_at: parse_timestamp(&created_str, "created_at")?,
        updated_at: parse_timestamp(&updated_str, "updated_at")?,
        details,
        reviewers: Vec::new(),
        assignees: Vec::new(),
        watchers: BTreeSet::new(),
        relations: Vec::new(),
    })
}

impl Store<'_> {
    /// Insert a new issue, returning its id.
    pub fn insert_issue(&self, issue: &Issue) -> Result<i64> {
        let details = serde_json::to_string(&issue.details)?;
        self.conn.execute(
            "INSERT INTO issues (workspace_code, key, type, title, content, summary, status,
             priority, due_at, story_point, current_review_round, parent_id, created_by,
             started_at, review_requested_at, resolved_at, created_at, updated_at, details)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16,
                     ?17, ?18, ?19)",
            params![
                issue.workspace_code,
                issue.key,
                issue.issue_type().as_str(),
                issue.title,
                issue.content,
                issue.summary,
                issue.status.as_str(),
                issue.priority.as_str(),
                issue.due_at.map(|t| t.to_rfc3339()),
                issue.story_point,
                issue.current_review_round,
                issue.parent_id,
                issue.created_by,
                issue.started_at.map(|t| t.to_rfc3339()),
                issue.review_requested_at.map(|t| t.to_rfc3339()),
                issue.resolved_at.map(|t| t.to_rfc3339()),
                issue.created_at.to_rfc3339(),
                issue.updated_at.to_rfc3339(),
                details,
            ],
        )?;
        Ok(self.last_insert_rowid())
    }

    /// Persist the issue's own columns. Collections are written by their
    /// dedicated operations.
    pub fn save_issue(&self, issue: &Issue) -> Result<()> {
        let details = serde_json::to_string(&issue.details)?;
        self.conn.execute(
            "UPDATE issues SET title = ?1, content = ?2, summary = ?3, status = ?4,
             priority = ?5, due_at = ?6, story_point = ?7, current_review_round = ?8,
             parent_id = ?9, started_at = ?10, review_requested_at = ?11, resolved_at = ?12,
             updated_at = ?13, details = ?14
             WHERE id = ?15",
            params![
                issue.title,
                issue.content,
                issue.summary,
                issue.status.as_str(),
                issue.priority.as_str(),
                issue.due_at.map(|t| t.to_rfc3339()),
                issue.story_point,
                issue.current_review_round,
                issue.parent_id,
                issue.started_at.map(|t| t.to_rfc3339()),
                issue.review_requested_at.map(|t| t.to_rfc3339()),
                issue.resolved_at.map(|t| t.to_rfc3339()),
                issue.updated_at.to_rfc3339(),
                details,
                issue.id,
            ],
        )?;
        if self.conn.changes() == 0 {
            return Err(Error::IssueNotFound(issue.key.clone()));
        }
        Ok(())
    }

    /// Load the full issue aggregate by workspace and key.
    pub fn get_issue(&self, workspace_code: &str, key: &str) -> Result<Issue> {
        let issue = self
            .conn
            .query_row(
                &format!(
                    "SELECT {ISSUE_COLUMNS} FROM issues WHERE workspace_code = ?1 AND key = ?2"
                ),
                params![workspace_code, key],
                issue_from_row,
            )
            .optional()?
            .ok_or_else(|| Error::IssueNotFound(key.to_string()))?;
        self.load_collections(issue)
    }

    /// Load the full issue aggregate by id.
    pub fn get_issue_by_id(&self, id: i64) -> Result<Issue> {
        let issue = self
            .conn
            .query_row(
                &format!("SELECT {ISSUE_COLUMNS} FROM issues WHERE id = ?1"),
                params![id],
                issue_from_row,
            )
            .optional()?
            .ok_or_else(|| Error::IssueNotFound(format!("#{id}")))?;
        self.load_collections(issue)
    }

    pub fn list_issues(
        &self,
        workspace_code: &str,
        status: Option<Status>,
    ) -> Result<Vec<Issue>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {ISSUE_COLUMNS} FROM issues
             WHERE workspace_code = ?1 AND (?2 IS NULL OR status = ?2)
             ORDER BY id"
        ))?;
        let issues = stmt
            .query_map(
                params![workspace_code, status.map(|s| s.as_str())],
                issue_from_row,
            )?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(issues)
    }

    fn load_collections(&self, mut issue: Issue) -> Result<Issue> {
        issue.child_ids = self.get_child_ids(issue.id)?;
        issue.reviewers = self.get_reviewers(issue.id)?;
        issue.assignees = self.get_assignees(issue.id)?;
        issue.watchers = self.get_watchers(issue.id)?;
        issue.relations = self.get_relations(issue.id)?;
        Ok(issue)
    }

    fn get_child_ids(&self, issue_id: i64) -> Result<Vec<i64>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id FROM issues WHERE parent_id = ?1 ORDER BY id")?;
        let ids = stmt
            .query_map(params![issue_id], |row| row.get(0))?
            .collect::<std::result::Result<Vec<i64>, _>>()?;
        Ok(ids)
    }

    fn get_assignees(&self, issue_id: i64) -> Result<Vec<IssueAssignee>> {
        let mut stmt = self.conn.prepare(
            "SELECT member_id, assigned_at FROM issue_assignees
             WHERE issue_id = ?1 ORDER BY rowid",
        )?;
        let assignees = stmt
            .query_map(params![issue_id], |row| {
                let assigned_str: String = row.get(1)?;
                Ok(IssueAssignee {
                    member_id: row.get(0)?,
                    assigned_at: parse_timestamp(&assigned_str, "assigned_at")?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(assignees)
    }

    pub fn insert_assignee(&self, issue_id: i64, assignee: &IssueAssignee) -> Result<()> {
        self.conn.execute(
            "INSERT INTO issue_assignees (issue_id, member_id, assigned_at) VALUES (?1, ?2, ?3)",
            params![issue_id, assignee.member_id, assignee.assigned_at.to_rfc3339()],
        )?;
        Ok(())
    }

    pub fn delete_assignee(&self, issue_id: i64, member_id: i64) -> Result<()> {
        self.conn.execute(
            "DELETE FROM issue_assignees WHERE issue_id = ?1 AND member_id = ?2",
            params![issue_id, member_id],
        )?;
        Ok(())
    }

    fn get_watchers(&self, issue_id: i64) -> Result<BTreeSet<i64>> {
        let mut stmt = self
            .conn
            .prepare("SELECT member_id FROM issue_watchers WHERE issue_id = ?1")?;
        let ids = stmt
            .query_map(params![issue_id], |row| row.get(0))?
            .collect::<std::result::Result<BTreeSet<i64>, _>>()?;
        Ok(ids)
    }

    pub fn insert_watcher(&self, issue_id: i64, member_id: i64) -> Result<()> {
        self.conn.execute(
            "INSERT OR IGNORE INTO issue_watchers (issue_id, member_id) VALUES (?1, ?2)",
            params![issue_id, member_id],
        )?;
        Ok(())
    }

    pub fn delete_watcher(&self, issue_id: i64, member_id: i64) -> Result<()> {
        self.conn.execute(
            "DELETE FROM issue_watchers WHERE issue_id = ?1 AND member_id = ?2",
            params![issue_id, member_id],
        )?;
        Ok(())
    }

    /// Drop a departing seat from the assignees, watchers and not-yet-reviewing
    /// reviewers of open issues. Returns the number of rows removed.
    pub fn clear_participation(&self, seat_id: i64) -> Result<usize> {
        const OPEN_ISSUES: &str =
            "SELECT id FROM issues WHERE status NOT IN ('done', 'closed', 'deleted')";
        let mut removed = self.conn.execute(
            &format!(
                "DELETE FROM issue_assignees WHERE member_id = ?1 AND issue_id IN ({OPEN_ISSUES})"
            ),
            params![seat_id],
        )?;
        removed += self.conn.execute(
            "DELETE FROM issue_watchers WHERE member_id = ?1",
            params![seat_id],
        )?;
        removed += self.conn.execute(
            &format!(
                "DELETE FROM issue_reviewers WHERE member_id = ?1
                 AND id NOT IN (SELECT issue_reviewer_id FROM reviews)
                 AND issue_id IN ({OPEN_ISSUES})"
            ),
            params![seat_id],
        )?;
        Ok(removed)
    }
}

#[cfg(test)]
#[path = "issues_tests.rs"]
mod tests;
