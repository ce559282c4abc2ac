// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use rusqlite::{params, OptionalExtension};

use crate::error::{Error, Result};
use crate::sprint::Sprint;

use super::{parse_db, parse_timestamp, Store};

impl Store<'_> {
    pub fn insert_sprint(&self, sprint: &Sprint) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO sprints (workspace_code, key, title, goal, start_at, end_at, status,
             created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                sprint.workspace_code,
                sprint.key,
                sprint.title,
                sprint.goal,
                sprint.start_at.to_rfc3339(),
                sprint.end_at.to_rfc3339(),
                sprint.status.as_str(),
                sprint.created_at.to_rfc3339(),
            ],
        )?;
        Ok(self.last_insert_rowid())
    }

    pub fn get_sprint(&self, workspace_code: &str, key: &str) -> Result<Sprint> {
        let mut sprint = self
            .conn
            .query_row(
                "SELECT id, workspace_code, key, title, goal, start_at, end_at, status, created_at
                 FROM sprints WHERE workspace_code = ?1 AND key = ?2",
                params![workspace_code, key],
                |row| {
                    let start_str: String = row.get(5)?;
                    let end_str: String = row.get(6)?;
                    let status_str: String = row.get(7)?;
                    let created_str: String = row.get(8)?;
                    Ok(Sprint {
                        id: row.get(0)?,
                        workspace_code: row.get(1)?,
                        key: row.get(2)?,
                        title: row.get(3)?,
                        goal: row.get(4)?,
                        start_at: parse_timestamp(&start_str, "start_at")?,
                        end_at: parse_timestamp(&end_str, "end_at")?,
                        status: parse_db(&status_str, "status")?,
                        issue_ids: Vec::new(),
                        created_at: parse_timestamp(&created_str, "created_at")?,
                    })
                },
            )
            .optional()?
            .ok_or_else(|| Error::SprintNotFound(key.to_string()))?;

        let mut stmt = self
            .conn
            .prepare("SELECT issue_id FROM sprint_issues WHERE sprint_id = ?1 ORDER BY rowid")?;
        sprint.issue_ids = stmt
            .query_map(params![sprint.id], |row| row.get(0))?
            .collect::<std::result::Result<Vec<i64>, _>>()?;
        Ok(sprint)
    }

    pub fn save_sprint(&self, sprint: &Sprint) -> Result<()> {
        self.conn.execute(
            "UPDATE sprints SET title = ?1, goal = ?2, start_at = ?3, end_at = ?4, status = ?5
             WHERE id = ?6",
            params![
                sprint.title,
                sprint.goal,
                sprint.start_at.to_rfc3339(),
                sprint.end_at.to_rfc3339(),
                sprint.status.as_str(),
                sprint.id,
            ],
        )?;
        if self.conn.changes() == 0 {
            return Err(Error::SprintNotFound(sprint.key.clone()));
        }
        Ok(())
    }

    pub fn insert_sprint_issue(&self, sprint_id: i64, issue_id: i64) -> Result<()> {
        self.conn.execute(
            "INSERT INTO sprint_issues (sprint_id, issue_id) VALUES (?1, ?2)",
            params![sprint_id, issue_id],
        )?;
        Ok(())
    }

    pub fn delete_sprint_issue(&self, sprint_id: i64, issue_id: i64) -> Result<()> {
        self.conn.execute(
            "DELETE FROM sprint_issues WHERE sprint_id = ?1 AND issue_id = ?2",
            params![sprint_id, issue_id],
        )?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "sprints_tests.rs"]
mod tests;
