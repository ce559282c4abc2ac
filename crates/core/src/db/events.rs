// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use rusqlite::{params, Row};

use crate::error::Result;
use crate::event::Event;

use super::{parse_db, parse_timestamp, Store};

fn event_from_row(row: &Row<'_>) -> rusqlite::Result<Event> {
    let action_str: String = row.get(3)?;
    let created_str: String = row.get(6)?;
    Ok(Event {
        id: row.get(0)?,
        issue_id: row.get(1)?,
        actor_id: row.get(2)?,
        action: parse_db(&action_str, "action")?,
        old_value: row.get(4)?,
        new_value: row.get(5)?,
        created_at: parse_timestamp(&created_str, "created_at")?,
    })
}

impl Store<'_> {
    /// Log an event to the audit trail.
    pub fn log_event(&self, event: &Event) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO events (issue_id, actor_id, action, old_value, new_value, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                event.issue_id,
                event.actor_id,
                event.action.as_str(),
                event.old_value,
                event.new_value,
                event.created_at.to_rfc3339(),
            ],
        )?;
        Ok(self.last_insert_rowid())
    }

    /// All events for an issue, oldest first.
    pub fn get_events(&self, issue_id: i64) -> Result<Vec<Event>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, issue_id, actor_id, action, old_value, new_value, created_at
             FROM events WHERE issue_id = ?1 ORDER BY id",
        )?;
        let events = stmt
            .query_map(params![issue_id], event_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(events)
    }

    /// Most recent events across a workspace, newest first.
    pub fn get_recent_events(&self, workspace_code: &str, limit: usize) -> Result<Vec<Event>> {
        let limit_i64 = i64::try_from(limit).unwrap_or(i64::MAX);
        let mut stmt = self.conn.prepare(
            "SELECT e.id, e.issue_id, e.actor_id, e.action, e.old_value, e.new_value, e.created_at
             FROM events e JOIN issues i ON i.id = e.issue_id
             WHERE i.workspace_code = ?1 ORDER BY e.id DESC LIMIT ?2",
        )?;
        let events = stmt
            .query_map(params![workspace_code, limit_i64], event_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(events)
    }
}

#[cfg(test)]
#[path = "events_tests.rs"]
mod tests;
