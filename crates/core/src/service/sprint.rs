// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use chrono::{DateTime, Utc};

use crate::db::Database;
use crate::error::Result;
use crate::event::{Action, Event};
use crate::member::WorkspaceRole;
use crate::sprint::{Sprint, SprintStatus, SprintUpdate};

use super::{require_role, seat_of};

pub struct SprintService<'a> {
    db: &'a mut Database,
}

impl<'a> SprintService<'a> {
    pub fn new(db: &'a mut Database) -> Self {
        SprintService { db }
    }

    /// Plan a sprint. Requires manager or higher.
    pub fn create_sprint(
        &mut self,
        code: &str,
        actor_id: i64,
        title: &str,
        goal: Option<String>,
        start_at: DateTime<Utc>,
        end_at: DateTime<Utc>,
    ) -> Result<Sprint> {
        let sprint = self.db.unit_of_work(|store| {
            let seat = seat_of(store, code, actor_id)?;
            require_role(&seat, WorkspaceRole::Manager)?;
            let mut workspace = store.get_workspace(code)?;

            let mut sprint = Sprint::create(&mut workspace, title, goal, start_at, end_at, Utc::now())?;
            sprint.id = store.insert_sprint(&sprint)?;
            store.save_workspace(&workspace)?;
            Ok(sprint)
        })?;

        tracing::info!(key = %sprint.key, workspace = %code, "sprint created");
        Ok(sprint)
    }

    pub fn get_sprint(&self, code: &str, key: &str, actor_id: i64) -> Result<Sprint> {
        let store = self.db.store();
        seat_of(&store, code, actor_id)?;
        store.get_sprint(code, key)
    }

    pub fn add_issue(&mut self, code: &str, sprint_key: &str, issue_key: &str, actor_id: i64) -> Result<Sprint> {
        self.db.unit_of_work(|store| {
            let seat = seat_of(store, code, actor_id)?;
            require_role(&seat, WorkspaceRole::Collaborator)?;
            let mut sprint = store.get_sprint(code, sprint_key)?;
            let issue = store.get_issue(code, issue_key)?;

            sprint.add_issue(&issue)?;
            store.insert_sprint_issue(sprint.id, issue.id)?;
            store.log_event(
                &Event::new(issue.id, Action::AddedToSprint, Utc::now())
                    .with_values(None, Some(sprint.key.clone()))
                    .by(seat.id),
            )?;
            tracing::info!(sprint = %sprint.key, issue = %issue.key, "issue added to sprint");
            Ok(sprint)
        })
    }

    pub fn remove_issue(&mut self, code: &str, sprint_key: &str, issue_key: &str, actor_id: i64) -> Result<Sprint> {
        self.db.unit_of_work(|store| {
            let seat = seat_of(store, code, actor_id)?;
            require_role(&seat, WorkspaceRole::Collaborator)?;
            let mut sprint = store.get_sprint(code, sprint_key)?;
            let issue = store.get_issue(code, issue_key)?;

            sprint.remove_issue(&issue)?;
            store.delete_sprint_issue(sprint.id, issue.id)?;
            store.log_event(
                &Event::new(issue.id, Action::RemovedFromSprint, Utc::now())
                    .with_values(Some(sprint.key.clone()), None)
                    .by(seat.id),
            )?;
            tracing::info!(sprint = %sprint.key, issue = %issue.key, "issue removed from sprint");
            Ok(sprint)
        })
    }

    /// Edit an open sprint's title, goal or dates. Requires manager or higher.
    pub fn update_sprint(
        &mut self,
        code: &str,
        sprint_key: &str,
        actor_id: i64,
        update: SprintUpdate,
    ) -> Result<Sprint> {
        let sprint = self.db.unit_of_work(|store| {
            let seat = seat_of(store, code, actor_id)?;
            require_role(&seat, WorkspaceRole::Manager)?;
            let mut sprint = store.get_sprint(code, sprint_key)?;
            sprint.update(update)?;
            store.save_sprint(&sprint)?;
            Ok(sprint)
        })?;

        tracing::info!(key = %sprint.key, start = %sprint.start_at, end = %sprint.end_at, "sprint updated");
        Ok(sprint)
    }

    /// Move the sprint to `status` (start, complete or cancel).
    pub fn update_status(
        &mut self,
        code: &str,
        sprint_key: &str,
        actor_id: i64,
        status: SprintStatus,
    ) -> Result<Sprint> {
        let sprint = self.db.unit_of_work(|store| {
            let seat = seat_of(store, code, actor_id)?;
            require_role(&seat, WorkspaceRole::Manager)?;
            let mut sprint = store.get_sprint(code, sprint_key)?;
            sprint.update_status(status)?;
            store.save_sprint(&sprint)?;
            Ok(sprint)
        })?;

        tracing::info!(key = %sprint.key, status = %sprint.status, "sprint status updated");
        Ok(sprint)
    }
}

#[cfg(test)]
#[path = "sprint_tests.rs"]
mod tests;
