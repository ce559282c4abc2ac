// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

//! Test infrastructure for command testing without process execution.
//!
//! `TestContext` wraps a [`Context`] over an in-memory database holding one
//! workspace (`PROJ` prefix) owned by the member `owner`, who is the actor
//! by default.

use stint_core::{
    Database, IssueDetails, IssueDraft, IssueService, IssueType, WorkspaceRole, WorkspaceService,
};
use tempfile::TempDir;

use super::{Context, Globals};
use crate::config::Config;

pub struct TestContext {
    pub ctx: Context,
    pub code: String,
    _temp_dir: TempDir, // Keep alive for duration of test
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl TestContext {
    pub fn new() -> Self {
        let mut db = Database::open_in_memory().expect("Failed to create in-memory database");
        let mut service = WorkspaceService::new(&mut db);
        let owner = service
            .register_member("owner", "owner@example.com", "Owner")
            .unwrap();
        let workspace = service
            .create_workspace(owner.id, "Demo", None, "PROJ")
            .unwrap();

        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let config = Config {
            actor: Some("owner".into()),
            default_workspace: Some(workspace.code.clone()),
            ..Config::default()
        };
        TestContext {
            ctx: Context {
                db,
                config,
                data_dir: temp_dir.path().to_path_buf(),
                globals: Globals::default(),
            },
            code: workspace.code,
            _temp_dir: temp_dir,
        }
    }

    /// Register `login` and seat them in the workspace with `role`.
    pub fn add_member(&mut self, login: &str, role: WorkspaceRole) -> i64 {
        let owner = self.ctx.actor().unwrap().id;
        let mut service = WorkspaceService::new(&mut self.ctx.db);
        let member = service
            .register_member(login, &format!("{login}@example.com"), login)
            .unwrap();
        let invitation = service.invite(&self.code, owner, member.id).unwrap();
        let mut seat = service.accept_invitation(invitation.id, member.id).unwrap();
        seat.role = role;
        self.ctx.db.store().save_workspace_member(&seat).unwrap();
        seat.id
    }

    /// Run subsequent commands as `login`.
    pub fn act_as(&mut self, login: &str) {
        self.ctx.globals.actor = Some(login.to_string());
    }

    /// Create a task as the current actor and return its key.
    pub fn create_issue(&mut self, title: &str) -> String {
        self.create_typed(IssueType::Task, title)
    }

    pub fn create_typed(&mut self, issue_type: IssueType, title: &str) -> String {
        let actor = self.ctx.actor().unwrap().id;
        IssueService::new(&mut self.ctx.db)
            .create_issue(
                &self.code,
                actor,
                IssueDraft::new(title, IssueDetails::empty(issue_type)),
                None,
            )
            .unwrap()
            .key
    }

    pub fn issue(&self, key: &str) -> stint_core::Issue {
        self.ctx.db.store().get_issue(&self.code, key).unwrap()
    }
}
