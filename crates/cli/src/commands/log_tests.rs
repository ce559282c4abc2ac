// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use crate::commands::issue;
use crate::commands::testing::TestContext;
use crate::error::Error;

#[test]
fn issue_log_runs() {
    let mut t = TestContext::new();
    let key = t.create_issue("Task");
    issue::status(&mut t.ctx, &key, "in_progress").unwrap();
    run(&mut t.ctx, Some(&key), 20).unwrap();
}

#[test]
fn workspace_log_runs() {
    let mut t = TestContext::new();
    t.create_issue("A");
    t.create_issue("B");
    run(&mut t.ctx, None, 1).unwrap();
}

#[test]
fn missing_issue_is_not_found() {
    let mut t = TestContext::new();
    let err = run(&mut t.ctx, Some("PROJ-42"), 20).unwrap_err();
    assert!(matches!(
        err,
        Error::Core(stint_core::Error::IssueNotFound(_))
    ));
}

#[test]
fn outsider_cannot_read_log() {
    let mut t = TestContext::new();
    t.create_issue("A");
    stint_core::WorkspaceService::new(&mut t.ctx.db)
        .register_member("eve", "eve@example.com", "eve")
        .unwrap();
    t.act_as("eve");

    let err = run(&mut t.ctx, None, 20).unwrap_err();
    assert!(matches!(err, Error::Core(stint_core::Error::Forbidden(_))));
}
