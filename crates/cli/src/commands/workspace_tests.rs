// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use crate::commands::testing::TestContext;
use crate::config::Config;
use crate::error::Error;

#[test]
fn create_keeps_existing_default() {
    let mut t = TestContext::new();
    create(&mut t.ctx, "Second", "SEC", None).unwrap();

    assert_eq!(t.ctx.config.default_workspace.as_deref(), Some(t.code.as_str()));
    let workspaces = t.ctx.db.store().list_workspaces_for_member(t.ctx.actor().unwrap().id).unwrap();
    assert_eq!(workspaces.len(), 2);
}

#[test]
fn use_switches_default_and_saves() {
    let mut t = TestContext::new();
    let owner = t.ctx.actor().unwrap().id;
    let second = WorkspaceService::new(&mut t.ctx.db)
        .create_workspace(owner, "Second", None, "SEC")
        .unwrap();

    use_workspace(&mut t.ctx, &second.code).unwrap();

    let saved = Config::load(&t.ctx.data_dir).unwrap();
    assert_eq!(saved.default_workspace, Some(second.code));
}

#[test]
fn use_requires_membership() {
    let mut t = TestContext::new();
    t.add_member("bob", stint_core::WorkspaceRole::Collaborator);
    let bob = t.ctx.db.store().get_member_by_login("bob").unwrap();
    let foreign = WorkspaceService::new(&mut t.ctx.db)
        .create_workspace(bob.id, "Bob's", None, "BOB")
        .unwrap();

    let err = use_workspace(&mut t.ctx, &foreign.code).unwrap_err();
    assert!(matches!(err, Error::Core(stint_core::Error::Forbidden(_))));
}

#[test]
fn show_without_workspace_fails() {
    let mut t = TestContext::new();
    t.ctx.config.default_workspace = None;
    assert!(matches!(show(&mut t.ctx), Err(Error::NoWorkspace)));
}

#[test]
fn edit_changes_prefix_for_new_issues() {
    let mut t = TestContext::new();
    let first = t.create_issue("Before");

    edit(&mut t.ctx, Some("Core"), None, Some("core")).unwrap();
    let second = t.create_issue("After");

    let workspace = t.ctx.db.store().get_workspace(&t.code).unwrap();
    assert_eq!(workspace.name, "Core");
    assert_eq!(workspace.key_prefix, "CORE");
    assert_eq!((first.as_str(), second.as_str()), ("PROJ-1", "CORE-2"));
}

#[test]
fn collaborator_cannot_edit() {
    let mut t = TestContext::new();
    t.add_member("bob", stint_core::WorkspaceRole::Collaborator);
    t.act_as("bob");

    let err = edit(&mut t.ctx, Some("Mine"), None, None).unwrap_err();
    assert!(matches!(err, Error::Core(stint_core::Error::Forbidden(_))));
}
