// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Fixtures shared by the domain unit tests.

#![allow(clippy::unwrap_used)]

use chrono::{DateTime, TimeZone, Utc};
use std::collections::BTreeSet;

use crate::issue::{BugSeverity, Issue, IssueDetails, IssueDraft, IssueType};
use crate::member::{WorkspaceMember, WorkspaceRole};
use crate::workspace::Workspace;

pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap()
}

pub fn workspace() -> Workspace {
    Workspace::new("ABCD1234", "Demo", None, "PROJ", now()).unwrap()
}

pub fn other_workspace() -> Workspace {
    Workspace::new("FFFF0000", "Other", None, "OTH", now()).unwrap()
}

/// A workspace member with the given id, role collaborator.
pub fn member(ws: &Workspace, id: i64) -> WorkspaceMember {
    let mut m = WorkspaceMember::new(id, ws.code.clone(), format!("member{id}"), now());
    m.id = id;
    m.role = WorkspaceRole::Collaborator;
    m
}

pub fn issue(ws: &mut Workspace, issue_type: IssueType) -> Issue {
    let mut issue = Issue::create(
        ws,
        IssueDraft::new(format!("{issue_type} issue"), IssueDetails::empty(issue_type)),
        Some(1),
        now(),
    );
    issue.id = ws.next_issue_number as i64 - 1;
    issue
}

pub fn bug(ws: &mut Workspace, severity: BugSeverity) -> Issue {
    let details = IssueDetails::Bug {
        reproducing_steps: "click it".into(),
        severity,
        affected_versions: BTreeSet::new(),
        difficulty: None,
    };
    let mut issue = Issue::create(ws, IssueDraft::new("bug", details), Some(1), now());
    issue.id = ws.next_issue_number as i64 - 1;
    issue
}

/// An issue already moved to in-progress.
pub fn started(ws: &mut Workspace, issue_type: IssueType) -> Issue {
    let mut issue = issue(ws, issue_type);
    issue.update_status(crate::Status::InProgress, now()).unwrap();
    issue
}

/// Store a member with a seat in `ws`, returning the seat.
pub fn seat(store: &crate::db::Store<'_>, ws: &Workspace, login: &str) -> WorkspaceMember {
    let member = crate::member::Member::new(login, format!("{login}@example.com"), login, now());
    let member_id = store.insert_member(&member).unwrap();
    let mut wm = WorkspaceMember::new(member_id, ws.code.clone(), login, now());
    wm.id = store.insert_workspace_member(&wm).unwrap();
    wm
}

/// Store the demo workspace with one owner seat.
pub fn seeded(db: &crate::db::Database) -> (Workspace, WorkspaceMember) {
    let store = db.store();
    let mut ws = workspace();
    ws.id = store.insert_workspace(&ws).unwrap();
    let mut owner = seat(&store, &ws, "owner");
    owner.role = WorkspaceRole::Owner;
    store.save_workspace_member(&owner).unwrap();
    (ws, owner)
}

/// Create and store an issue authored by `author`.
pub fn stored_issue(
    store: &crate::db::Store<'_>,
    ws: &mut Workspace,
    issue_type: IssueType,
    author: &WorkspaceMember,
) -> Issue {
    let mut issue = Issue::create(
        ws,
        IssueDraft::new(format!("{issue_type} issue"), IssueDetails::empty(issue_type)),
        Some(author.id),
        now(),
    );
    issue.id = store.insert_issue(&issue).unwrap();
    store.save_workspace(ws).unwrap();
    issue
}

/// A database holding one workspace created through the service layer.
/// Returns the workspace code and the owner's member id.
pub fn service_setup() -> (crate::db::Database, String, i64) {
    let mut db = crate::db::Database::open_in_memory().unwrap();
    let mut service = crate::service::WorkspaceService::new(&mut db);
    let owner = service
        .register_member("owner", "owner@example.com", "Owner")
        .unwrap();
    let ws = service
        .create_workspace(owner.id, "Demo", None, "PROJ")
        .unwrap();
    (db, ws.code, owner.id)
}

/// Register `login`, have the owner invite them, accept, and set `role`.
/// Returns `(member id, seat id)`.
pub fn join(
    db: &mut crate::db::Database,
    code: &str,
    owner_id: i64,
    login: &str,
    role: WorkspaceRole,
) -> (i64, i64) {
    let mut service = crate::service::WorkspaceService::new(db);
    let member = service
        .register_member(login, format!("{login}@example.com").as_str(), login)
        .unwrap();
    let invitation = service.invite(code, owner_id, member.id).unwrap();
    let mut seat = service.accept_invitation(invitation.id, member.id).unwrap();
    seat.role = role;
    db.store().save_workspace_member(&seat).unwrap();
    (member.id, seat.id)
}

/// A task draft titled `title`.
pub fn task_draft(title: &str) -> IssueDraft {
    IssueDraft::new(title, IssueDetails::empty(IssueType::Task))
}
