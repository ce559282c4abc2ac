// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use crate::error::ErrorKind;
use crate::member::InvitationStatus;
use crate::service::IssueService;
use crate::testing::{join, service_setup, task_draft};

#[test]
fn create_workspace_seats_owner() {
    let (db, code, owner) = service_setup();
    let store = db.store();

    let workspace = store.get_workspace(&code).unwrap();
    assert_eq!(code.len(), 8);
    assert_eq!(workspace.key_prefix, "PROJ");
    assert_eq!(workspace.member_count, 1);

    let seat = store.find_workspace_member(&code, owner).unwrap().unwrap();
    assert_eq!(seat.role, WorkspaceRole::Owner);
    assert_eq!(seat.nickname, "owner");
    assert_eq!(store.get_member(owner).unwrap().owned_workspace_count, 1);
}

#[test]
fn duplicate_login_rejected() {
    let (mut db, _, _) = service_setup();
    let err = WorkspaceService::new(&mut db)
        .register_member("owner", "other@example.com", "Other")
        .unwrap_err();
    assert!(matches!(err, Error::InvalidOperation(_)));
}

#[test]
fn duplicate_email_rejected() {
    let (mut db, _, _) = service_setup();
    let err = WorkspaceService::new(&mut db)
        .register_member("someone_else", "owner@example.com", "Someone")
        .unwrap_err();
    assert!(matches!(&err, Error::InvalidOperation(msg) if msg.contains("owner@example.com")));
    assert_eq!(err.kind(), ErrorKind::InvalidOperation);
}

#[test]
fn duplicate_position_name_rejected() {
    let (mut db, code, owner) = service_setup();
    let mut service = WorkspaceService::new(&mut db);
    service
        .create_position(&code, owner, "Dev", None, Color::Blue)
        .unwrap();

    let err = service
        .create_position(&code, owner, "Dev", None, Color::Red)
        .unwrap_err();
    assert!(matches!(&err, Error::InvalidOperation(msg) if msg.contains("Dev")));
    assert_eq!(err.kind(), ErrorKind::InvalidOperation);

    let other = service.create_workspace(owner, "Other", None, "OTH").unwrap();
    service
        .create_position(&other.code, owner, "Dev", None, Color::Blue)
        .unwrap();
}

#[test]
fn invalid_prefix_creates_nothing() {
    let (mut db, _, owner) = service_setup();
    let mut service = WorkspaceService::new(&mut db);

    assert!(service.create_workspace(owner, "Bad", None, "1").is_err());
    assert_eq!(service.list_workspaces(owner).unwrap().len(), 1);
    assert_eq!(
        db.store().get_member(owner).unwrap().owned_workspace_count,
        1
    );
}

#[test]
fn owned_workspace_limit() {
    let (mut db, _, owner) = service_setup();
    let mut service = WorkspaceService::new(&mut db);
    for n in 1..crate::member::MAX_OWNED_WORKSPACES {
        service
            .create_workspace(owner, &format!("ws{n}"), None, "WS")
            .unwrap();
    }
    let err = service.create_workspace(owner, "one more", None, "WS").unwrap_err();
    assert!(matches!(err, Error::InvalidOperation(_)));
}

#[test]
fn invitation_lifecycle() {
    let (mut db, code, owner) = service_setup();
    let mut service = WorkspaceService::new(&mut db);
    let guest = service
        .register_member("guest", "guest@example.com", "Guest")
        .unwrap();

    let invitation = service.invite(&code, owner, guest.id).unwrap();
    assert!(matches!(
        service.invite(&code, owner, guest.id),
        Err(Error::InvalidOperation(_))
    ));
    assert!(matches!(
        service.accept_invitation(invitation.id, owner),
        Err(Error::Forbidden(_))
    ));

    let seat = service.accept_invitation(invitation.id, guest.id).unwrap();
    assert_eq!(seat.role, WorkspaceRole::Collaborator);
    assert!(service.accept_invitation(invitation.id, guest.id).is_err());
    assert!(matches!(
        service.invite(&code, owner, guest.id),
        Err(Error::InvalidOperation(_))
    ));

    let store = db.store();
    assert_eq!(store.get_workspace(&code).unwrap().member_count, 2);
    assert_eq!(
        store.get_invitation(invitation.id).unwrap().status,
        InvitationStatus::Accepted
    );
}

#[test]
fn rejected_invitation_adds_no_member() {
    let (mut db, code, owner) = service_setup();
    let mut service = WorkspaceService::new(&mut db);
    let guest = service
        .register_member("guest", "guest@example.com", "Guest")
        .unwrap();
    let invitation = service.invite(&code, owner, guest.id).unwrap();

    let invitation = service.reject_invitation(invitation.id, guest.id).unwrap();
    assert_eq!(invitation.status, InvitationStatus::Rejected);
    assert_eq!(service.list_members(&code, owner).unwrap().len(), 1);
}

#[test]
fn collaborator_cannot_invite() {
    let (mut db, code, owner) = service_setup();
    let (collab, _) = join(&mut db, &code, owner, "cole", WorkspaceRole::Collaborator);
    let mut service = WorkspaceService::new(&mut db);
    let guest = service
        .register_member("guest", "guest@example.com", "Guest")
        .unwrap();

    assert!(matches!(
        service.invite(&code, collab, guest.id),
        Err(Error::Forbidden(_))
    ));
}

#[test]
fn role_changes_follow_hierarchy() {
    let (mut db, code, owner) = service_setup();
    let (admin, admin_seat) = join(&mut db, &code, owner, "ada", WorkspaceRole::Admin);
    let (_, collab_seat) = join(&mut db, &code, owner, "cole", WorkspaceRole::Collaborator);
    let mut service = WorkspaceService::new(&mut db);

    let promoted = service
        .update_role(&code, admin, collab_seat, WorkspaceRole::Manager)
        .unwrap();
    assert_eq!(promoted.role, WorkspaceRole::Manager);

    assert!(matches!(
        service.update_role(&code, admin, collab_seat, WorkspaceRole::Owner),
        Err(Error::Forbidden(_))
    ));
    assert!(matches!(
        service.update_role(&code, owner, admin_seat, WorkspaceRole::Owner),
        Err(Error::InvalidOperation(_))
    ));
}

#[test]
fn ownership_transfer_swaps_roles_and_counts() {
    let (mut db, code, owner) = service_setup();
    let (admin, admin_seat) = join(&mut db, &code, owner, "ada", WorkspaceRole::Admin);
    let mut service = WorkspaceService::new(&mut db);

    let new_owner = service.transfer_ownership(&code, owner, admin_seat).unwrap();
    assert_eq!(new_owner.role, WorkspaceRole::Owner);

    let store = db.store();
    let old_seat = store.find_workspace_member(&code, owner).unwrap().unwrap();
    assert_eq!(old_seat.role, WorkspaceRole::Admin);
    assert_eq!(store.get_member(owner).unwrap().owned_workspace_count, 0);
    assert_eq!(store.get_member(admin).unwrap().owned_workspace_count, 1);
}

#[test]
fn position_in_use_cannot_be_deleted() {
    let (mut db, code, owner) = service_setup();
    let (_, seat) = join(&mut db, &code, owner, "cole", WorkspaceRole::Collaborator);
    let mut service = WorkspaceService::new(&mut db);

    let position = service
        .create_position(&code, owner, "Backend", None, Color::Blue)
        .unwrap();
    let member = service
        .assign_position(&code, owner, seat, Some(position.id))
        .unwrap();
    assert_eq!(member.position_id, Some(position.id));

    assert!(matches!(
        service.delete_position(&code, owner, position.id),
        Err(Error::InvalidOperation(_))
    ));

    service.assign_position(&code, owner, seat, None).unwrap();
    service.delete_position(&code, owner, position.id).unwrap();
    assert!(matches!(
        db.store().get_position(position.id),
        Err(Error::PositionNotFound(_))
    ));
}

#[test]
fn foreign_position_is_not_found() {
    let (mut db, code, owner) = service_setup();
    let (_, seat) = join(&mut db, &code, owner, "cole", WorkspaceRole::Collaborator);
    let mut service = WorkspaceService::new(&mut db);
    let other = service.create_workspace(owner, "Other", None, "OTH").unwrap();
    let position = service
        .create_position(&other.code, owner, "Design", None, Color::Red)
        .unwrap();

    assert!(matches!(
        service.assign_position(&code, owner, seat, Some(position.id)),
        Err(Error::PositionNotFound(_))
    ));
}

#[test]
fn update_workspace_needs_admin_and_keeps_old_keys() {
    let (mut db, code, owner) = service_setup();
    let (manager, _) = join(&mut db, &code, owner, "mona", WorkspaceRole::Manager);
    let first = IssueService::new(&mut db)
        .create_issue(&code, owner, task_draft("Before"), None)
        .unwrap();

    let mut service = WorkspaceService::new(&mut db);
    assert!(matches!(
        service.update_workspace(&code, manager, Some("Nope"), None, None),
        Err(Error::Forbidden(_))
    ));
    assert!(matches!(
        service.update_workspace(&code, owner, None, None, Some("x")),
        Err(Error::InvalidValue { .. })
    ));

    let workspace = service
        .update_workspace(&code, owner, Some("Platform"), Some("Core work".to_string()), Some("core"))
        .unwrap();
    assert_eq!(workspace.name, "Platform");
    assert_eq!(workspace.description.as_deref(), Some("Core work"));
    assert_eq!(workspace.key_prefix, "CORE");

    let second = IssueService::new(&mut db)
        .create_issue(&code, owner, task_draft("After"), None)
        .unwrap();
    assert_eq!(first.key, "PROJ-1");
    assert_eq!(second.key, "CORE-2");
    assert!(db.store().get_issue(&code, "PROJ-1").is_ok());
}

#[test]
fn remove_member_vacates_seat_and_open_work() {
    let (mut db, code, owner) = service_setup();
    let (manager, manager_seat) = join(&mut db, &code, owner, "mona", WorkspaceRole::Manager);
    let (cole, cole_seat) = join(&mut db, &code, owner, "cole", WorkspaceRole::Collaborator);

    let key = IssueService::new(&mut db)
        .create_issue(&code, owner, task_draft("Open work"), None)
        .unwrap()
        .key;
    let mut issues = IssueService::new(&mut db);
    issues.add_assignee(&code, &key, owner, cole_seat).unwrap();
    issues.watch(&code, &key, cole).unwrap();

    let mut service = WorkspaceService::new(&mut db);
    assert!(matches!(
        service.remove_member(&code, cole, manager_seat),
        Err(Error::Forbidden(_))
    ));
    let removed = service.remove_member(&code, manager, cole_seat).unwrap();
    assert!(removed.removed_at.is_some());
    assert!(matches!(
        service.remove_member(&code, manager, cole_seat),
        Err(Error::MemberNotFound(_))
    ));
    assert!(matches!(
        service.get_workspace(&code, cole),
        Err(Error::Forbidden(_))
    ));

    let store = db.store();
    assert_eq!(store.get_workspace(&code).unwrap().member_count, 2);
    let issue = store.get_issue(&code, &key).unwrap();
    assert!(issue.assignees.is_empty());
    assert!(issue.watchers.is_empty());
    assert!(store.list_workspaces_for_member(cole).unwrap().is_empty());
}

#[test]
fn removed_seat_cannot_be_assigned() {
    let (mut db, code, owner) = service_setup();
    let (_, cole_seat) = join(&mut db, &code, owner, "cole", WorkspaceRole::Collaborator);
    WorkspaceService::new(&mut db)
        .remove_member(&code, owner, cole_seat)
        .unwrap();

    let mut issues = IssueService::new(&mut db);
    let key = issues.create_issue(&code, owner, task_draft("Later"), None).unwrap().key;
    assert!(matches!(
        issues.add_assignee(&code, &key, owner, cole_seat),
        Err(Error::MemberNotFound(_))
    ));
    assert!(matches!(
        WorkspaceService::new(&mut db).update_role(&code, owner, cole_seat, WorkspaceRole::Manager),
        Err(Error::MemberNotFound(_))
    ));
}

#[test]
fn leave_and_rejoin_by_invitation() {
    let (mut db, code, owner) = service_setup();
    let (cole, cole_seat) = join(&mut db, &code, owner, "cole", WorkspaceRole::Manager);
    let mut service = WorkspaceService::new(&mut db);

    assert!(matches!(
        service.leave_workspace(&code, owner),
        Err(Error::InvalidOperation(_))
    ));
    service.leave_workspace(&code, cole).unwrap();
    assert_eq!(service.list_members(&code, owner).unwrap().len(), 1);

    let invitation = service.invite(&code, owner, cole).unwrap();
    let seat = service.accept_invitation(invitation.id, cole).unwrap();
    assert_eq!(seat.id, cole_seat);
    assert_eq!(seat.role, WorkspaceRole::Collaborator);
    assert!(seat.is_active());
    assert_eq!(db.store().get_workspace(&code).unwrap().member_count, 2);
}

#[test]
fn nickname_must_be_unique_in_workspace() {
    let (mut db, code, owner) = service_setup();
    let (cole, _) = join(&mut db, &code, owner, "cole", WorkspaceRole::Collaborator);
    let mut service = WorkspaceService::new(&mut db);

    let seat = service.update_nickname(&code, cole, "  coco ").unwrap();
    assert_eq!(seat.nickname, "coco");
    assert!(matches!(
        service.update_nickname(&code, owner, "coco"),
        Err(Error::InvalidOperation(_))
    ));
    assert!(matches!(
        service.update_nickname(&code, owner, ""),
        Err(Error::InvalidOperation(_))
    ));
    service.update_nickname(&code, cole, "coco").unwrap();
}
