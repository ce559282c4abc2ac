// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use crate::testing::{member, now, other_workspace, workspace};
use yare::parameterized;

fn seat(id: i64, role: WorkspaceRole) -> WorkspaceMember {
    let mut m = member(&workspace(), id);
    m.role = role;
    m
}

#[parameterized(
    owner_over_admin = { WorkspaceRole::Owner, WorkspaceRole::Admin, true },
    admin_over_manager = { WorkspaceRole::Admin, WorkspaceRole::Manager, true },
    manager_equal = { WorkspaceRole::Manager, WorkspaceRole::Manager, true },
    collaborator_under_manager = { WorkspaceRole::Collaborator, WorkspaceRole::Manager, false },
    viewer_under_collaborator = { WorkspaceRole::Viewer, WorkspaceRole::Collaborator, false },
)]
fn role_ordering(role: WorkspaceRole, other: WorkspaceRole, at_least: bool) {
    assert_eq!(role.is_at_least(other), at_least);
}

#[parameterized(
    owner = { "OWNER", WorkspaceRole::Owner },
    viewer = { "viewer", WorkspaceRole::Viewer },
)]
fn role_from_str(input: &str, expected: WorkspaceRole) {
    assert_eq!(input.parse::<WorkspaceRole>().unwrap(), expected);
}

#[test]
fn update_role_rejects_owner() {
    let mut m = seat(2, WorkspaceRole::Collaborator);
    assert!(m.update_role(WorkspaceRole::Owner).is_err());
    m.update_role(WorkspaceRole::Manager).unwrap();
    assert_eq!(m.role, WorkspaceRole::Manager);
}

#[test]
fn update_role_of_owner_rejected() {
    let mut owner = seat(1, WorkspaceRole::Owner);
    assert!(owner.update_role(WorkspaceRole::Viewer).is_err());
}

#[test]
fn role_change_permissions() {
    let admin = seat(1, WorkspaceRole::Admin);
    let manager = seat(2, WorkspaceRole::Manager);
    let collaborator = seat(3, WorkspaceRole::Collaborator);

    assert!(admin
        .validate_can_change_role(&collaborator, WorkspaceRole::Manager)
        .is_ok());
    assert!(admin
        .validate_can_change_role(&collaborator, WorkspaceRole::Admin)
        .is_ok());
    assert!(manager
        .validate_can_change_role(&collaborator, WorkspaceRole::Viewer)
        .is_err());
    assert!(admin
        .validate_can_change_role(&seat(4, WorkspaceRole::Admin), WorkspaceRole::Viewer)
        .is_err());
}

#[test]
fn transfer_ownership_swaps_roles_and_counts() {
    let mut owner = seat(1, WorkspaceRole::Owner);
    let mut target = seat(2, WorkspaceRole::Manager);
    let mut owner_member = Member::new("alice", "alice@example.com", "Alice", now());
    owner_member.owned_workspace_count = 1;
    let mut target_member = Member::new("bob", "bob@example.com", "Bob", now());

    owner
        .transfer_ownership(&mut owner_member, &mut target, &mut target_member)
        .unwrap();

    assert_eq!(owner.role, WorkspaceRole::Admin);
    assert_eq!(target.role, WorkspaceRole::Owner);
    assert_eq!(owner_member.owned_workspace_count, 0);
    assert_eq!(target_member.owned_workspace_count, 1);
}

#[test]
fn transfer_ownership_respects_owned_limit() {
    let mut owner = seat(1, WorkspaceRole::Owner);
    let mut target = seat(2, WorkspaceRole::Admin);
    let mut owner_member = Member::new("alice", "a@example.com", "Alice", now());
    let mut target_member = Member::new("bob", "b@example.com", "Bob", now());
    target_member.owned_workspace_count = MAX_OWNED_WORKSPACES;

    assert!(owner
        .transfer_ownership(&mut owner_member, &mut target, &mut target_member)
        .is_err());
    assert_eq!(owner.role, WorkspaceRole::Owner);
    assert_eq!(target.role, WorkspaceRole::Admin);
}

#[test]
fn transfer_ownership_requires_owner() {
    let mut admin = seat(1, WorkspaceRole::Admin);
    let mut target = seat(2, WorkspaceRole::Viewer);
    let mut a = Member::new("a", "a@example.com", "A", now());
    let mut b = Member::new("b", "b@example.com", "B", now());
    assert!(matches!(
        admin.transfer_ownership(&mut a, &mut target, &mut b),
        Err(Error::Forbidden(_))
    ));
}

#[test]
fn position_must_belong_to_workspace() {
    let ws = workspace();
    let other = other_workspace();
    let mut m = member(&ws, 3);
    let foreign = Position {
        id: 8,
        workspace_code: other.code.clone(),
        name: "Design".into(),
        description: None,
        color: Color::Blue,
    };
    assert!(matches!(
        m.change_position(Some(&foreign)),
        Err(Error::PositionNotFound(8))
    ));

    let local = Position {
        workspace_code: ws.code.clone(),
        ..foreign
    };
    m.change_position(Some(&local)).unwrap();
    assert_eq!(m.position_id, Some(8));
    m.change_position(None).unwrap();
    assert_eq!(m.position_id, None);
}

#[test]
fn invitation_can_only_be_answered_once() {
    let mut inv = Invitation::new("ABCD1234", 4, now());
    inv.accept().unwrap();
    assert_eq!(inv.status, InvitationStatus::Accepted);
    assert!(inv.reject().is_err());
    assert!(inv.accept().is_err());
}

#[test]
fn owned_workspace_limit() {
    let mut m = Member::new("alice", "alice@example.com", "Alice", now());
    for _ in 0..MAX_OWNED_WORKSPACES {
        m.increase_owned_workspace_count().unwrap();
    }
    assert!(m.increase_owned_workspace_count().is_err());
}

#[parameterized(
    manager_removes_collaborator = { WorkspaceRole::Manager, WorkspaceRole::Collaborator, true },
    admin_removes_manager = { WorkspaceRole::Admin, WorkspaceRole::Manager, true },
    manager_cannot_remove_manager = { WorkspaceRole::Manager, WorkspaceRole::Manager, false },
    collaborator_cannot_remove_viewer = { WorkspaceRole::Collaborator, WorkspaceRole::Viewer, false },
    admin_cannot_remove_owner = { WorkspaceRole::Admin, WorkspaceRole::Owner, false },
)]
fn removal_needs_higher_rank(actor: WorkspaceRole, target: WorkspaceRole, allowed: bool) {
    let result = seat(1, actor).validate_can_remove(&seat(2, target));
    assert_eq!(result.is_ok(), allowed);
    if !allowed {
        assert!(matches!(result, Err(Error::Forbidden(_))));
    }
}

#[test]
fn cannot_remove_own_seat() {
    let admin = seat(1, WorkspaceRole::Admin);
    assert!(matches!(
        admin.validate_can_remove(&admin),
        Err(Error::InvalidOperation(_))
    ));
}

#[test]
fn remove_decreases_member_count_and_clears_position() {
    let mut ws = workspace();
    ws.member_count = 2;
    let mut m = seat(2, WorkspaceRole::Collaborator);
    m.position_id = Some(7);

    m.remove(&mut ws, now()).unwrap();

    assert!(!m.is_active());
    assert_eq!(m.position_id, None);
    assert_eq!(ws.member_count, 1);
    assert!(m.remove(&mut ws, now()).is_err());
    assert_eq!(ws.member_count, 1);
}

#[test]
fn owner_cannot_leave() {
    let mut ws = workspace();
    ws.member_count = 1;
    let mut owner = seat(1, WorkspaceRole::Owner);
    assert!(matches!(
        owner.remove(&mut ws, now()),
        Err(Error::InvalidOperation(_))
    ));
    assert_eq!(ws.member_count, 1);
}

#[test]
fn rejoin_resets_seat() {
    let mut ws = workspace();
    ws.member_count = 2;
    let mut m = seat(2, WorkspaceRole::Manager);
    m.remove(&mut ws, now()).unwrap();

    m.rejoin(&mut ws, now()).unwrap();
    assert!(m.is_active());
    assert_eq!(m.role, WorkspaceRole::Collaborator);
    assert_eq!(ws.member_count, 2);
}

#[test]
fn nickname_is_trimmed_and_required() {
    let mut m = seat(2, WorkspaceRole::Collaborator);
    m.update_nickname("  Cole ").unwrap();
    assert_eq!(m.nickname, "Cole");
    assert!(m.update_nickname("   ").is_err());
    assert_eq!(m.nickname, "Cole");
}
