// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use crate::commands::member;
use crate::commands::testing::TestContext;
use crate::error::Error;
use stint_core::WorkspaceRole;

#[test]
fn create_then_delete() {
    let mut t = TestContext::new();
    create(&mut t.ctx, "Backend", "blue", None).unwrap();
    let position = t.ctx.db.store().get_position(1).unwrap();
    assert_eq!(position.color, Color::Blue);

    delete(&mut t.ctx, position.id).unwrap();
    assert!(t.ctx.db.store().get_position(position.id).is_err());
}

#[test]
fn unknown_color_is_invalid_input() {
    let mut t = TestContext::new();
    let err = create(&mut t.ctx, "Backend", "teal", None).unwrap_err();
    assert_eq!(err.exit_code(), 2);
}

#[test]
fn held_position_cannot_be_deleted() {
    let mut t = TestContext::new();
    t.add_member("bob", WorkspaceRole::Collaborator);
    create(&mut t.ctx, "Backend", "green", None).unwrap();
    member::position(&mut t.ctx, "bob", Some(1)).unwrap();

    let err = delete(&mut t.ctx, 1).unwrap_err();
    assert!(matches!(
        err,
        Error::Core(stint_core::Error::InvalidOperation(_))
    ));
}

#[test]
fn collaborator_cannot_create() {
    let mut t = TestContext::new();
    t.add_member("bob", WorkspaceRole::Collaborator);
    t.act_as("bob");

    let err = create(&mut t.ctx, "Backend", "red", None).unwrap_err();
    assert!(matches!(err, Error::Core(stint_core::Error::Forbidden(_))));
}
