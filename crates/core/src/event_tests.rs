// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use crate::testing::now;
use yare::parameterized;

#[parameterized(
    created = { Action::Created },
    status_changed = { Action::StatusChanged },
    review_requested = { Action::ReviewRequested },
    parent_removed = { Action::ParentRemoved },
    review_edited = { Action::ReviewEdited },
    comment_deleted = { Action::CommentDeleted },
    removed_from_sprint = { Action::RemovedFromSprint },
)]
fn action_parses_its_own_name(action: Action) {
    assert_eq!(action.as_str().parse::<Action>().unwrap(), action);
}

#[test]
fn action_unknown_is_invalid_input() {
    let err = "labeled".parse::<Action>().unwrap_err();
    assert_eq!(err.kind(), crate::ErrorKind::InvalidInput);
}

#[test]
fn event_builder() {
    let event = Event::new(3, Action::StatusChanged, now())
        .with_values(Some("todo".into()), Some("in_progress".into()))
        .by(7);
    assert_eq!(event.issue_id, 3);
    assert_eq!(event.actor_id, Some(7));
    assert_eq!(event.old_value.as_deref(), Some("todo"));
    assert_eq!(event.new_value.as_deref(), Some("in_progress"));
    assert_eq!(event.created_at, now());
}
