// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use crate::db::Database;
use crate::event::Action;
use crate::issue::IssueType;
use crate::testing::{now, seeded, stored_issue};

#[test]
fn events_are_returned_in_order() {
    let db = Database::open_in_memory().unwrap();
    let (mut ws, owner) = seeded(&db);
    let store = db.store();
    let issue = stored_issue(&store, &mut ws, IssueType::Task, &owner);

    store
        .log_event(&Event::new(issue.id, Action::Created, now()).by(owner.id))
        .unwrap();
    store
        .log_event(
            &Event::new(issue.id, Action::StatusChanged, now())
                .with_values(Some("todo".into()), Some("in_progress".into())),
        )
        .unwrap();

    let events = store.get_events(issue.id).unwrap();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].action, Action::Created);
    assert_eq!(events[0].actor_id, Some(owner.id));
    assert_eq!(events[1].new_value.as_deref(), Some("in_progress"));
}

#[test]
fn recent_events_are_newest_first_and_limited() {
    let db = Database::open_in_memory().unwrap();
    let (mut ws, owner) = seeded(&db);
    let store = db.store();
    let a = stored_issue(&store, &mut ws, IssueType::Task, &owner);
    let b = stored_issue(&store, &mut ws, IssueType::Task, &owner);
    for issue in [&a, &b, &a] {
        store
            .log_event(&Event::new(issue.id, Action::Watched, now()))
            .unwrap();
    }

    let recent = store.get_recent_events(&ws.code, 2).unwrap();
    assert_eq!(recent.len(), 2);
    assert_eq!(recent[0].issue_id, a.id);
    assert_eq!(recent[1].issue_id, b.id);
}
