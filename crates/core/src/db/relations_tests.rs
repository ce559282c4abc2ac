// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use crate::db::Database;
use crate::issue::{IssueType, Status};
use crate::testing::{now, seeded, stored_issue};

#[test]
fn relation_pair_loads_on_both_issues() {
    let db = Database::open_in_memory().unwrap();
    let (mut ws, owner) = seeded(&db);
    let store = db.store();
    let a = stored_issue(&store, &mut ws, IssueType::Task, &owner);
    let b = stored_issue(&store, &mut ws, IssueType::Task, &owner);

    store
        .insert_relation_pair(a.id, b.id, RelationType::Blocks, now())
        .unwrap();

    let a = store.get_issue_by_id(a.id).unwrap();
    let b = store.get_issue_by_id(b.id).unwrap();
    assert_eq!(a.relations[0].relation_type, RelationType::Blocks);
    assert_eq!(a.relations[0].other_key, b.key);
    assert_eq!(b.relations[0].relation_type, RelationType::BlockedBy);
    assert_eq!(b.relations[0].other_status, Status::Todo);
    assert!(b.is_blocked_by(a.id));
}

#[test]
fn duplicate_pair_rejected_by_schema() {
    let db = Database::open_in_memory().unwrap();
    let (mut ws, owner) = seeded(&db);
    let store = db.store();
    let a = stored_issue(&store, &mut ws, IssueType::Task, &owner);
    let b = stored_issue(&store, &mut ws, IssueType::Task, &owner);

    store
        .insert_relation_pair(a.id, b.id, RelationType::Relevant, now())
        .unwrap();
    assert!(store
        .insert_relation_pair(b.id, a.id, RelationType::Relevant, now())
        .is_err());
}

#[test]
fn delete_pair_removes_both_rows() {
    let db = Database::open_in_memory().unwrap();
    let (mut ws, owner) = seeded(&db);
    let store = db.store();
    let a = stored_issue(&store, &mut ws, IssueType::Task, &owner);
    let b = stored_issue(&store, &mut ws, IssueType::Task, &owner);
    store
        .insert_relation_pair(a.id, b.id, RelationType::Causes, now())
        .unwrap();

    store.delete_relation_pair(b.id, a.id).unwrap();

    assert!(store.get_issue_by_id(a.id).unwrap().relations.is_empty());
    assert!(store.get_issue_by_id(b.id).unwrap().relations.is_empty());
}

#[test]
fn blocks_transitively_follows_chain() {
    let db = Database::open_in_memory().unwrap();
    let (mut ws, owner) = seeded(&db);
    let store = db.store();
    let a = stored_issue(&store, &mut ws, IssueType::Task, &owner);
    let b = stored_issue(&store, &mut ws, IssueType::Task, &owner);
    let c = stored_issue(&store, &mut ws, IssueType::Task, &owner);
    store
        .insert_relation_pair(a.id, b.id, RelationType::Blocks, now())
        .unwrap();
    store
        .insert_relation_pair(c.id, b.id, RelationType::BlockedBy, now())
        .unwrap();

    // a blocks b, b blocks c
    assert!(store.blocks_transitively(a.id, c.id).unwrap());
    assert!(store.blocks_transitively(b.id, c.id).unwrap());
    assert!(!store.blocks_transitively(c.id, a.id).unwrap());
}
