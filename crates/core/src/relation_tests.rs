// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use crate::issue::IssueType;
use crate::testing::{issue, now, other_workspace, started, workspace};
use yare::parameterized;

#[parameterized(
    relevant = { RelationType::Relevant, RelationType::Relevant },
    blocks = { RelationType::Blocks, RelationType::BlockedBy },
    blocked_by = { RelationType::BlockedBy, RelationType::Blocks },
    causes = { RelationType::Causes, RelationType::CausedBy },
    caused_by = { RelationType::CausedBy, RelationType::Causes },
)]
fn opposite_is_an_involution(rel: RelationType, expected: RelationType) {
    assert_eq!(rel.opposite(), expected);
    assert_eq!(rel.opposite().opposite(), rel);
}

#[parameterized(
    blocked_by = { "blocked_by", RelationType::BlockedBy },
    blocked_by_dash = { "blocked-by", RelationType::BlockedBy },
    caused_by_upper = { "CAUSED_BY", RelationType::CausedBy },
    relevant = { "relevant", RelationType::Relevant },
)]
fn relation_type_from_str(input: &str, expected: RelationType) {
    assert_eq!(input.parse::<RelationType>().unwrap(), expected);
}

#[test]
fn relation_type_from_str_invalid() {
    assert!(matches!(
        "tracks".parse::<RelationType>(),
        Err(Error::InvalidRelationType(_))
    ));
}

#[test]
fn add_relation_records_both_directions() {
    let mut ws = workspace();
    let mut a = issue(&mut ws, IssueType::Task);
    let mut b = issue(&mut ws, IssueType::Task);

    a.add_relation(&mut b, RelationType::Causes, now()).unwrap();

    assert_eq!(a.relation_to(b.id).unwrap().relation_type, RelationType::Causes);
    assert_eq!(b.relation_to(a.id).unwrap().relation_type, RelationType::CausedBy);
}

#[test]
fn add_relation_rejects_self() {
    let mut ws = workspace();
    let mut a = issue(&mut ws, IssueType::Task);
    let mut copy = a.clone();
    assert!(a.add_relation(&mut copy, RelationType::Relevant, now()).is_err());
    assert!(a.relations.is_empty());
}

#[test]
fn add_relation_rejects_duplicate_pair() {
    let mut ws = workspace();
    let mut a = issue(&mut ws, IssueType::Task);
    let mut b = issue(&mut ws, IssueType::Task);
    a.add_relation(&mut b, RelationType::Blocks, now()).unwrap();

    assert!(a.add_relation(&mut b, RelationType::Relevant, now()).is_err());
    assert!(b.add_relation(&mut a, RelationType::Blocks, now()).is_err());
    assert_eq!(a.relations.len(), 1);
    assert_eq!(b.relations.len(), 1);
}

#[test]
fn add_relation_rejects_cross_workspace() {
    let mut ws = workspace();
    let mut other = other_workspace();
    let mut a = issue(&mut ws, IssueType::Task);
    let mut b = issue(&mut other, IssueType::Task);
    assert!(a.add_relation(&mut b, RelationType::Relevant, now()).is_err());
}

#[test]
fn remove_relation_clears_both_sides() {
    let mut ws = workspace();
    let mut a = issue(&mut ws, IssueType::Task);
    let mut b = issue(&mut ws, IssueType::Task);
    a.add_relation(&mut b, RelationType::Blocks, now()).unwrap();

    let removed = b.remove_relation(&mut a, now()).unwrap();

    assert_eq!(removed, RelationType::BlockedBy);
    assert!(a.relations.is_empty());
    assert!(b.relations.is_empty());
    assert!(a.remove_relation(&mut b, now()).is_err());
}

#[test]
fn is_blocked_by_reads_holder_perspective() {
    let mut ws = workspace();
    let mut blocker = issue(&mut ws, IssueType::Task);
    let mut blocked = issue(&mut ws, IssueType::Task);
    blocker
        .add_relation(&mut blocked, RelationType::Blocks, now())
        .unwrap();

    assert!(blocked.is_blocked_by(blocker.id));
    assert!(!blocker.is_blocked_by(blocked.id));
}

#[test]
fn done_rejected_listing_every_unfinished_blocker() {
    let mut ws = workspace();
    let mut first = issue(&mut ws, IssueType::Task);
    let mut second = issue(&mut ws, IssueType::Bug);
    let mut finished = started(&mut ws, IssueType::Task);
    finished.update_status(Status::Done, now()).unwrap();
    let mut target = started(&mut ws, IssueType::Task);

    first.add_relation(&mut target, RelationType::Blocks, now()).unwrap();
    target
        .add_relation(&mut second, RelationType::BlockedBy, now())
        .unwrap();
    finished
        .add_relation(&mut target, RelationType::Blocks, now())
        .unwrap();

    let err = target.update_status(Status::Done, now()).unwrap_err();
    let msg = err.to_string();
    assert!(msg.ends_with(&format!("{}, {}", first.key, second.key)));
    assert!(!msg.contains(&finished.key));
    assert_eq!(target.status, Status::InProgress);
}

#[test]
fn done_allowed_once_blockers_are_done() {
    let mut ws = workspace();
    let mut blocker = started(&mut ws, IssueType::Task);
    let mut target = started(&mut ws, IssueType::Task);
    blocker
        .add_relation(&mut target, RelationType::Blocks, now())
        .unwrap();
    blocker.update_status(Status::Done, now()).unwrap();

    // Edges carry the status seen at load time.
    for edge in target.relations.iter_mut() {
        edge.other_status = blocker.status;
    }
    target.update_status(Status::Done, now()).unwrap();
}

#[test]
fn non_blocking_relations_do_not_gate_done() {
    let mut ws = workspace();
    let mut cause = issue(&mut ws, IssueType::Bug);
    let mut target = started(&mut ws, IssueType::Task);
    cause
        .add_relation(&mut target, RelationType::Causes, now())
        .unwrap();
    target.update_status(Status::Done, now()).unwrap();
}
