// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use crate::issue::IssueType;
use crate::testing::{issue, member, now, other_workspace, workspace};

#[test]
fn add_assignee_rejects_fifty_first() {
    let mut ws = workspace();
    let mut issue = issue(&mut ws, IssueType::Task);
    for id in 1..=50 {
        issue.add_assignee(&member(&ws, id), now()).unwrap();
    }

    let err = issue.add_assignee(&member(&ws, 51), now()).unwrap_err();
    assert!(matches!(err, Error::InvalidOperation(_)));
    assert_eq!(issue.assignees.len(), MAX_ASSIGNEES);
}

#[test]
fn add_assignee_rejects_other_workspace_member() {
    let mut ws = workspace();
    let other = other_workspace();
    let mut issue = issue(&mut ws, IssueType::Task);
    let err = issue.add_assignee(&member(&other, 4), now()).unwrap_err();
    assert!(err.to_string().contains("must belong to workspace"));
    assert!(issue.assignees.is_empty());
}

#[test]
fn add_assignee_rejects_duplicate() {
    let mut ws = workspace();
    let mut issue = issue(&mut ws, IssueType::Task);
    issue.add_assignee(&member(&ws, 4), now()).unwrap();
    assert!(issue.add_assignee(&member(&ws, 4), now()).is_err());
    assert_eq!(issue.assignee_ids(), vec![4]);
}

#[test]
fn remove_assignee_requires_assignment() {
    let mut ws = workspace();
    let mut issue = issue(&mut ws, IssueType::Task);
    issue.add_assignee(&member(&ws, 4), now()).unwrap();

    issue.remove_assignee(4, now()).unwrap();
    assert!(issue.assignees.is_empty());
    assert!(issue.remove_assignee(4, now()).is_err());
}

#[test]
fn watchers_have_set_semantics() {
    let mut ws = workspace();
    let mut issue = issue(&mut ws, IssueType::Task);
    assert!(issue.add_watcher(3));
    assert!(!issue.add_watcher(3));
    assert_eq!(issue.watchers.len(), 1);
    assert!(issue.remove_watcher(3));
    assert!(!issue.remove_watcher(3));
}

#[test]
fn assignee_or_author_check() {
    let mut ws = workspace();
    let mut issue = issue(&mut ws, IssueType::Task);
    issue.add_assignee(&member(&ws, 4), now()).unwrap();

    assert!(issue.validate_is_assignee_or_author(1).is_ok());
    assert!(issue.validate_is_assignee_or_author(4).is_ok());
    assert!(matches!(
        issue.validate_is_assignee_or_author(9),
        Err(Error::Forbidden(_))
    ));
    assert!(issue.validate_is_assignee(1).is_err());
}

#[test]
fn subscribers_union_every_participant() {
    let mut ws = workspace();
    let mut issue = issue(&mut ws, IssueType::Task);
    issue.add_assignee(&member(&ws, 4), now()).unwrap();
    issue.add_reviewer(&member(&ws, 5), now()).unwrap();
    issue.add_watcher(6);
    issue.add_watcher(4);

    let ids: Vec<i64> = issue.subscriber_ids().into_iter().collect();
    assert_eq!(ids, vec![1, 4, 5, 6]);
}
