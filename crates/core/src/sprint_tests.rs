// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use crate::issue::IssueType;
use crate::testing::{issue, now, other_workspace, workspace};
use chrono::Duration;
use yare::parameterized;

fn sprint(ws: &mut Workspace) -> Sprint {
    Sprint::create(ws, "Sprint", None, now(), now() + Duration::days(14), now()).unwrap()
}

#[test]
fn create_takes_sprint_key() {
    let mut ws = workspace();
    assert_eq!(sprint(&mut ws).key, "SPRINT-1");
    let second = sprint(&mut ws);
    assert_eq!(second.key, "SPRINT-2");
    assert_eq!(second.status, SprintStatus::Planning);
}

#[test]
fn create_rejects_end_before_start() {
    let mut ws = workspace();
    assert!(Sprint::create(&mut ws, "S", None, now(), now(), now()).is_err());
    assert!(
        Sprint::create(&mut ws, "S", None, now(), now() - Duration::days(1), now()).is_err()
    );
}

#[parameterized(
    planning_to_active = { SprintStatus::Planning, SprintStatus::Active, true },
    active_to_completed = { SprintStatus::Active, SprintStatus::Completed, true },
    planning_to_cancelled = { SprintStatus::Planning, SprintStatus::Cancelled, true },
    active_to_cancelled = { SprintStatus::Active, SprintStatus::Cancelled, true },
    planning_to_completed = { SprintStatus::Planning, SprintStatus::Completed, false },
    completed_to_active = { SprintStatus::Completed, SprintStatus::Active, false },
    cancelled_to_planning = { SprintStatus::Cancelled, SprintStatus::Planning, false },
)]
fn sprint_transitions(from: SprintStatus, to: SprintStatus, allowed: bool) {
    assert_eq!(from.can_transition_to(to), allowed);
}

#[test]
fn add_issue_checks_workspace_and_duplicates() {
    let mut ws = workspace();
    let mut other = other_workspace();
    let mut s = sprint(&mut ws);
    let task = issue(&mut ws, IssueType::Task);
    let foreign = issue(&mut other, IssueType::Task);

    s.add_issue(&task).unwrap();
    assert!(s.add_issue(&task).is_err());
    assert!(s.add_issue(&foreign).is_err());
    assert_eq!(s.issue_ids, vec![task.id]);
}

#[test]
fn closed_sprint_rejects_issue_changes() {
    let mut ws = workspace();
    let mut s = sprint(&mut ws);
    let task = issue(&mut ws, IssueType::Task);
    s.add_issue(&task).unwrap();
    s.update_status(SprintStatus::Active).unwrap();
    s.update_status(SprintStatus::Completed).unwrap();

    assert!(s.remove_issue(&task).is_err());
    assert!(s.add_issue(&issue(&mut ws, IssueType::Bug)).is_err());
}

#[test]
fn remove_issue_requires_membership() {
    let mut ws = workspace();
    let mut s = sprint(&mut ws);
    let task = issue(&mut ws, IssueType::Task);
    assert!(s.remove_issue(&task).is_err());
    s.add_issue(&task).unwrap();
    s.remove_issue(&task).unwrap();
    assert!(s.issue_ids.is_empty());
}

#[test]
fn update_edits_open_sprint() {
    let mut ws = workspace();
    let mut s = sprint(&mut ws);
    let end = now() + Duration::days(7);

    s.update(SprintUpdate {
        title: Some(" Hardening ".into()),
        goal: Some("fix bugs".into()),
        end_at: Some(end),
        ..Default::default()
    })
    .unwrap();
    assert_eq!(s.title, "Hardening");
    assert_eq!(s.goal.as_deref(), Some("fix bugs"));
    assert_eq!(s.start_at, now());
    assert_eq!(s.end_at, end);

    s.update(SprintUpdate { goal: Some(String::new()), ..Default::default() }).unwrap();
    assert_eq!(s.goal, None);
}

#[test]
fn update_rejects_bad_dates_and_title() {
    let mut ws = workspace();
    let mut s = sprint(&mut ws);
    let before = s.clone();

    assert!(s
        .update(SprintUpdate { end_at: Some(now() - Duration::days(1)), ..Default::default() })
        .is_err());
    assert!(matches!(
        s.update(SprintUpdate { title: Some(" ".into()), ..Default::default() }),
        Err(Error::InvalidOperation(_))
    ));
    assert_eq!(s, before);
}

#[test]
fn finished_sprint_cannot_be_edited() {
    let mut ws = workspace();
    let mut s = sprint(&mut ws);
    s.update_status(SprintStatus::Cancelled).unwrap();

    assert!(matches!(
        s.update(SprintUpdate { title: Some("late".into()), ..Default::default() }),
        Err(Error::InvalidOperation(_))
    ));
}
