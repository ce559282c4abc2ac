// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use crate::commands::issue;
use crate::commands::testing::TestContext;
use crate::error::Error;
use stint_core::{Status, WorkspaceRole};

/// A task in review with `reviewer` on it.
fn in_review(t: &mut TestContext, reviewer: &str) -> String {
    let key = t.create_issue("Task");
    t.add_member(reviewer, WorkspaceRole::Collaborator);
    issue::status(&mut t.ctx, &key, "in_progress").unwrap();
    add(&mut t.ctx, &key, reviewer).unwrap();
    request(&mut t.ctx, &key).unwrap();
    key
}

#[test]
fn request_opens_first_round() {
    let mut t = TestContext::new();
    let key = in_review(&mut t, "rita");

    let issue = t.issue(&key);
    assert_eq!(issue.status, Status::InReview);
    assert_eq!(issue.current_review_round, 1);
}

#[test]
fn request_without_reviewers_fails() {
    let mut t = TestContext::new();
    let key = t.create_issue("Task");
    issue::status(&mut t.ctx, &key, "in_progress").unwrap();

    let err = request(&mut t.ctx, &key).unwrap_err();
    assert!(matches!(
        err,
        Error::Core(stint_core::Error::InvalidOperation(_))
    ));
}

#[test]
fn approval_lets_issue_finish() {
    let mut t = TestContext::new();
    let key = in_review(&mut t, "rita");

    t.act_as("rita");
    submit(&mut t.ctx, &key, "approved", "LGTM", "").unwrap();

    t.act_as("owner");
    issue::status(&mut t.ctx, &key, "done").unwrap();
    assert_eq!(t.issue(&key).status, Status::Done);
}

#[test]
fn changes_requested_blocks_done() {
    let mut t = TestContext::new();
    let key = in_review(&mut t, "rita");

    t.act_as("rita");
    submit(&mut t.ctx, &key, "changes_requested", "Needs tests", "").unwrap();

    t.act_as("owner");
    assert!(issue::status(&mut t.ctx, &key, "done").is_err());
}

#[test]
fn non_reviewer_cannot_submit() {
    let mut t = TestContext::new();
    let key = in_review(&mut t, "rita");
    t.add_member("bob", WorkspaceRole::Collaborator);
    t.act_as("bob");

    let err = submit(&mut t.ctx, &key, "approved", "", "").unwrap_err();
    assert!(matches!(err, Error::Core(stint_core::Error::Forbidden(_))));
}

#[test]
fn author_can_change_verdict() {
    let mut t = TestContext::new();
    let key = in_review(&mut t, "rita");
    t.act_as("rita");
    submit(&mut t.ctx, &key, "commented", "", "").unwrap();
    let review_id = t.issue(&key).reviewers[0].reviews[0].id;

    status(&mut t.ctx, review_id, "approved").unwrap();
    let review = t.ctx.db.store().get_review(review_id).unwrap();
    assert_eq!(review.status, ReviewStatus::Approved);
}

#[test]
fn reviewer_can_remove_themself() {
    let mut t = TestContext::new();
    let key = t.create_issue("Task");
    t.add_member("rita", WorkspaceRole::Collaborator);
    add(&mut t.ctx, &key, "rita").unwrap();

    t.act_as("rita");
    remove(&mut t.ctx, &key, "rita").unwrap();
    assert!(t.issue(&key).reviewers.is_empty());
}

#[test]
fn unknown_verdict_is_invalid_input() {
    let mut t = TestContext::new();
    let key = in_review(&mut t, "rita");
    let err = submit(&mut t.ctx, &key, "maybe", "", "").unwrap_err();
    assert_eq!(err.exit_code(), 2);
}

#[test]
fn author_edits_review_text() {
    let mut t = TestContext::new();
    let key = in_review(&mut t, "rita");
    t.act_as("rita");
    submit(&mut t.ctx, &key, "approved", "LGTM", "").unwrap();
    // first review in a fresh database
    let review_id = 1;
    assert_eq!(t.ctx.db.store().get_review_issue_id(review_id).unwrap(), t.issue(&key).id);

    edit(&mut t.ctx, review_id, Some("Looks good"), Some("Ship it")).unwrap();
    let review = t.ctx.db.store().get_review(review_id).unwrap();
    assert_eq!(review.title, "Looks good");
    assert_eq!(review.content, "Ship it");

    t.act_as("owner");
    let err = edit(&mut t.ctx, review_id, Some("Mine now"), None).unwrap_err();
    assert!(matches!(err, Error::Core(stint_core::Error::Forbidden(_))));
}
