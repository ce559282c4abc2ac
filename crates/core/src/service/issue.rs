// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use chrono::Utc;

use crate::comment::Comment;
use crate::db::{Database, Store};
use crate::edit::IssueUpdate;
use crate::error::{Error, Result};
use crate::event::{Action, Event};
use crate::issue::{BugSeverity, Issue, IssueDraft, Status};
use crate::member::{WorkspaceMember, WorkspaceRole};
use crate::relation::RelationType;
use crate::review::{Review, ReviewStatus};

use super::{active_seat, require_role, seat_of};

/// Issue lifecycle, reviews, participants and relations.
pub struct IssueService<'a> {
    db: &'a mut Database,
}

/// Load the actor's seat and the issue for a mutation.
fn load_for_edit(
    store: &Store<'_>,
    workspace_code: &str,
    key: &str,
    actor_id: i64,
) -> Result<(WorkspaceMember, Issue)> {
    let seat = seat_of(store, workspace_code, actor_id)?;
    require_role(&seat, WorkspaceRole::Collaborator)?;
    let issue = store.get_issue(workspace_code, key)?;
    Ok((seat, issue))
}

/// The issue a review belongs to, provided it lives in `workspace_code`.
fn review_issue(store: &Store<'_>, workspace_code: &str, review_id: i64) -> Result<Issue> {
    let issue = store.get_issue_by_id(store.get_review_issue_id(review_id)?)?;
    if issue.workspace_code != workspace_code {
        return Err(Error::ReviewNotFound(review_id));
    }
    Ok(issue)
}

/// A comment together with its issue, provided both live in `workspace_code`.
fn comment_issue(store: &Store<'_>, workspace_code: &str, comment_id: i64) -> Result<(Comment, Issue)> {
    let comment = store.get_comment(comment_id)?;
    let issue = store.get_issue_by_id(comment.issue_id)?;
    if issue.workspace_code != workspace_code {
        return Err(Error::CommentNotFound(comment_id));
    }
    Ok((comment, issue))
}

/// Work on an issue is reserved to its author and assignees; managers and
/// above may act on any issue.
fn authorize_work(seat: &WorkspaceMember, issue: &Issue) -> Result<()> {
    if seat.role.is_at_least(WorkspaceRole::Manager) {
        return Ok(());
    }
    issue.validate_is_assignee_or_author(seat.id)
}

impl<'a> IssueService<'a> {
    pub fn new(db: &'a mut Database) -> Self {
        IssueService { db }
    }

    /// Create an issue, optionally under `parent_key`.
    pub fn create_issue(
        &mut self,
        workspace_code: &str,
        actor_id: i64,
        draft: IssueDraft,
        parent_key: Option<&str>,
    ) -> Result<Issue> {
        let issue = self.db.unit_of_work(|store| {
            let seat = seat_of(store, workspace_code, actor_id)?;
            require_role(&seat, WorkspaceRole::Collaborator)?;
            let mut workspace = store.get_workspace(workspace_code)?;
            let now = Utc::now();

            let mut issue = Issue::create(&mut workspace, draft, Some(seat.id), now);
            issue.id = store.insert_issue(&issue)?;
            store.save_workspace(&workspace)?;

            if let Some(parent_key) = parent_key {
                let mut parent = store.get_issue(workspace_code, parent_key)?;
                issue.update_parent(&mut parent, None, now)?;
                store.save_issue(&issue)?;
            }

            store.log_event(
                &Event::new(issue.id, Action::Created, now)
                    .with_values(None, Some(issue.issue_type().to_string()))
                    .by(seat.id),
            )?;
            Ok(issue)
        })?;

        tracing::info!(key = %issue.key, issue_type = %issue.issue_type(), "issue created");
        Ok(issue)
    }

    /// Load an issue the actor can see.
    pub fn get_issue(&self, workspace_code: &str, key: &str, actor_id: i64) -> Result<Issue> {
        let store = self.db.store();
        seat_of(&store, workspace_code, actor_id)?;
        store.get_issue(workspace_code, key)
    }

    pub fn list_issues(
        &self,
        workspace_code: &str,
        actor_id: i64,
        status: Option<Status>,
    ) -> Result<Vec<Issue>> {
        let store = self.db.store();
        seat_of(&store, workspace_code, actor_id)?;
        store.list_issues(workspace_code, status)
    }

    /// The issue's audit trail, oldest first.
    pub fn events(&self, workspace_code: &str, key: &str, actor_id: i64) -> Result<Vec<Event>> {
        let issue = self.get_issue(workspace_code, key, actor_id)?;
        self.db.store().get_events(issue.id)
    }

    /// Latest events across the workspace, newest first.
    pub fn recent_events(
        &self,
        workspace_code: &str,
        actor_id: i64,
        limit: usize,
    ) -> Result<Vec<Event>> {
        let store = self.db.store();
        seat_of(&store, workspace_code, actor_id)?;
        store.get_recent_events(workspace_code, limit)
    }

    pub fn update_status(
        &mut self,
        workspace_code: &str,
        key: &str,
        actor_id: i64,
        status: Status,
    ) -> Result<Issue> {
        let issue = self.db.unit_of_work(|store| {
            let (seat, mut issue) = load_for_edit(store, workspace_code, key, actor_id)?;
            authorize_work(&seat, &issue)?;

            let old = issue.status;
            let now = Utc::now();
            issue.update_status(status, now)?;
            store.save_issue(&issue)?;
            store.log_event(
                &Event::new(issue.id, Action::StatusChanged, now)
                    .with_values(Some(old.to_string()), Some(status.to_string()))
                    .by(seat.id),
            )?;
            Ok(issue)
        })?;

        tracing::info!(key = %issue.key, status = %issue.status, "status updated");
        Ok(issue)
    }

    /// Edit an issue's fields. Same permission as other work on the issue.
    pub fn update_issue(
        &mut self,
        workspace_code: &str,
        key: &str,
        actor_id: i64,
        update: IssueUpdate,
    ) -> Result<Issue> {
        let issue = self.db.unit_of_work(|store| {
            let (seat, mut issue) = load_for_edit(store, workspace_code, key, actor_id)?;
            authorize_work(&seat, &issue)?;

            let now = Utc::now();
            let changed = issue.apply_update(update, now)?;
            store.save_issue(&issue)?;
            store.log_event(
                &Event::new(issue.id, Action::Edited, now)
                    .with_values(None, Some(changed.join(", ")))
                    .by(seat.id),
            )?;
            Ok(issue)
        })?;

        tracing::info!(key = %issue.key, "issue updated");
        Ok(issue)
    }

    /// Change a bug's severity; priority is raised to match.
    pub fn update_severity(
        &mut self,
        workspace_code: &str,
        key: &str,
        actor_id: i64,
        severity: BugSeverity,
    ) -> Result<Issue> {
        let issue = self.db.unit_of_work(|store| {
            let (seat, mut issue) = load_for_edit(store, workspace_code, key, actor_id)?;
            authorize_work(&seat, &issue)?;

            let now = Utc::now();
            let old_priority = issue.priority;
            issue.update_severity(severity, now)?;
            store.save_issue(&issue)?;
            store.log_event(
                &Event::new(issue.id, Action::Edited, now)
                    .with_values(
                        Some(old_priority.to_string()),
                        Some(format!("severity {severity}, priority {}", issue.priority)),
                    )
                    .by(seat.id),
            )?;
            Ok(issue)
        })?;

        tracing::info!(key = %issue.key, %severity, priority = %issue.priority, "severity updated");
        Ok(issue)
    }

    pub fn add_reviewer(
        &mut self,
        workspace_code: &str,
        key: &str,
        actor_id: i64,
        reviewer_seat_id: i64,
    ) -> Result<Issue> {
        let issue = self.db.unit_of_work(|store| {
            let (seat, mut issue) = load_for_edit(store, workspace_code, key, actor_id)?;
            authorize_work(&seat, &issue)?;
            let reviewer = active_seat(store, workspace_code, reviewer_seat_id)?;

            let now = Utc::now();
            issue.add_reviewer(&reviewer, now)?;
            if let Some(added) = issue.reviewers.last_mut() {
                added.id = store.insert_reviewer(issue.id, added)?;
            }
            store.save_issue(&issue)?;
            store.log_event(
                &Event::new(issue.id, Action::ReviewerAdded, now)
                    .with_values(None, Some(reviewer.nickname.clone()))
                    .by(seat.id),
            )?;
            Ok(issue)
        })?;

        tracing::info!(key = %issue.key, reviewer = reviewer_seat_id, "reviewer added");
        Ok(issue)
    }

    /// Remove a reviewer. Reviewers may also remove themselves.
    pub fn remove_reviewer(
        &mut self,
        workspace_code: &str,
        key: &str,
        actor_id: i64,
        reviewer_seat_id: i64,
    ) -> Result<Issue> {
        let issue = self.db.unit_of_work(|store| {
            let (seat, mut issue) = load_for_edit(store, workspace_code, key, actor_id)?;
            if seat.id != reviewer_seat_id {
                authorize_work(&seat, &issue)?;
            }

            let now = Utc::now();
            let removed = issue.remove_reviewer(reviewer_seat_id, now)?;
            store.delete_reviewer(removed.id)?;
            store.save_issue(&issue)?;
            store.log_event(
                &Event::new(issue.id, Action::ReviewerRemoved, now)
                    .with_values(Some(reviewer_seat_id.to_string()), None)
                    .by(seat.id),
            )?;
            Ok(issue)
        })?;

        tracing::info!(key = %issue.key, reviewer = reviewer_seat_id, "reviewer removed");
        Ok(issue)
    }

    /// Open the next review round. Only assignees (or managers) may ask.
    pub fn request_review(
        &mut self,
        workspace_code: &str,
        key: &str,
        actor_id: i64,
    ) -> Result<Issue> {
        let issue = self.db.unit_of_work(|store| {
            let (seat, mut issue) = load_for_edit(store, workspace_code, key, actor_id)?;
            if !seat.role.is_at_least(WorkspaceRole::Manager) {
                issue.validate_is_assignee(seat.id)?;
            }

            let old_status = issue.status;
            let now = Utc::now();
            issue.request_review(now)?;
            store.save_issue(&issue)?;
            store.log_event(
                &Event::new(issue.id, Action::ReviewRequested, now)
                    .with_values(
                        Some(old_status.to_string()),
                        Some(format!("round {}", issue.current_review_round)),
                    )
                    .by(seat.id),
            )?;
            Ok(issue)
        })?;

        tracing::info!(
            key = %issue.key,
            round = issue.current_review_round,
            reviewers = issue.reviewers.len(),
            "review requested"
        );
        Ok(issue)
    }

    /// Submit the actor's review for the current round.
    pub fn submit_review(
        &mut self,
        workspace_code: &str,
        key: &str,
        actor_id: i64,
        status: ReviewStatus,
        title: &str,
        content: &str,
    ) -> Result<Review> {
        let review = self.db.unit_of_work(|store| {
            let seat = seat_of(store, workspace_code, actor_id)?;
            let mut issue = store.get_issue(workspace_code, key)?;

            let now = Utc::now();
            let mut review = issue.submit_review(
                seat.id,
                status,
                title.to_string(),
                content.to_string(),
                now,
            )?;
            review.id = store.insert_review(&review)?;
            store.save_issue(&issue)?;
            store.log_event(
                &Event::new(issue.id, Action::Reviewed, now)
                    .with_values(
                        Some(format!("round {}", review.round)),
                        Some(status.to_string()),
                    )
                    .by(seat.id),
            )?;
            Ok(review)
        })?;

        tracing::info!(review = review.id, round = review.round, status = %review.status, "review submitted");
        Ok(review)
    }

    /// Change the verdict of an existing review.
    pub fn update_review_status(
        &mut self,
        workspace_code: &str,
        review_id: i64,
        actor_id: i64,
        status: ReviewStatus,
    ) -> Result<Review> {
        let review = self.db.unit_of_work(|store| {
            let seat = seat_of(store, workspace_code, actor_id)?;
            let issue = review_issue(store, workspace_code, review_id)?;

            let mut review = store.get_review(review_id)?;
            let old = review.status;
            let now = Utc::now();
            review.update_status(&seat, status, now)?;
            store.save_review(&review)?;
            store.log_event(
                &Event::new(issue.id, Action::Reviewed, now)
                    .with_values(Some(old.to_string()), Some(status.to_string()))
                    .by(seat.id),
            )?;
            Ok(review)
        })?;

        tracing::info!(review = review.id, status = %review.status, "review status updated");
        Ok(review)
    }

    /// Rewrite a review's title or content. Only its author may.
    pub fn update_review(
        &mut self,
        workspace_code: &str,
        review_id: i64,
        actor_id: i64,
        title: Option<&str>,
        content: Option<&str>,
    ) -> Result<Review> {
        let review = self.db.unit_of_work(|store| {
            let seat = seat_of(store, workspace_code, actor_id)?;
            let issue = review_issue(store, workspace_code, review_id)?;

            let mut review = store.get_review(review_id)?;
            let now = Utc::now();
            review.update_content(seat.id, title, content, now)?;
            store.save_review(&review)?;
            store.log_event(
                &Event::new(issue.id, Action::ReviewEdited, now)
                    .with_values(None, Some(format!("review {review_id}")))
                    .by(seat.id),
            )?;
            Ok(review)
        })?;

        tracing::info!(review = review.id, "review edited");
        Ok(review)
    }

    pub fn add_assignee(
        &mut self,
        workspace_code: &str,
        key: &str,
        actor_id: i64,
        assignee_seat_id: i64,
    ) -> Result<Issue> {
        let issue = self.db.unit_of_work(|store| {
            let (seat, mut issue) = load_for_edit(store, workspace_code, key, actor_id)?;
            authorize_work(&seat, &issue)?;
            let assignee = active_seat(store, workspace_code, assignee_seat_id)?;

            let now = Utc::now();
            issue.add_assignee(&assignee, now)?;
            if let Some(added) = issue.assignees.last() {
                store.insert_assignee(issue.id, added)?;
            }
            store.save_issue(&issue)?;
            store.log_event(
                &Event::new(issue.id, Action::Assigned, now)
                    .with_values(None, Some(assignee.nickname.clone()))
                    .by(seat.id),
            )?;
            Ok(issue)
        })?;

        tracing::info!(key = %issue.key, assignee = assignee_seat_id, "assignee added");
        Ok(issue)
    }

    pub fn remove_assignee(
        &mut self,
        workspace_code: &str,
        key: &str,
        actor_id: i64,
        assignee_seat_id: i64,
    ) -> Result<Issue> {
        let issue = self.db.unit_of_work(|store| {
            let (seat, mut issue) = load_for_edit(store, workspace_code, key, actor_id)?;
            authorize_work(&seat, &issue)?;

            let now = Utc::now();
            issue.remove_assignee(assignee_seat_id, now)?;
            store.delete_assignee(issue.id, assignee_seat_id)?;
            store.save_issue(&issue)?;
            store.log_event(
                &Event::new(issue.id, Action::Unassigned, now)
                    .with_values(Some(assignee_seat_id.to_string()), None)
                    .by(seat.id),
            )?;
            Ok(issue)
        })?;

        tracing::info!(key = %issue.key, assignee = assignee_seat_id, "assignee removed");
        Ok(issue)
    }

    /// Start watching. Watching twice is a no-op.
    pub fn watch(&mut self, workspace_code: &str, key: &str, actor_id: i64) -> Result<Issue> {
        self.db.unit_of_work(|store| {
            let seat = seat_of(store, workspace_code, actor_id)?;
            let mut issue = store.get_issue(workspace_code, key)?;
            if issue.add_watcher(seat.id) {
                store.insert_watcher(issue.id, seat.id)?;
                store.log_event(&Event::new(issue.id, Action::Watched, Utc::now()).by(seat.id))?;
            }
            Ok(issue)
        })
    }

    /// Stop watching. Unwatching twice is a no-op.
    pub fn unwatch(&mut self, workspace_code: &str, key: &str, actor_id: i64) -> Result<Issue> {
        self.db.unit_of_work(|store| {
            let seat = seat_of(store, workspace_code, actor_id)?;
            let mut issue = store.get_issue(workspace_code, key)?;
            if issue.remove_watcher(seat.id) {
                store.delete_watcher(issue.id, seat.id)?;
                store.log_event(&Event::new(issue.id, Action::Unwatched, Utc::now()).by(seat.id))?;
            }
            Ok(issue)
        })
    }

    /// Relate `source_key` to `target_key`, storing both directions.
    pub fn add_relation(
        &mut self,
        workspace_code: &str,
        source_key: &str,
        target_key: &str,
        relation_type: RelationType,
        actor_id: i64,
    ) -> Result<Issue> {
        let issue = self.db.unit_of_work(|store| {
            let (seat, mut source) = load_for_edit(store, workspace_code, source_key, actor_id)?;
            let mut target = store.get_issue(workspace_code, target_key)?;

            let (blocker, blocked) = match relation_type {
                RelationType::Blocks => (Some(&source), Some(&target)),
                RelationType::BlockedBy => (Some(&target), Some(&source)),
                _ => (None, None),
            };
            if let (Some(blocker), Some(blocked)) = (blocker, blocked) {
                if store.blocks_transitively(blocked.id, blocker.id)? {
                    return Err(Error::InvalidOperation(format!(
                        "{} blocks {} already; relating them would create a cycle",
                        blocked.key, blocker.key
                    )));
                }
            }

            let now = Utc::now();
            source.add_relation(&mut target, relation_type, now)?;
            store.insert_relation_pair(source.id, target.id, relation_type, now)?;
            store.save_issue(&source)?;
            store.save_issue(&target)?;
            store.log_event(
                &Event::new(source.id, Action::Related, now)
                    .with_values(None, Some(format!("{relation_type} {}", target.key)))
                    .by(seat.id),
            )?;
            store.log_event(
                &Event::new(target.id, Action::Related, now)
                    .with_values(None, Some(format!("{} {}", relation_type.opposite(), source.key)))
                    .by(seat.id),
            )?;
            Ok(source)
        })?;

        tracing::info!(source = %source_key, target = %target_key, %relation_type, "relation added");
        Ok(issue)
    }

    pub fn remove_relation(
        &mut self,
        workspace_code: &str,
        source_key: &str,
        target_key: &str,
        actor_id: i64,
    ) -> Result<Issue> {
        let issue = self.db.unit_of_work(|store| {
            let (seat, mut source) = load_for_edit(store, workspace_code, source_key, actor_id)?;
            let mut target = store.get_issue(workspace_code, target_key)?;

            let now = Utc::now();
            let removed = source.remove_relation(&mut target, now)?;
            store.delete_relation_pair(source.id, target.id)?;
            store.save_issue(&source)?;
            store.save_issue(&target)?;
            store.log_event(
                &Event::new(source.id, Action::Unrelated, now)
                    .with_values(Some(format!("{removed} {}", target.key)), None)
                    .by(seat.id),
            )?;
            store.log_event(
                &Event::new(target.id, Action::Unrelated, now)
                    .with_values(Some(format!("{} {}", removed.opposite(), source.key)), None)
                    .by(seat.id),
            )?;
            Ok(source)
        })?;

        tracing::info!(source = %source_key, target = %target_key, "relation removed");
        Ok(issue)
    }

    pub fn update_parent(
        &mut self,
        workspace_code: &str,
        key: &str,
        parent_key: &str,
        actor_id: i64,
    ) -> Result<Issue> {
        let issue = self.db.unit_of_work(|store| {
            let (seat, mut issue) = load_for_edit(store, workspace_code, key, actor_id)?;
            authorize_work(&seat, &issue)?;
            let mut new_parent = store.get_issue(workspace_code, parent_key)?;
            let mut old_parent = issue
                .parent_id
                .map(|id| store.get_issue_by_id(id))
                .transpose()?;
            let old_key = old_parent.as_ref().map(|p| p.key.clone());

            let now = Utc::now();
            issue.update_parent(&mut new_parent, old_parent.as_mut(), now)?;
            store.save_issue(&issue)?;
            store.log_event(
                &Event::new(issue.id, Action::ParentChanged, now)
                    .with_values(old_key, Some(new_parent.key.clone()))
                    .by(seat.id),
            )?;
            Ok(issue)
        })?;

        tracing::info!(key = %issue.key, parent = %parent_key, "parent updated");
        Ok(issue)
    }

    /// Detach from the parent. Detaching an issue without a parent is a no-op.
    pub fn remove_parent(&mut self, workspace_code: &str, key: &str, actor_id: i64) -> Result<Issue> {
        self.db.unit_of_work(|store| {
            let (seat, mut issue) = load_for_edit(store, workspace_code, key, actor_id)?;
            authorize_work(&seat, &issue)?;
            let mut parent = issue
                .parent_id
                .map(|id| store.get_issue_by_id(id))
                .transpose()?;
            let old_key = parent.as_ref().map(|p| p.key.clone());

            let now = Utc::now();
            if issue.remove_parent(parent.as_mut(), now) {
                store.save_issue(&issue)?;
                store.log_event(
                    &Event::new(issue.id, Action::ParentRemoved, now)
                        .with_values(old_key, None)
                        .by(seat.id),
                )?;
                tracing::info!(key = %issue.key, "parent removed");
            }
            Ok(issue)
        })
    }

    /// Comment on an issue, on one of its reviews, or reply to a comment.
    /// A reply stays in its parent's thread.
    pub fn add_comment(
        &mut self,
        workspace_code: &str,
        key: &str,
        actor_id: i64,
        review_id: Option<i64>,
        parent_id: Option<i64>,
        content: &str,
    ) -> Result<Comment> {
        let comment = self.db.unit_of_work(|store| {
            let (seat, issue) = load_for_edit(store, workspace_code, key, actor_id)?;
            if let Some(review_id) = review_id {
                if store.get_review_issue_id(review_id)? != issue.id {
                    return Err(Error::ReviewNotFound(review_id));
                }
            }

            let now = Utc::now();
            let mut comment = match parent_id {
                Some(parent_id) => {
                    let parent = store.get_comment(parent_id)?;
                    if parent.issue_id != issue.id {
                        return Err(Error::CommentNotFound(parent_id));
                    }
                    if review_id.is_some() && review_id != parent.review_id {
                        return Err(Error::InvalidOperation(format!(
                            "comment {parent_id} belongs to another thread"
                        )));
                    }
                    Comment::reply_to(&parent, seat.id, content, now)?
                }
                None => Comment::new(issue.id, review_id, seat.id, content, now)?,
            };
            comment.id = store.insert_comment(&comment)?;
            store.log_event(
                &Event::new(issue.id, Action::Commented, now)
                    .with_values(None, Some(format!("comment {}", comment.id)))
                    .by(seat.id),
            )?;
            Ok(comment)
        })?;

        tracing::info!(comment = comment.id, key = %key, reply = comment.is_reply(), "comment added");
        Ok(comment)
    }

    pub fn update_comment(
        &mut self,
        workspace_code: &str,
        comment_id: i64,
        actor_id: i64,
        content: &str,
    ) -> Result<Comment> {
        let comment = self.db.unit_of_work(|store| {
            let seat = seat_of(store, workspace_code, actor_id)?;
            let (mut comment, issue) = comment_issue(store, workspace_code, comment_id)?;

            let now = Utc::now();
            comment.edit(seat.id, content, now)?;
            store.save_comment(&comment)?;
            store.log_event(
                &Event::new(issue.id, Action::CommentEdited, now)
                    .with_values(None, Some(format!("comment {comment_id}")))
                    .by(seat.id),
            )?;
            Ok(comment)
        })?;

        tracing::info!(comment = comment.id, "comment edited");
        Ok(comment)
    }

    /// Soft-delete a comment; replies stay visible.
    pub fn delete_comment(&mut self, workspace_code: &str, comment_id: i64, actor_id: i64) -> Result<Comment> {
        let comment = self.db.unit_of_work(|store| {
            let seat = seat_of(store, workspace_code, actor_id)?;
            let (mut comment, issue) = comment_issue(store, workspace_code, comment_id)?;

            let now = Utc::now();
            comment.delete(&seat, now)?;
            store.save_comment(&comment)?;
            store.log_event(
                &Event::new(issue.id, Action::CommentDeleted, now)
                    .with_values(Some(format!("comment {comment_id}")), None)
                    .by(seat.id),
            )?;
            Ok(comment)
        })?;

        tracing::info!(comment = comment.id, "comment deleted");
        Ok(comment)
    }

    /// All comments on an issue and its reviews, oldest first.
    pub fn comments(&self, workspace_code: &str, key: &str, actor_id: i64) -> Result<Vec<Comment>> {
        let issue = self.get_issue(workspace_code, key, actor_id)?;
        self.db.store().list_comments(issue.id)
    }
}

#[cfg(test)]
#[path = "issue_tests.rs"]
mod tests;
