// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Reviewers, reviews and the review-round protocol.
//!
//! Each issue carries a round counter. Requesting a review opens the next
//! round; every review is stamped with the round that was open when it was
//! submitted, and a reviewer's verdict for round `n` is the review carrying
//! that stamp.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::issue::{Issue, Status};
use crate::member::{WorkspaceMember, WorkspaceRole};

/// Maximum number of reviewers a single issue can carry.
pub const MAX_REVIEWERS: usize = 10;

/// Verdict of a single review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewStatus {
    Approved,
    ChangesRequested,
    Commented,
}

impl ReviewStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewStatus::Approved => "approved",
            ReviewStatus::ChangesRequested => "changes_requested",
            ReviewStatus::Commented => "commented",
        }
    }
}

impl fmt::Display for ReviewStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ReviewStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "approved" | "approve" => Ok(ReviewStatus::Approved),
            "changes_requested" | "request_changes" => Ok(ReviewStatus::ChangesRequested),
            "commented" | "comment" => Ok(ReviewStatus::Commented),
            _ => Err(Error::InvalidReviewStatus(s.to_string())),
        }
    }
}

/// A reviewer's verdict for one round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    /// Database-assigned identifier (0 until stored).
    pub id: i64,
    pub issue_reviewer_id: i64,
    /// Workspace member who wrote the review.
    pub author_id: i64,
    /// Round that was open when the review was submitted.
    pub round: u32,
    pub status: ReviewStatus,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Review {
    /// Change the verdict.
    ///
    /// Actors below manager may only change reviews they wrote; the caller
    /// passes the acting member.
    pub fn update_status(
        &mut self,
        actor: &WorkspaceMember,
        status: ReviewStatus,
        now: DateTime<Utc>,
    ) -> Result<()> {
        if !actor.role.is_at_least(WorkspaceRole::Manager) && actor.id != self.author_id {
            return Err(Error::Forbidden(format!(
                "member {} cannot change review {} written by member {}",
                actor.id, self.id, self.author_id
            )));
        }
        self.status = status;
        self.updated_at = now;
        Ok(())
    }

    /// Rewrite the title or content. Only the author may.
    pub fn update_content(
        &mut self,
        actor_id: i64,
        title: Option<&str>,
        content: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<()> {
        if actor_id != self.author_id {
            return Err(Error::Forbidden(format!(
                "only the author can edit review {}",
                self.id
            )));
        }
        if title.is_none() && content.is_none() {
            return Err(Error::InvalidOperation(format!("nothing to update on review {}", self.id)));
        }
        if let Some(title) = title {
            let title = title.trim();
            if title.is_empty() {
                return Err(Error::InvalidOperation("review title cannot be empty".to_string()));
            }
            self.title = title.to_string();
        }
        if let Some(content) = content {
            self.content = content.to_string();
        }
        self.updated_at = now;
        Ok(())
    }
}

/// A workspace member asked to review an issue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IssueReviewer {
    /// Database-assigned identifier (0 until stored).
    pub id: i64,
    pub member_id: i64,
    #[serde(default)]
    pub reviews: Vec<Review>,
    pub added_at: DateTime<Utc>,
}

impl IssueReviewer {
    pub fn new(member_id: i64, now: DateTime<Utc>) -> Self {
        IssueReviewer {
            id: 0,
            member_id,
            reviews: Vec::new(),
            added_at: now,
        }
    }

    pub fn review_for_round(&self, round: u32) -> Option<&Review> {
        self.reviews.iter().find(|r| r.round == round)
    }

    /// Verdict for `round`, or `None` if the reviewer has not reviewed it.
    pub fn status_for_round(&self, round: u32) -> Option<ReviewStatus> {
        self.review_for_round(round).map(|r| r.status)
    }

    pub fn has_review_for_round(&self, round: u32) -> bool {
        self.review_for_round(round).is_some()
    }
}

impl Issue {
    pub fn reviewer(&self, member_id: i64) -> Option<&IssueReviewer> {
        self.reviewers.iter().find(|r| r.member_id == member_id)
    }

    pub fn is_reviewer(&self, member_id: i64) -> bool {
        self.reviewer(member_id).is_some()
    }

    pub fn reviewer_ids(&self) -> Vec<i64> {
        self.reviewers.iter().map(|r| r.member_id).collect()
    }

    /// Add `member` as a reviewer.
    pub fn add_reviewer(&mut self, member: &WorkspaceMember, now: DateTime<Utc>) -> Result<()> {
        if self.reviewers.len() >= MAX_REVIEWERS {
            return Err(Error::InvalidOperation(format!(
                "the max number of reviewers for a single issue is {MAX_REVIEWERS}. issue key: {}",
                self.key
            )));
        }
        if member.workspace_code != self.workspace_code {
            return Err(Error::InvalidOperation(format!(
                "reviewer must belong to workspace {}. member id: {}",
                self.workspace_code, member.id
            )));
        }
        if self.is_reviewer(member.id) {
            return Err(Error::InvalidOperation(format!(
                "member {} is already a reviewer of {}",
                member.id, self.key
            )));
        }
        self.reviewers.push(IssueReviewer::new(member.id, now));
        self.updated_at = now;
        Ok(())
    }

    /// Remove a reviewer who has not yet reviewed the current round.
    pub fn remove_reviewer(&mut self, member_id: i64, now: DateTime<Utc>) -> Result<IssueReviewer> {
        let index = self
            .reviewers
            .iter()
            .position(|r| r.member_id == member_id)
            .ok_or_else(|| {
                Error::Forbidden(format!(
                    "member {member_id} is not a reviewer of {}",
                    self.key
                ))
            })?;

        if self.reviewers[index].has_review_for_round(self.current_review_round) {
            return Err(Error::InvalidOperation(format!(
                "cannot remove reviewer {member_id}: a review for round {} was already submitted",
                self.current_review_round
            )));
        }

        self.updated_at = now;
        Ok(self.reviewers.remove(index))
    }

    /// Open the next review round and move the issue into review.
    pub fn request_review(&mut self, now: DateTime<Utc>) -> Result<()> {
        if self.reviewers.is_empty() {
            return Err(Error::InvalidOperation(format!(
                "cannot request review for {}: there are no assigned reviewers",
                self.key
            )));
        }

        if self.current_review_round == 0 {
            self.update_status(Status::InReview, now)?;
        } else {
            self.validate_can_start_new_round()?;
            // Re-entry: already in review, only the timestamp moves.
            self.review_requested_at = Some(now);
            self.updated_at = now;
        }

        self.current_review_round += 1;
        Ok(())
    }

    fn validate_can_start_new_round(&self) -> Result<()> {
        if self.status != Status::InReview {
            return Err(Error::InvalidOperation(format!(
                "cannot start review round {} for {}: issue is {}, not in_review",
                self.current_review_round + 1,
                self.key,
                self.status
            )));
        }

        let pending: Vec<String> = self
            .reviewers
            .iter()
            .filter(|r| !r.has_review_for_round(self.current_review_round))
            .map(|r| r.member_id.to_string())
            .collect();

        if !pending.is_empty() {
            return Err(Error::InvalidOperation(format!(
                "cannot start a new review round for {}: reviewers {} have not reviewed round {}",
                self.key,
                pending.join(", "),
                self.current_review_round
            )));
        }
        Ok(())
    }

    /// Check that `member_id` may review the current round.
    pub fn validate_can_submit_review(&self, member_id: i64) -> Result<()> {
        if self.status != Status::InReview {
            return Err(Error::InvalidOperation(format!(
                "cannot review {}: issue is {}, not in_review",
                self.key, self.status
            )));
        }
        let reviewer = self.reviewer(member_id).ok_or_else(|| {
            Error::Forbidden(format!(
                "member {member_id} is not a reviewer of {}",
                self.key
            ))
        })?;
        if reviewer.has_review_for_round(self.current_review_round) {
            return Err(Error::InvalidOperation(format!(
                "member {member_id} already reviewed round {} of {}",
                self.current_review_round, self.key
            )));
        }
        Ok(())
    }

    /// Record a review for the current round, returning a copy of it.
    pub fn submit_review(
        &mut self,
        member_id: i64,
        status: ReviewStatus,
        title: String,
        content: String,
        now: DateTime<Utc>,
    ) -> Result<Review> {
        self.validate_can_submit_review(member_id)?;
        let round = self.current_review_round;

        let reviewer = self
            .reviewers
            .iter_mut()
            .find(|r| r.member_id == member_id)
            .ok_or_else(|| Error::Forbidden(format!("member {member_id} is not a reviewer")))?;

        let review = Review {
            id: 0,
            issue_reviewer_id: reviewer.id,
            author_id: member_id,
            round,
            status,
            title,
            content,
            created_at: now,
            updated_at: now,
        };
        reviewer.reviews.push(review.clone());
        self.updated_at = now;
        Ok(review)
    }

    /// True if any reviewer asked for changes in the current round.
    pub fn has_any_changes_requested(&self) -> bool {
        self.reviewers.iter().any(|r| {
            r.status_for_round(self.current_review_round) == Some(ReviewStatus::ChangesRequested)
        })
    }

    /// True if every reviewer approved the current round.
    pub fn all_approved(&self) -> bool {
        !self.reviewers.is_empty()
            && self.reviewers.iter().all(|r| {
                r.status_for_round(self.current_review_round) == Some(ReviewStatus::Approved)
            })
    }
}

#[cfg(test)]
#[path = "review_tests.rs"]
mod tests;
