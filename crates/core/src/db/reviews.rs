// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use rusqlite::{params, OptionalExtension, Row};

use crate::error::{Error, Result};
use crate::review::{IssueReviewer, Review};

use super::{parse_db, parse_timestamp, Store};

const REVIEW_COLUMNS: &str =
    "id, issue_reviewer_id, author_id, round, status, title, content, created_at, updated_at";

fn review_from_row(row: &Row<'_>) -> rusqlite::Result<Review> {
    let status_str: String = row.get(4)?;
    let created_str: String = row.get(7)?;
    let updated_str: String = row.get(8)?;
    Ok(Review {
        id: row.get(0)?,
        issue_reviewer_id: row.get(1)?,
        author_id: row.get(2)?,
        round: row.get(3)?,
        status: parse_db(&status_str, "status")?,
        title: row.get(5)?,
        content: row.get(6)?,
        created_at: parse_timestamp(&created_str, "created_at")?,
        updated_at: parse_timestamp(&updated_str, "updated_at")?,
    })
}

impl Store<'_> {
    /// Reviewers of an issue in the order they were added, with their reviews.
    pub(super) fn get_reviewers(&self, issue_id: i64) -> Result<Vec<IssueReviewer>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, member_id, added_at FROM issue_reviewers
             WHERE issue_id = ?1 ORDER BY id",
        )?;
        let mut reviewers = stmt
            .query_map(params![issue_id], |row| {
                let added_str: String = row.get(2)?;
                Ok(IssueReviewer {
                    id: row.get(0)?,
                    member_id: row.get(1)?,
                    reviews: Vec::new(),
                    added_at: parse_timestamp(&added_str, "added_at")?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let mut stmt = self.conn.prepare(&format!(
            "SELECT {REVIEW_COLUMNS} FROM reviews WHERE issue_reviewer_id = ?1 ORDER BY round"
        ))?;
        for reviewer in reviewers.iter_mut() {
            reviewer.reviews = stmt
                .query_map(params![reviewer.id], review_from_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
        }
        Ok(reviewers)
    }

    /// Insert a reviewer link, returning its id.
    pub fn insert_reviewer(&self, issue_id: i64, reviewer: &IssueReviewer) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO issue_reviewers (issue_id, member_id, added_at) VALUES (?1, ?2, ?3)",
            params![issue_id, reviewer.member_id, reviewer.added_at.to_rfc3339()],
        )?;
        Ok(self.last_insert_rowid())
    }

    /// Delete a reviewer link together with its reviews.
    pub fn delete_reviewer(&self, reviewer_id: i64) -> Result<()> {
        self.conn.execute(
            "DELETE FROM issue_reviewers WHERE id = ?1",
            params![reviewer_id],
        )?;
        Ok(())
    }

    /// Insert a review, returning its id.
    pub fn insert_review(&self, review: &Review) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO reviews (issue_reviewer_id, author_id, round, status, title, content,
             created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                review.issue_reviewer_id,
                review.author_id,
                review.round,
                review.status.as_str(),
                review.title,
                review.content,
                review.created_at.to_rfc3339(),
                review.updated_at.to_rfc3339(),
            ],
        )?;
        Ok(self.last_insert_rowid())
    }

    pub fn get_review(&self, id: i64) -> Result<Review> {
        self.conn
            .query_row(
                &format!("SELECT {REVIEW_COLUMNS} FROM reviews WHERE id = ?1"),
                params![id],
                review_from_row,
            )
            .optional()?
            .ok_or(Error::ReviewNotFound(id))
    }

    /// Id of the issue a review belongs to.
    pub fn get_review_issue_id(&self, review_id: i64) -> Result<i64> {
        self.conn
            .query_row(
                "SELECT ir.issue_id FROM reviews r
                 JOIN issue_reviewers ir ON ir.id = r.issue_reviewer_id
                 WHERE r.id = ?1",
                params![review_id],
                |row| row.get(0),
            )
            .optional()?
            .ok_or(Error::ReviewNotFound(review_id))
    }

    /// Persist a review's verdict and text.
    pub fn save_review(&self, review: &Review) -> Result<()> {
        self.conn.execute(
            "UPDATE reviews SET status = ?1, title = ?2, content = ?3, updated_at = ?4 WHERE id = ?5",
            params![
                review.status.as_str(),
                review.title,
                review.content,
                review.updated_at.to_rfc3339(),
                review.id
            ],
        )?;
        if self.conn.changes() == 0 {
            return Err(Error::ReviewNotFound(review.id));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "reviews_tests.rs"]
mod tests;
