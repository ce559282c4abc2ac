// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use rusqlite::{params, OptionalExtension, Row};

use crate::comment::Comment;
use crate::error::{Error, Result};

use super::{parse_timestamp, Store};

const COMMENT_COLUMNS: &str =
    "id, issue_id, review_id, parent_id, author_id, content, deleted, created_at, updated_at";

fn comment_from_row(row: &Row<'_>) -> rusqlite::Result<Comment> {
    let created_str: String = row.get(7)?;
    let updated_str: String = row.get(8)?;
    Ok(Comment {
        id: row.get(0)?,
        issue_id: row.get(1)?,
        review_id: row.get(2)?,
        parent_id: row.get(3)?,
        author_id: row.get(4)?,
        content: row.get(5)?,
        deleted: row.get(6)?,
        created_at: parse_timestamp(&created_str, "created_at")?,
        updated_at: parse_timestamp(&updated_str, "updated_at")?,
    })
}

impl Store<'_> {
    /// Insert a comment, returning its id.
    pub fn insert_comment(&self, comment: &Comment) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO comments (issue_id, review_id, parent_id, author_id, content, deleted,
             created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                comment.issue_id,
                comment.review_id,
                comment.parent_id,
                comment.author_id,
                comment.content,
                comment.deleted,
                comment.created_at.to_rfc3339(),
                comment.updated_at.to_rfc3339(),
            ],
        )?;
        Ok(self.last_insert_rowid())
    }

    pub fn get_comment(&self, id: i64) -> Result<Comment> {
        self.conn
            .query_row(
                &format!("SELECT {COMMENT_COLUMNS} FROM comments WHERE id = ?1"),
                params![id],
                comment_from_row,
            )
            .optional()?
            .ok_or(Error::CommentNotFound(id))
    }

    pub fn save_comment(&self, comment: &Comment) -> Result<()> {
        self.conn.execute(
            "UPDATE comments SET content = ?1, deleted = ?2, updated_at = ?3 WHERE id = ?4",
            params![
                comment.content,
                comment.deleted,
                comment.updated_at.to_rfc3339(),
                comment.id
            ],
        )?;
        if self.conn.changes() == 0 {
            return Err(Error::CommentNotFound(comment.id));
        }
        Ok(())
    }

    /// An issue's comments, review threads included, oldest first.
    pub fn list_comments(&self, issue_id: i64) -> Result<Vec<Comment>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {COMMENT_COLUMNS} FROM comments WHERE issue_id = ?1 ORDER BY id"
        ))?;
        let comments = stmt
            .query_map(params![issue_id], comment_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(comments)
    }
}

#[cfg(test)]
#[path = "comments_tests.rs"]
mod tests;
