// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use chrono::{DateTime, Utc};
use rusqlite::params;

use crate::error::Result;
use crate::relation::{RelationEdge, RelationType};

use super::{parse_db, parse_timestamp, Store};

impl Store<'_> {
    /// Relations held by an issue, in insertion order, with the other
    /// issue's key and current status.
    pub(super) fn get_relations(&self, issue_id: i64) -> Result<Vec<RelationEdge>> {
        let mut stmt = self.conn.prepare(
            "SELECT r.target_id, i.key, i.status, r.type, r.created_at
             FROM issue_relations r JOIN issues i ON i.id = r.target_id
             WHERE r.source_id = ?1 ORDER BY r.rowid",
        )?;
        let edges = stmt
            .query_map(params![issue_id], |row| {
                let status_str: String = row.get(2)?;
                let type_str: String = row.get(3)?;
                let created_str: String = row.get(4)?;
                Ok(RelationEdge {
                    other_id: row.get(0)?,
                    other_key: row.get(1)?,
                    other_status: parse_db(&status_str, "status")?,
                    relation_type: parse_db(&type_str, "type")?,
                    created_at: parse_timestamp(&created_str, "created_at")?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(edges)
    }

    /// Store `source -> target (relation_type)` and its mirror.
    pub fn insert_relation_pair(
        &self,
        source_id: i64,
        target_id: i64,
        relation_type: RelationType,
        created_at: DateTime<Utc>,
    ) -> Result<()> {
        let created = created_at.to_rfc3339();
        self.conn.execute(
            "INSERT INTO issue_relations (source_id, target_id, type, created_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![source_id, target_id, relation_type.as_str(), created],
        )?;
        self.conn.execute(
            "INSERT INTO issue_relations (source_id, target_id, type, created_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![target_id, source_id, relation_type.opposite().as_str(), created],
        )?;
        Ok(())
    }

    /// Delete the relation between two issues in both directions.
    pub fn delete_relation_pair(&self, a: i64, b: i64) -> Result<()> {
        self.conn.execute(
            "DELETE FROM issue_relations
             WHERE (source_id = ?1 AND target_id = ?2) OR (source_id = ?2 AND target_id = ?1)",
            params![a, b],
        )?;
        Ok(())
    }

    /// True if `from` already blocks `to`, directly or through a chain.
    pub fn blocks_transitively(&self, from: i64, to: i64) -> Result<bool> {
        let count: i64 = self.conn.query_row(
            "WITH RECURSIVE chain(id) AS (
                SELECT target_id FROM issue_relations WHERE source_id = ?1 AND type = 'blocks'
                UNION
                SELECT r.target_id FROM issue_relations r JOIN chain c ON r.source_id = c.id
                WHERE r.type = 'blocks'
            )
            SELECT COUNT(*) FROM chain WHERE id = ?2",
            params![from, to],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }
}

#[cfg(test)]
#[path = "relations_tests.rs"]
mod tests;
