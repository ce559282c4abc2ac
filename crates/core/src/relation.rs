// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Typed relations between issues.
//!
//! A relation is stored once per direction: relating A to B with `blocks`
//! records `A blocks B` on A and `B blocked_by A` on B. Each [`RelationEdge`]
//! is read from the perspective of the issue holding it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::issue::{Issue, Status};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationType {
    Relevant,
    Blocks,
    BlockedBy,
    Causes,
    CausedBy,
}

impl RelationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RelationType::Relevant => "relevant",
            RelationType::Blocks => "blocks",
            RelationType::BlockedBy => "blocked_by",
            RelationType::Causes => "causes",
            RelationType::CausedBy => "caused_by",
        }
    }

    /// The type of the mirrored edge stored on the other issue.
    pub fn opposite(&self) -> RelationType {
        match self {
            RelationType::Relevant => RelationType::Relevant,
            RelationType::Blocks => RelationType::BlockedBy,
            RelationType::BlockedBy => RelationType::Blocks,
            RelationType::Causes => RelationType::CausedBy,
            RelationType::CausedBy => RelationType::Causes,
        }
    }
}

impl fmt::Display for RelationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RelationType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "relevant" | "related" => Ok(RelationType::Relevant),
            "blocks" => Ok(RelationType::Blocks),
            "blocked_by" => Ok(RelationType::BlockedBy),
            "causes" => Ok(RelationType::Causes),
            "caused_by" => Ok(RelationType::CausedBy),
            _ => Err(Error::InvalidRelationType(s.to_string())),
        }
    }
}

/// One direction of a relation, held by the issue it starts from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationEdge {
    pub other_id: i64,
    pub other_key: String,
    /// Status of the other issue when this edge was loaded.
    pub other_status: Status,
    pub relation_type: RelationType,
    pub created_at: DateTime<Utc>,
}

impl Issue {
    pub fn relation_to(&self, other_id: i64) -> Option<&RelationEdge> {
        self.relations.iter().find(|e| e.other_id == other_id)
    }

    /// Relate this issue to `target`, recording the mirrored edge on `target`.
    pub fn add_relation(
        &mut self,
        target: &mut Issue,
        relation_type: RelationType,
        now: DateTime<Utc>,
    ) -> Result<()> {
        if self.key == target.key {
            return Err(Error::InvalidOperation(format!(
                "cannot relate {} to itself",
                self.key
            )));
        }
        if self.workspace_code != target.workspace_code {
            return Err(Error::InvalidOperation(format!(
                "cannot relate {} to {}: issues belong to different workspaces",
                self.key, target.key
            )));
        }
        if let Some(existing) = self.relation_to(target.id) {
            return Err(Error::InvalidOperation(format!(
                "{} already {} {}",
                self.key, existing.relation_type, target.key
            )));
        }

        self.relations.push(RelationEdge {
            other_id: target.id,
            other_key: target.key.clone(),
            other_status: target.status,
            relation_type,
            created_at: now,
        });
        target.relations.push(RelationEdge {
            other_id: self.id,
            other_key: self.key.clone(),
            other_status: self.status,
            relation_type: relation_type.opposite(),
            created_at: now,
        });
        self.updated_at = now;
        target.updated_at = now;
        Ok(())
    }

    /// Remove the relation with `target` in both directions.
    pub fn remove_relation(&mut self, target: &mut Issue, now: DateTime<Utc>) -> Result<RelationType> {
        let index = self
            .relations
            .iter()
            .position(|e| e.other_id == target.id)
            .ok_or_else(|| {
                Error::InvalidOperation(format!(
                    "{} is not related to {}",
                    self.key, target.key
                ))
            })?;
        let removed = self.relations.remove(index);
        target.relations.retain(|e| e.other_id != self.id);
        self.updated_at = now;
        target.updated_at = now;
        Ok(removed.relation_type)
    }

    /// True if `other_id` blocks this issue.
    pub fn is_blocked_by(&self, other_id: i64) -> bool {
        self.relations
            .iter()
            .any(|e| e.other_id == other_id && e.relation_type == RelationType::BlockedBy)
    }

    /// Edges to the issues blocking this one, in insertion order.
    pub fn blockers(&self) -> impl Iterator<Item = &RelationEdge> {
        self.relations
            .iter()
            .filter(|e| e.relation_type == RelationType::BlockedBy)
    }

    /// Reject unless every blocking issue is done, naming the ones that are not.
    pub fn validate_blocking_issues_are_done(&self) -> Result<()> {
        let pending: Vec<&str> = self
            .blockers()
            .filter(|e| e.other_status != Status::Done)
            .map(|e| e.other_key.as_str())
            .collect();

        if !pending.is_empty() {
            return Err(Error::InvalidOperation(format!(
                "cannot complete {}: blocking issues must be completed first: {}",
                self.key,
                pending.join(", ")
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "relation_tests.rs"]
mod tests;
