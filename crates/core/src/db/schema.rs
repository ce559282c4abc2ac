// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use rusqlite::Connection;

use crate::error::Result;

/// SQL schema for the tracker database.
pub const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS members (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    login_id TEXT NOT NULL UNIQUE,
    email TEXT NOT NULL UNIQUE,
    username TEXT NOT NULL,
    owned_workspace_count INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL
);

-- Workspace with its monotonic issue and sprint counters
CREATE TABLE IF NOT EXISTS workspaces (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    code TEXT NOT NULL UNIQUE,
    name TEXT NOT NULL,
    description TEXT,
    key_prefix TEXT NOT NULL,
    next_issue_number INTEGER NOT NULL DEFAULT 1,
    next_sprint_number INTEGER NOT NULL DEFAULT 1,
    member_count INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS positions (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    workspace_code TEXT NOT NULL,
    name TEXT NOT NULL,
    description TEXT,
    color TEXT NOT NULL,
    UNIQUE (workspace_code, name),
    FOREIGN KEY (workspace_code) REFERENCES workspaces(code)
);

CREATE TABLE IF NOT EXISTS workspace_members (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    member_id INTEGER NOT NULL,
    workspace_code TEXT NOT NULL,
    nickname TEXT NOT NULL,
    role TEXT NOT NULL,
    position_id INTEGER,
    joined_at TEXT NOT NULL,
    removed_at TEXT,
    UNIQUE (member_id, workspace_code),
    UNIQUE (workspace_code, nickname),
    FOREIGN KEY (member_id) REFERENCES members(id),
    FOREIGN KEY (workspace_code) REFERENCES workspaces(code),
    FOREIGN KEY (position_id) REFERENCES positions(id)
);

CREATE TABLE IF NOT EXISTS invitations (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    workspace_code TEXT NOT NULL,
    member_id INTEGER NOT NULL,
    status TEXT NOT NULL DEFAULT 'pending',
    created_at TEXT NOT NULL,
    FOREIGN KEY (workspace_code) REFERENCES workspaces(code),
    FOREIGN KEY (member_id) REFERENCES members(id)
);

-- Issues; per-type fields live in the details JSON
CREATE TABLE IF NOT EXISTS issues (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    workspace_code TEXT NOT NULL,
    key TEXT NOT NULL,
    type TEXT NOT NULL,
    title TEXT NOT NULL,
    content TEXT NOT NULL DEFAULT '',
    summary TEXT,
    status TEXT NOT NULL DEFAULT 'todo',
    priority TEXT NOT NULL DEFAULT 'medium',
    due_at TEXT,
    story_point INTEGER,
    current_review_round INTEGER NOT NULL DEFAULT 0,
    parent_id INTEGER,
    created_by INTEGER,
    started_at TEXT,
    review_requested_at TEXT,
    resolved_at TEXT,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL,
    details TEXT NOT NULL,
    UNIQUE (workspace_code, key),
    FOREIGN KEY (workspace_code) REFERENCES workspaces(code),
    FOREIGN KEY (parent_id) REFERENCES issues(id),
    FOREIGN KEY (created_by) REFERENCES workspace_members(id),
    CHECK (parent_id IS NULL OR parent_id != id)
);

CREATE TABLE IF NOT EXISTS issue_reviewers (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    issue_id INTEGER NOT NULL,
    member_id INTEGER NOT NULL,
    added_at TEXT NOT NULL,
    UNIQUE (issue_id, member_id),
    FOREIGN KEY (issue_id) REFERENCES issues(id),
    FOREIGN KEY (member_id) REFERENCES workspace_members(id)
);

-- One review per reviewer per round
CREATE TABLE IF NOT EXISTS reviews (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    issue_reviewer_id INTEGER NOT NULL,
    author_id INTEGER NOT NULL,
    round INTEGER NOT NULL,
    status TEXT NOT NULL,
    title TEXT NOT NULL,
    content TEXT NOT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL,
    UNIQUE (issue_reviewer_id, round),
    FOREIGN KEY (issue_reviewer_id) REFERENCES issue_reviewers(id) ON DELETE CASCADE,
    FOREIGN KEY (author_id) REFERENCES workspace_members(id)
);

CREATE TABLE IF NOT EXISTS issue_assignees (
    issue_id INTEGER NOT NULL,
    member_id INTEGER NOT NULL,
    assigned_at TEXT NOT NULL,
    PRIMARY KEY (issue_id, member_id),
    FOREIGN KEY (issue_id) REFERENCES issues(id),
    FOREIGN KEY (member_id) REFERENCES workspace_members(id)
);

CREATE TABLE IF NOT EXISTS issue_watchers (
    issue_id INTEGER NOT NULL,
    member_id INTEGER NOT NULL,
    PRIMARY KEY (issue_id, member_id),
    FOREIGN KEY (issue_id) REFERENCES issues(id),
    FOREIGN KEY (member_id) REFERENCES workspace_members(id)
);

-- Each relation is stored once per direction
CREATE TABLE IF NOT EXISTS issue_relations (
    source_id INTEGER NOT NULL,
    target_id INTEGER NOT NULL,
    type TEXT NOT NULL,
    created_at TEXT NOT NULL,
    PRIMARY KEY (source_id, target_id),
    FOREIGN KEY (source_id) REFERENCES issues(id),
    FOREIGN KEY (target_id) REFERENCES issues(id),
    CHECK (source_id != target_id)
);

CREATE TABLE IF NOT EXISTS sprints (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    workspace_code TEXT NOT NULL,
    key TEXT NOT NULL,
    title TEXT NOT NULL,
    goal TEXT,
    start_at TEXT NOT NULL,
    end_at TEXT NOT NULL,
    status TEXT NOT NULL DEFAULT 'planning',
    created_at TEXT NOT NULL,
    UNIQUE (workspace_code, key),
    FOREIGN KEY (workspace_code) REFERENCES workspaces(code)
);

CREATE TABLE IF NOT EXISTS sprint_issues (
    sprint_id INTEGER NOT NULL,
    issue_id INTEGER NOT NULL,
    PRIMARY KEY (sprint_id, issue_id),
    FOREIGN KEY (sprint_id) REFERENCES sprints(id),
    FOREIGN KEY (issue_id) REFERENCES issues(id)
);

-- Comments on issues, optionally scoped to one review; replies point at a parent
CREATE TABLE IF NOT EXISTS comments (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    issue_id INTEGER NOT NULL,
    review_id INTEGER,
    parent_id INTEGER,
    author_id INTEGER NOT NULL,
    content TEXT NOT NULL,
    deleted INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL,
    FOREIGN KEY (issue_id) REFERENCES issues(id),
    FOREIGN KEY (review_id) REFERENCES reviews(id) ON DELETE CASCADE,
    FOREIGN KEY (parent_id) REFERENCES comments(id) ON DELETE CASCADE,
    FOREIGN KEY (author_id) REFERENCES workspace_members(id)
);

-- Event log (audit trail)
CREATE TABLE IF NOT EXISTS events (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    issue_id INTEGER NOT NULL,
    actor_id INTEGER,
    action TEXT NOT NULL,
    old_value TEXT,
    new_value TEXT,
    created_at TEXT NOT NULL,
    FOREIGN KEY (issue_id) REFERENCES issues(id)
);

-- Indexes
CREATE INDEX IF NOT EXISTS idx_issues_status ON issues(status);
CREATE INDEX IF NOT EXISTS idx_issues_parent ON issues(parent_id);
CREATE INDEX IF NOT EXISTS idx_relations_target ON issue_relations(target_id);
CREATE INDEX IF NOT EXISTS idx_reviewers_issue ON issue_reviewers(issue_id);
CREATE INDEX IF NOT EXISTS idx_events_issue ON events(issue_id);
CREATE INDEX IF NOT EXISTS idx_workspace_members_member ON workspace_members(member_id);
CREATE INDEX IF NOT EXISTS idx_comments_issue ON comments(issue_id);
"#;

/// Run schema creation on a database connection, then bring older
/// databases up to date.
///
/// Every statement is idempotent, so this is safe on an existing database.
pub fn run_migrations(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA)?;
    migrate_add_removed_at(conn)?;
    Ok(())
}

/// Migration: seats gained `removed_at` when members could leave.
fn migrate_add_removed_at(conn: &Connection) -> Result<()> {
    let has_column: bool = conn.query_row(
        "SELECT COUNT(*) > 0 FROM pragma_table_info('workspace_members') WHERE name = 'removed_at'",
        [],
        |row| row.get(0),
    )?;
    if !has_column {
        conn.execute("ALTER TABLE workspace_members ADD COLUMN removed_at TEXT", [])?;
    }
    Ok(())
}
