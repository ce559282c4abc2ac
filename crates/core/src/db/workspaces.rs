// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use rusqlite::{params, OptionalExtension, Row};

use crate::error::{Error, Result};
use crate::member::{Invitation, Member, Position, WorkspaceMember};
use crate::workspace::Workspace;

use super::{parse_db, parse_timestamp, parse_timestamp_opt, Store};

const WORKSPACE_COLUMNS: &str = "id, code, name, description, key_prefix, next_issue_number,
     next_sprint_number, member_count, created_at";

const WORKSPACE_MEMBER_COLUMNS: &str =
    "id, member_id, workspace_code, nickname, role, position_id, joined_at, removed_at";

fn workspace_from_row(row: &Row<'_>) -> rusqlite::Result<Workspace> {
    let created_str: String = row.get(8)?;
    Ok(Workspace {
        id: row.get(0)?,
        code: row.get(1)?,
        name: row.get(2)?,
        description: row.get(3)?,
        key_prefix: row.get(4)?,
        next_issue_number: row.get(5)?,
        next_sprint_number: row.get(6)?,
        member_count: row.get(7)?,
        created_at: parse_timestamp(&created_str, "created_at")?,
    })
}

fn workspace_member_from_row(row: &Row<'_>) -> rusqlite::Result<WorkspaceMember> {
    let role_str: String = row.get(4)?;
    let joined_str: String = row.get(6)?;
    Ok(WorkspaceMember {
        id: row.get(0)?,
        member_id: row.get(1)?,
        workspace_code: row.get(2)?,
        nickname: row.get(3)?,
        role: parse_db(&role_str, "role")?,
        position_id: row.get(5)?,
        joined_at: parse_timestamp(&joined_str, "joined_at")?,
        removed_at: parse_timestamp_opt(row.get(7)?, "removed_at")?,
    })
}

fn member_from_row(row: &Row<'_>) -> rusqlite::Result<Member> {
    let created_str: String = row.get(5)?;
    Ok(Member {
        id: row.get(0)?,
        login_id: row.get(1)?,
        email: row.get(2)?,
        username: row.get(3)?,
        owned_workspace_count: row.get(4)?,
        created_at: parse_timestamp(&created_str, "created_at")?,
    })
}

impl Store<'_> {
    /// Insert a member, returning its id.
    pub fn insert_member(&self, member: &Member) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO members (login_id, email, username, owned_workspace_count, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                member.login_id,
                member.email,
                member.username,
                member.owned_workspace_count,
                member.created_at.to_rfc3339(),
            ],
        )?;
        Ok(self.last_insert_rowid())
    }

    pub fn get_member(&self, id: i64) -> Result<Member> {
        self.conn
            .query_row(
                "SELECT id, login_id, email, username, owned_workspace_count, created_at
                 FROM members WHERE id = ?1",
                params![id],
                member_from_row,
            )
            .optional()?
            .ok_or_else(|| Error::MemberNotFound(id.to_string()))
    }

    pub fn get_member_by_login(&self, login_id: &str) -> Result<Member> {
        self.conn
            .query_row(
                "SELECT id, login_id, email, username, owned_workspace_count, created_at
                 FROM members WHERE login_id = ?1",
                params![login_id],
                member_from_row,
            )
            .optional()?
            .ok_or_else(|| Error::MemberNotFound(login_id.to_string()))
    }

    pub fn save_member(&self, member: &Member) -> Result<()> {
        self.conn.execute(
            "UPDATE members SET email = ?1, username = ?2, owned_workspace_count = ?3
             WHERE id = ?4",
            params![
                member.email,
                member.username,
                member.owned_workspace_count,
                member.id
            ],
        )?;
        if self.conn.changes() == 0 {
            return Err(Error::MemberNotFound(member.id.to_string()));
        }
        Ok(())
    }

    pub fn member_email_exists(&self, email: &str) -> Result<bool> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM members WHERE email = ?1",
            params![email],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    pub fn workspace_code_exists(&self, code: &str) -> Result<bool> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM workspaces WHERE code = ?1",
            params![code],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    /// Insert a workspace, returning its id.
    pub fn insert_workspace(&self, workspace: &Workspace) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO workspaces (code, name, description, key_prefix, next_issue_number,
             next_sprint_number, member_count, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                workspace.code,
                workspace.name,
                workspace.description,
                workspace.key_prefix,
                workspace.next_issue_number,
                workspace.next_sprint_number,
                workspace.member_count,
                workspace.created_at.to_rfc3339(),
            ],
        )?;
        Ok(self.last_insert_rowid())
    }

    pub fn get_workspace(&self, code: &str) -> Result<Workspace> {
        self.conn
            .query_row(
                &format!("SELECT {WORKSPACE_COLUMNS} FROM workspaces WHERE code = ?1"),
                params![code],
                workspace_from_row,
            )
            .optional()?
            .ok_or_else(|| Error::WorkspaceNotFound(code.to_string()))
    }

    /// Persist name, prefix and counters.
    pub fn save_workspace(&self, workspace: &Workspace) -> Result<()> {
        self.conn.execute(
            "UPDATE workspaces SET name = ?1, description = ?2, key_prefix = ?3,
             next_issue_number = ?4, next_sprint_number = ?5, member_count = ?6
             WHERE code = ?7",
            params![
                workspace.name,
                workspace.description,
                workspace.key_prefix,
                workspace.next_issue_number,
                workspace.next_sprint_number,
                workspace.member_count,
                workspace.code,
            ],
        )?;
        if self.conn.changes() == 0 {
            return Err(Error::WorkspaceNotFound(workspace.code.clone()));
        }
        Ok(())
    }

    /// Workspaces the member belongs to, oldest membership first.
    pub fn list_workspaces_for_member(&self, member_id: i64) -> Result<Vec<Workspace>> {
        let mut stmt = self.conn.prepare(
            "SELECT w.id, w.code, w.name, w.description, w.key_prefix, w.next_issue_number,
                    w.next_sprint_number, w.member_count, w.created_at
             FROM workspaces w JOIN workspace_members wm ON wm.workspace_code = w.code
             WHERE wm.member_id = ?1 AND wm.removed_at IS NULL ORDER BY wm.id",
        )?;
        let workspaces = stmt
            .query_map(params![member_id], workspace_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(workspaces)
    }

    pub fn insert_workspace_member(&self, wm: &WorkspaceMember) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO workspace_members (member_id, workspace_code, nickname, role,
             position_id, joined_at, removed_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                wm.member_id,
                wm.workspace_code,
                wm.nickname,
                wm.role.as_str(),
                wm.position_id,
                wm.joined_at.to_rfc3339(),
                wm.removed_at.map(|t| t.to_rfc3339()),
            ],
        )?;
        Ok(self.last_insert_rowid())
    }

    pub fn get_workspace_member(&self, id: i64) -> Result<WorkspaceMember> {
        self.conn
            .query_row(
                &format!("SELECT {WORKSPACE_MEMBER_COLUMNS} FROM workspace_members WHERE id = ?1"),
                params![id],
                workspace_member_from_row,
            )
            .optional()?
            .ok_or_else(|| Error::MemberNotFound(format!("workspace member {id}")))
    }

    /// The current seat of `member_id` in `workspace_code`, if any.
    pub fn find_workspace_member(
        &self,
        workspace_code: &str,
        member_id: i64,
    ) -> Result<Option<WorkspaceMember>> {
        Ok(self
            .find_seat_including_removed(workspace_code, member_id)?
            .filter(WorkspaceMember::is_active))
    }

    /// The seat of `member_id` in `workspace_code`, even if they left.
    pub fn find_seat_including_removed(
        &self,
        workspace_code: &str,
        member_id: i64,
    ) -> Result<Option<WorkspaceMember>> {
        let wm = self
            .conn
            .query_row(
                &format!(
                    "SELECT {WORKSPACE_MEMBER_COLUMNS} FROM workspace_members
                     WHERE workspace_code = ?1 AND member_id = ?2"
                ),
                params![workspace_code, member_id],
                workspace_member_from_row,
            )
            .optional()?;
        Ok(wm)
    }

    /// Current members, in joining order.
    pub fn list_workspace_members(&self, workspace_code: &str) -> Result<Vec<WorkspaceMember>> {
        self.query_seats(
            "WHERE workspace_code = ?1 AND removed_at IS NULL ORDER BY id",
            workspace_code,
        )
    }

    /// Every seat ever held in the workspace, former members included.
    pub fn list_workspace_seats(&self, workspace_code: &str) -> Result<Vec<WorkspaceMember>> {
        self.query_seats("WHERE workspace_code = ?1 ORDER BY id", workspace_code)
    }

    fn query_seats(&self, clause: &str, workspace_code: &str) -> Result<Vec<WorkspaceMember>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {WORKSPACE_MEMBER_COLUMNS} FROM workspace_members {clause}"
        ))?;
        let members = stmt
            .query_map(params![workspace_code], workspace_member_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(members)
    }

    /// True if another seat in the workspace, current or former, uses `nickname`.
    pub fn nickname_taken(&self, workspace_code: &str, nickname: &str, except_id: i64) -> Result<bool> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM workspace_members
             WHERE workspace_code = ?1 AND nickname = ?2 AND id != ?3",
            params![workspace_code, nickname, except_id],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    pub fn save_workspace_member(&self, wm: &WorkspaceMember) -> Result<()> {
        self.conn.execute(
            "UPDATE workspace_members SET nickname = ?1, role = ?2, position_id = ?3,
             joined_at = ?4, removed_at = ?5
             WHERE id = ?6",
            params![
                wm.nickname,
                wm.role.as_str(),
                wm.position_id,
                wm.joined_at.to_rfc3339(),
                wm.removed_at.map(|t| t.to_rfc3339()),
                wm.id
            ],
        )?;
        if self.conn.changes() == 0 {
            return Err(Error::MemberNotFound(format!("workspace member {}", wm.id)));
        }
        Ok(())
    }

    pub fn insert_position(&self, position: &Position) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO positions (workspace_code, name, description, color)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                position.workspace_code,
                position.name,
                position.description,
                position.color.as_str(),
            ],
        )?;
        Ok(self.last_insert_rowid())
    }

    pub fn position_name_exists(&self, workspace_code: &str, name: &str) -> Result<bool> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM positions WHERE workspace_code = ?1 AND name = ?2",
            params![workspace_code, name],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    pub fn get_position(&self, id: i64) -> Result<Position> {
        self.conn
            .query_row(
                "SELECT id, workspace_code, name, description, color FROM positions WHERE id = ?1",
                params![id],
                |row| {
                    let color_str: String = row.get(4)?;
                    Ok(Position {
                        id: row.get(0)?,
                        workspace_code: row.get(1)?,
                        name: row.get(2)?,
                        description: row.get(3)?,
                        color: parse_db(&color_str, "color")?,
                    })
                },
            )
            .optional()?
            .ok_or(Error::PositionNotFound(id))
    }

    /// Number of members currently holding the position.
    pub fn count_position_holders(&self, position_id: i64) -> Result<i64> {
        let count = self.conn.query_row(
            "SELECT COUNT(*) FROM workspace_members WHERE position_id = ?1",
            params![position_id],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    pub fn delete_position(&self, id: i64) -> Result<()> {
        self.conn
            .execute("DELETE FROM positions WHERE id = ?1", params![id])?;
        if self.conn.changes() == 0 {
            return Err(Error::PositionNotFound(id));
        }
        Ok(())
    }

    pub fn insert_invitation(&self, invitation: &Invitation) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO invitations (workspace_code, member_id, status, created_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                invitation.workspace_code,
                invitation.member_id,
                invitation.status.as_str(),
                invitation.created_at.to_rfc3339(),
            ],
        )?;
        Ok(self.last_insert_rowid())
    }

    pub fn get_invitation(&self, id: i64) -> Result<Invitation> {
        self.conn
            .query_row(
                "SELECT id, workspace_code, member_id, status, created_at
                 FROM invitations WHERE id = ?1",
                params![id],
                |row| {
                    let status_str: String = row.get(3)?;
                    let created_str: String = row.get(4)?;
                    Ok(Invitation {
                        id: row.get(0)?,
                        workspace_code: row.get(1)?,
                        member_id: row.get(2)?,
                        status: parse_db(&status_str, "status")?,
                        created_at: parse_timestamp(&created_str, "created_at")?,
                    })
                },
            )
            .optional()?
            .ok_or(Error::InvitationNotFound(id))
    }

    pub fn has_pending_invitation(&self, workspace_code: &str, member_id: i64) -> Result<bool> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM invitations
             WHERE workspace_code = ?1 AND member_id = ?2 AND status = 'pending'",
            params![workspace_code, member_id],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    pub fn save_invitation(&self, invitation: &Invitation) -> Result<()> {
        self.conn.execute(
            "UPDATE invitations SET status = ?1 WHERE id = ?2",
            params![invitation.status.as_str(), invitation.id],
        )?;
        if self.conn.changes() == 0 {
            return Err(Error::InvitationNotFound(invitation.id));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "workspaces_tests.rs"]
mod tests;
