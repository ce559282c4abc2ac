// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Members, their workspace memberships, invitations and positions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::workspace::Workspace;

/// Maximum number of workspaces a member can own.
pub const MAX_OWNED_WORKSPACES: u32 = 10;

/// Role of a member inside one workspace, from most to least privileged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkspaceRole {
    Owner,
    Admin,
    Manager,
    Collaborator,
    Viewer,
}

impl WorkspaceRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkspaceRole::Owner => "owner",
            WorkspaceRole::Admin => "admin",
            WorkspaceRole::Manager => "manager",
            WorkspaceRole::Collaborator => "collaborator",
            WorkspaceRole::Viewer => "viewer",
        }
    }

    fn level(&self) -> u8 {
        match self {
            WorkspaceRole::Owner => 5,
            WorkspaceRole::Admin => 4,
            WorkspaceRole::Manager => 3,
            WorkspaceRole::Collaborator => 2,
            WorkspaceRole::Viewer => 1,
        }
    }

    pub fn is_at_least(&self, other: WorkspaceRole) -> bool {
        self.level() >= other.level()
    }

    pub fn is_higher_than(&self, other: WorkspaceRole) -> bool {
        self.level() > other.level()
    }
}

impl fmt::Display for WorkspaceRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for WorkspaceRole {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "owner" => Ok(WorkspaceRole::Owner),
            "admin" => Ok(WorkspaceRole::Admin),
            "manager" => Ok(WorkspaceRole::Manager),
            "collaborator" => Ok(WorkspaceRole::Collaborator),
            "viewer" => Ok(WorkspaceRole::Viewer),
            _ => Err(Error::InvalidRole(s.to_string())),
        }
    }
}

/// A registered user, independent of any workspace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub id: i64,
    pub login_id: String,
    pub email: String,
    pub username: String,
    pub owned_workspace_count: u32,
    pub created_at: DateTime<Utc>,
}

impl Member {
    pub fn new(
        login_id: impl Into<String>,
        email: impl Into<String>,
        username: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Member {
            id: 0,
            login_id: login_id.into(),
            email: email.into(),
            username: username.into(),
            owned_workspace_count: 0,
            created_at: now,
        }
    }

    pub fn increase_owned_workspace_count(&mut self) -> Result<()> {
        if self.owned_workspace_count >= MAX_OWNED_WORKSPACES {
            return Err(Error::InvalidOperation(format!(
                "member {} already owns the maximum of {MAX_OWNED_WORKSPACES} workspaces",
                self.login_id
            )));
        }
        self.owned_workspace_count += 1;
        Ok(())
    }

    pub fn decrease_owned_workspace_count(&mut self) {
        self.owned_workspace_count = self.owned_workspace_count.saturating_sub(1);
    }
}

/// A member's seat in one workspace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkspaceMember {
    pub id: i64,
    pub member_id: i64,
    pub workspace_code: String,
    /// Unique within the workspace.
    pub nickname: String,
    pub role: WorkspaceRole,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position_id: Option<i64>,
    pub joined_at: DateTime<Utc>,
    /// Set when the member left or was removed. The row stays so history
    /// keeps resolving the nickname.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub removed_at: Option<DateTime<Utc>>,
}

impl WorkspaceMember {
    /// A new collaborator seat.
    pub fn new(
        member_id: i64,
        workspace_code: impl Into<String>,
        nickname: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        WorkspaceMember {
            id: 0,
            member_id,
            workspace_code: workspace_code.into(),
            nickname: nickname.into(),
            role: WorkspaceRole::Collaborator,
            position_id: None,
            joined_at: now,
            removed_at: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.removed_at.is_none()
    }

    pub fn update_nickname(&mut self, nickname: &str) -> Result<()> {
        let nickname = nickname.trim();
        if nickname.is_empty() {
            return Err(Error::InvalidOperation("nickname cannot be empty".to_string()));
        }
        self.nickname = nickname.to_string();
        Ok(())
    }

    /// Check that this member may remove `target` from the workspace.
    ///
    /// Managers and above remove members ranked strictly below them.
    pub fn validate_can_remove(&self, target: &WorkspaceMember) -> Result<()> {
        if self.id == target.id {
            return Err(Error::InvalidOperation(format!(
                "{} cannot remove themselves; leave the workspace instead",
                self.nickname
            )));
        }
        if !self.role.is_at_least(WorkspaceRole::Manager) || !self.role.is_higher_than(target.role) {
            return Err(Error::Forbidden(format!(
                "{} ({}) cannot remove {} ({})",
                self.nickname, self.role, target.nickname, target.role
            )));
        }
        Ok(())
    }

    /// Give up the seat. The owner must transfer ownership first.
    pub fn remove(&mut self, workspace: &mut Workspace, now: DateTime<Utc>) -> Result<()> {
        if self.role == WorkspaceRole::Owner {
            return Err(Error::InvalidOperation(format!(
                "owner {} cannot leave workspace {}; transfer ownership first",
                self.nickname, self.workspace_code
            )));
        }
        if !self.is_active() {
            return Err(Error::InvalidOperation(format!(
                "{} already left workspace {}",
                self.nickname, self.workspace_code
            )));
        }
        workspace.decrease_member_count()?;
        self.position_id = None;
        self.removed_at = Some(now);
        Ok(())
    }

    /// Take a removed seat again as a fresh collaborator.
    pub fn rejoin(&mut self, workspace: &mut Workspace, now: DateTime<Utc>) -> Result<()> {
        workspace.increase_member_count()?;
        self.role = WorkspaceRole::Collaborator;
        self.joined_at = now;
        self.removed_at = None;
        Ok(())
    }

    /// Assign a role other than owner; ownership moves only by transfer.
    pub fn update_role(&mut self, role: WorkspaceRole) -> Result<()> {
        if role == WorkspaceRole::Owner {
            return Err(Error::InvalidOperation(
                "cannot assign the owner role directly; transfer ownership instead".to_string(),
            ));
        }
        if self.role == WorkspaceRole::Owner {
            return Err(Error::InvalidOperation(format!(
                "cannot change the role of owner {}; transfer ownership first",
                self.nickname
            )));
        }
        self.role = role;
        Ok(())
    }

    /// Check that this member may change `target`'s role to `new_role`.
    pub fn validate_can_change_role(
        &self,
        target: &WorkspaceMember,
        new_role: WorkspaceRole,
    ) -> Result<()> {
        if !self.role.is_at_least(WorkspaceRole::Admin)
            || !self.role.is_higher_than(target.role)
            || new_role.is_higher_than(self.role)
        {
            return Err(Error::Forbidden(format!(
                "{} ({}) cannot change the role of {} ({}) to {}",
                self.nickname, self.role, target.nickname, target.role, new_role
            )));
        }
        Ok(())
    }

    /// Hand the owner seat to `new_owner`; this seat becomes admin.
    pub fn transfer_ownership(
        &mut self,
        owner_member: &mut Member,
        new_owner: &mut WorkspaceMember,
        new_owner_member: &mut Member,
    ) -> Result<()> {
        if self.role != WorkspaceRole::Owner {
            return Err(Error::Forbidden(format!(
                "only the owner can transfer ownership of workspace {}",
                self.workspace_code
            )));
        }
        if new_owner.role == WorkspaceRole::Owner || new_owner.id == self.id {
            return Err(Error::InvalidOperation(format!(
                "{} is already the owner",
                new_owner.nickname
            )));
        }
        if new_owner.workspace_code != self.workspace_code {
            return Err(Error::InvalidOperation(format!(
                "{} does not belong to workspace {}",
                new_owner.nickname, self.workspace_code
            )));
        }

        new_owner_member.increase_owned_workspace_count()?;
        owner_member.decrease_owned_workspace_count();
        new_owner.role = WorkspaceRole::Owner;
        self.role = WorkspaceRole::Admin;
        Ok(())
    }

    /// Assign or clear the member's position.
    pub fn change_position(&mut self, position: Option<&Position>) -> Result<()> {
        match position {
            Some(p) if p.workspace_code != self.workspace_code => {
                Err(Error::PositionNotFound(p.id))
            }
            Some(p) => {
                self.position_id = Some(p.id);
                Ok(())
            }
            None => {
                self.position_id = None;
                Ok(())
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Color {
    Red,
    Orange,
    Yellow,
    Green,
    Blue,
    Indigo,
    Purple,
    Gray,
}

impl Color {
    pub fn as_str(&self) -> &'static str {
        match self {
            Color::Red => "red",
            Color::Orange => "orange",
            Color::Yellow => "yellow",
            Color::Green => "green",
            Color::Blue => "blue",
            Color::Indigo => "indigo",
            Color::Purple => "purple",
            Color::Gray => "gray",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Color {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "red" => Ok(Color::Red),
            "orange" => Ok(Color::Orange),
            "yellow" => Ok(Color::Yellow),
            "green" => Ok(Color::Green),
            "blue" => Ok(Color::Blue),
            "indigo" => Ok(Color::Indigo),
            "purple" => Ok(Color::Purple),
            "gray" | "grey" => Ok(Color::Gray),
            _ => Err(Error::InvalidValue {
                field: "color",
                value: s.to_string(),
            }),
        }
    }
}

/// A named, colored label for members of one workspace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub id: i64,
    pub workspace_code: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub color: Color,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvitationStatus {
    Pending,
    Accepted,
    Rejected,
}

impl InvitationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvitationStatus::Pending => "pending",
            InvitationStatus::Accepted => "accepted",
            InvitationStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for InvitationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for InvitationStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(InvitationStatus::Pending),
            "accepted" => Ok(InvitationStatus::Accepted),
            "rejected" => Ok(InvitationStatus::Rejected),
            _ => Err(Error::InvalidValue {
                field: "invitation status",
                value: s.to_string(),
            }),
        }
    }
}

/// An invitation for a member to join a workspace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invitation {
    pub id: i64,
    pub workspace_code: String,
    pub member_id: i64,
    pub status: InvitationStatus,
    pub created_at: DateTime<Utc>,
}

impl Invitation {
    pub fn new(workspace_code: impl Into<String>, member_id: i64, now: DateTime<Utc>) -> Self {
        Invitation {
            id: 0,
            workspace_code: workspace_code.into(),
            member_id,
            status: InvitationStatus::Pending,
            created_at: now,
        }
    }

    pub fn accept(&mut self) -> Result<()> {
        self.answer(InvitationStatus::Accepted)
    }

    pub fn reject(&mut self) -> Result<()> {
        self.answer(InvitationStatus::Rejected)
    }

    fn answer(&mut self, status: InvitationStatus) -> Result<()> {
        if self.status != InvitationStatus::Pending {
            return Err(Error::InvalidOperation(format!(
                "invitation {} was already {}",
                self.id, self.status
            )));
        }
        self.status = status;
        Ok(())
    }
}

#[cfg(test)]
#[path = "member_tests.rs"]
mod tests;
