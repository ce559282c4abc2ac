// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use chrono::Utc;

use crate::db::{Database, Store};
use crate::error::{Error, Result};
use crate::keys::generate_unique_code;
use crate::member::{Color, Invitation, Member, Position, WorkspaceMember, WorkspaceRole};
use crate::workspace::Workspace;

use super::{active_seat, require_role, seat_of};

/// Members, workspaces, invitations, roles and positions.
pub struct WorkspaceService<'a> {
    db: &'a mut Database,
}

impl<'a> WorkspaceService<'a> {
    pub fn new(db: &'a mut Database) -> Self {
        WorkspaceService { db }
    }

    /// Register a member under a unique login.
    pub fn register_member(&mut self, login_id: &str, email: &str, username: &str) -> Result<Member> {
        let member = self.db.unit_of_work(|store| {
            match store.get_member_by_login(login_id) {
                Ok(_) => {
                    return Err(Error::InvalidOperation(format!(
                        "login {login_id} is already registered"
                    )))
                }
                Err(Error::MemberNotFound(_)) => {}
                Err(e) => return Err(e),
            }
            if store.member_email_exists(email)? {
                return Err(Error::InvalidOperation(format!("email {email} is already registered")));
            }
            let mut member = Member::new(login_id, email, username, Utc::now());
            member.id = store.insert_member(&member)?;
            Ok(member)
        })?;

        tracing::info!(member = member.id, login = %member.login_id, "member registered");
        Ok(member)
    }

    pub fn get_member_by_login(&self, login_id: &str) -> Result<Member> {
        self.db.store().get_member_by_login(login_id)
    }

    /// Create a workspace owned by `owner_id` under a freshly generated code.
    pub fn create_workspace(
        &mut self,
        owner_id: i64,
        name: &str,
        description: Option<String>,
        key_prefix: &str,
    ) -> Result<Workspace> {
        let workspace = self.db.unit_of_work(|store| {
            let mut owner = store.get_member(owner_id)?;
            owner.increase_owned_workspace_count()?;

            let now = Utc::now();
            let code = generate_unique_code(name, &now, |code| store.workspace_code_exists(code))?;
            let mut workspace = Workspace::new(code, name, description, key_prefix, now)?;
            workspace.increase_member_count()?;
            workspace.id = store.insert_workspace(&workspace)?;

            let mut seat = WorkspaceMember::new(owner.id, workspace.code.clone(), owner.login_id.clone(), now);
            seat.role = WorkspaceRole::Owner;
            store.insert_workspace_member(&seat)?;
            store.save_member(&owner)?;
            Ok(workspace)
        })?;

        tracing::info!(code = %workspace.code, prefix = %workspace.key_prefix, "workspace created");
        Ok(workspace)
    }

    /// Rename, describe or re-prefix a workspace. Requires admin or higher.
    pub fn update_workspace(
        &mut self,
        code: &str,
        actor_id: i64,
        name: Option<&str>,
        description: Option<String>,
        key_prefix: Option<&str>,
    ) -> Result<Workspace> {
        let workspace = self.db.unit_of_work(|store| {
            let seat = seat_of(store, code, actor_id)?;
            require_role(&seat, WorkspaceRole::Admin)?;
            let mut workspace = store.get_workspace(code)?;
            if let Some(name) = name {
                workspace.rename(name)?;
            }
            if let Some(description) = description {
                workspace.description = Some(description).filter(|d| !d.trim().is_empty());
            }
            if let Some(key_prefix) = key_prefix {
                workspace.update_key_prefix(key_prefix)?;
            }
            store.save_workspace(&workspace)?;
            Ok(workspace)
        })?;

        tracing::info!(code = %workspace.code, prefix = %workspace.key_prefix, "workspace updated");
        Ok(workspace)
    }

    pub fn get_workspace(&self, code: &str, actor_id: i64) -> Result<Workspace> {
        let store = self.db.store();
        seat_of(&store, code, actor_id)?;
        store.get_workspace(code)
    }

    pub fn list_workspaces(&self, member_id: i64) -> Result<Vec<Workspace>> {
        self.db.store().list_workspaces_for_member(member_id)
    }

    pub fn list_members(&self, code: &str, actor_id: i64) -> Result<Vec<WorkspaceMember>> {
        let store = self.db.store();
        seat_of(&store, code, actor_id)?;
        store.list_workspace_members(code)
    }

    /// Invite `invitee_id` to the workspace. Requires manager or higher.
    pub fn invite(&mut self, code: &str, actor_id: i64, invitee_id: i64) -> Result<Invitation> {
        let invitation = self.db.unit_of_work(|store| {
            let seat = seat_of(store, code, actor_id)?;
            require_role(&seat, WorkspaceRole::Manager)?;
            let invitee = store.get_member(invitee_id)?;

            if store.find_workspace_member(code, invitee.id)?.is_some() {
                return Err(Error::InvalidOperation(format!(
                    "{} is already a member of workspace {code}",
                    invitee.login_id
                )));
            }
            if store.has_pending_invitation(code, invitee.id)? {
                return Err(Error::InvalidOperation(format!(
                    "{} already has a pending invitation to workspace {code}",
                    invitee.login_id
                )));
            }

            let mut invitation = Invitation::new(code, invitee.id, Utc::now());
            invitation.id = store.insert_invitation(&invitation)?;
            Ok(invitation)
        })?;

        tracing::info!(invitation = invitation.id, workspace = %code, "member invited");
        Ok(invitation)
    }

    /// Accept an invitation addressed to `actor_id`, joining as collaborator.
    pub fn accept_invitation(&mut self, invitation_id: i64, actor_id: i64) -> Result<WorkspaceMember> {
        let seat = self.db.unit_of_work(|store| {
            let mut invitation = store.get_invitation(invitation_id)?;
            if invitation.member_id != actor_id {
                return Err(Error::Forbidden(format!(
                    "invitation {invitation_id} is not addressed to member {actor_id}"
                )));
            }
            invitation.accept()?;

            let mut workspace = store.get_workspace(&invitation.workspace_code)?;
            let member = store.get_member(actor_id)?;
            let now = Utc::now();

            let seat = match store.find_seat_including_removed(&workspace.code, member.id)? {
                Some(mut seat) if !seat.is_active() => {
                    seat.rejoin(&mut workspace, now)?;
                    store.save_workspace_member(&seat)?;
                    seat
                }
                Some(_) => {
                    return Err(Error::InvalidOperation(format!(
                        "{} is already a member of workspace {}",
                        member.login_id, workspace.code
                    )))
                }
                None => {
                    if store.nickname_taken(&workspace.code, &member.login_id, 0)? {
                        return Err(Error::InvalidOperation(format!(
                            "nickname {} is already used in workspace {}",
                            member.login_id, workspace.code
                        )));
                    }
                    workspace.increase_member_count()?;
                    let mut seat = WorkspaceMember::new(
                        member.id,
                        workspace.code.clone(),
                        member.login_id.clone(),
                        now,
                    );
                    seat.id = store.insert_workspace_member(&seat)?;
                    seat
                }
            };
            store.save_workspace(&workspace)?;
            store.save_invitation(&invitation)?;
            Ok(seat)
        })?;

        tracing::info!(workspace = %seat.workspace_code, member = seat.member_id, "invitation accepted");
        Ok(seat)
    }

    pub fn reject_invitation(&mut self, invitation_id: i64, actor_id: i64) -> Result<Invitation> {
        self.db.unit_of_work(|store| {
            let mut invitation = store.get_invitation(invitation_id)?;
            if invitation.member_id != actor_id {
                return Err(Error::Forbidden(format!(
                    "invitation {invitation_id} is not addressed to member {actor_id}"
                )));
            }
            invitation.reject()?;
            store.save_invitation(&invitation)?;
            tracing::info!(invitation = invitation_id, "invitation rejected");
            Ok(invitation)
        })
    }

    /// Change another member's role. Ownership moves only by transfer.
    pub fn update_role(
        &mut self,
        code: &str,
        actor_id: i64,
        target_seat_id: i64,
        role: WorkspaceRole,
    ) -> Result<WorkspaceMember> {
        let target = self.db.unit_of_work(|store| {
            let seat = seat_of(store, code, actor_id)?;
            let mut target = active_seat(store, code, target_seat_id)?;
            seat.validate_can_change_role(&target, role)?;
            target.update_role(role)?;
            store.save_workspace_member(&target)?;
            Ok(target)
        })?;

        tracing::info!(member = %target.nickname, role = %target.role, "role updated");
        Ok(target)
    }

    /// Hand the workspace to another member; the current owner becomes admin.
    pub fn transfer_ownership(
        &mut self,
        code: &str,
        actor_id: i64,
        new_owner_seat_id: i64,
    ) -> Result<WorkspaceMember> {
        let new_owner = self.db.unit_of_work(|store| {
            let mut seat = seat_of(store, code, actor_id)?;
            let mut new_owner = active_seat(store, code, new_owner_seat_id)?;
            let mut owner_member = store.get_member(seat.member_id)?;
            let mut new_owner_member = store.get_member(new_owner.member_id)?;

            seat.transfer_ownership(&mut owner_member, &mut new_owner, &mut new_owner_member)?;
            store.save_workspace_member(&seat)?;
            store.save_workspace_member(&new_owner)?;
            store.save_member(&owner_member)?;
            store.save_member(&new_owner_member)?;
            Ok(new_owner)
        })?;

        tracing::info!(workspace = %code, owner = %new_owner.nickname, "ownership transferred");
        Ok(new_owner)
    }

    /// Remove another member's seat. Their open assignments, watches and
    /// unreviewed reviewer slots go with it.
    pub fn remove_member(&mut self, code: &str, actor_id: i64, target_seat_id: i64) -> Result<WorkspaceMember> {
        let target = self.db.unit_of_work(|store| {
            let seat = seat_of(store, code, actor_id)?;
            let mut target = active_seat(store, code, target_seat_id)?;
            seat.validate_can_remove(&target)?;
            vacate(store, code, &mut target)?;
            Ok(target)
        })?;

        tracing::info!(workspace = %code, member = %target.nickname, "member removed");
        Ok(target)
    }

    /// Give up the actor's own seat. The owner has to transfer first.
    pub fn leave_workspace(&mut self, code: &str, actor_id: i64) -> Result<WorkspaceMember> {
        let seat = self.db.unit_of_work(|store| {
            let mut seat = seat_of(store, code, actor_id)?;
            vacate(store, code, &mut seat)?;
            Ok(seat)
        })?;

        tracing::info!(workspace = %code, member = %seat.nickname, "member left");
        Ok(seat)
    }

    /// Change the actor's nickname in one workspace.
    pub fn update_nickname(&mut self, code: &str, actor_id: i64, nickname: &str) -> Result<WorkspaceMember> {
        let seat = self.db.unit_of_work(|store| {
            let mut seat = seat_of(store, code, actor_id)?;
            seat.update_nickname(nickname)?;
            if store.nickname_taken(code, &seat.nickname, seat.id)? {
                return Err(Error::InvalidOperation(format!(
                    "nickname {} is already used in workspace {code}",
                    seat.nickname
                )));
            }
            store.save_workspace_member(&seat)?;
            Ok(seat)
        })?;

        tracing::info!(workspace = %code, nickname = %seat.nickname, "nickname updated");
        Ok(seat)
    }

    pub fn create_position(
        &mut self,
        code: &str,
        actor_id: i64,
        name: &str,
        description: Option<String>,
        color: Color,
    ) -> Result<Position> {
        self.db.unit_of_work(|store| {
            let seat = seat_of(store, code, actor_id)?;
            require_role(&seat, WorkspaceRole::Manager)?;
            store.get_workspace(code)?;
            if store.position_name_exists(code, name)? {
                return Err(Error::InvalidOperation(format!(
                    "position {name} already exists in workspace {code}"
                )));
            }
            let mut position = Position {
                id: 0,
                workspace_code: code.to_string(),
                name: name.to_string(),
                description,
                color,
            };
            position.id = store.insert_position(&position)?;
            tracing::info!(position = position.id, name = %position.name, "position created");
            Ok(position)
        })
    }

    /// Delete a position no member holds.
    pub fn delete_position(&mut self, code: &str, actor_id: i64, position_id: i64) -> Result<()> {
        self.db.unit_of_work(|store| {
            let seat = seat_of(store, code, actor_id)?;
            require_role(&seat, WorkspaceRole::Manager)?;
            let position = store.get_position(position_id)?;
            if position.workspace_code != code {
                return Err(Error::PositionNotFound(position_id));
            }
            let holders = store.count_position_holders(position_id)?;
            if holders > 0 {
                return Err(Error::InvalidOperation(format!(
                    "position {} is held by {holders} member(s)",
                    position.name
                )));
            }
            store.delete_position(position_id)?;
            tracing::info!(position = position_id, "position deleted");
            Ok(())
        })
    }

    /// Set or clear a member's position.
    pub fn assign_position(
        &mut self,
        code: &str,
        actor_id: i64,
        target_seat_id: i64,
        position_id: Option<i64>,
    ) -> Result<WorkspaceMember> {
        self.db.unit_of_work(|store| {
            let seat = seat_of(store, code, actor_id)?;
            require_role(&seat, WorkspaceRole::Manager)?;
            let mut target = active_seat(store, code, target_seat_id)?;
            let position = position_id.map(|id| store.get_position(id)).transpose()?;
            target.change_position(position.as_ref())?;
            store.save_workspace_member(&target)?;
            Ok(target)
        })
    }
}

fn vacate(store: &Store<'_>, code: &str, seat: &mut WorkspaceMember) -> Result<()> {
    let mut workspace = store.get_workspace(code)?;
    seat.remove(&mut workspace, Utc::now())?;
    let cleared = store.clear_participation(seat.id)?;
    store.save_workspace_member(seat)?;
    store.save_workspace(&workspace)?;
    tracing::debug!(seat = seat.id, cleared, "participation cleared");
    Ok(())
}

#[cfg(test)]
#[path = "workspace_tests.rs"]
mod tests;
