// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use stint_core::{WorkspaceRole, WorkspaceService};

use crate::display::format_member_line;
use crate::error::Result;

use super::{parse, Context};

pub fn register(ctx: &mut Context, login: &str, email: &str, name: Option<&str>) -> Result<()> {
    let member =
        WorkspaceService::new(&mut ctx.db).register_member(login, email, name.unwrap_or(login))?;
    ctx.emit(&member, || format!("Registered {} <{}>", member.login_id, member.email))
}

pub fn invite(ctx: &mut Context, login: &str) -> Result<()> {
    let actor = ctx.actor()?.id;
    let code = ctx.workspace()?;
    let mut service = WorkspaceService::new(&mut ctx.db);
    let invitee = service.get_member_by_login(login)?;
    let invitation = service.invite(&code, actor, invitee.id)?;
    ctx.emit(&invitation, || {
        format!("Invited {login} to {code} (invitation {})", invitation.id)
    })
}

pub fn accept(ctx: &mut Context, invitation: i64) -> Result<()> {
    let actor = ctx.actor()?.id;
    let seat = WorkspaceService::new(&mut ctx.db).accept_invitation(invitation, actor)?;
    ctx.emit(&seat, || {
        format!("Joined {} as {}", seat.workspace_code, seat.role)
    })
}

pub fn reject(ctx: &mut Context, invitation: i64) -> Result<()> {
    let actor = ctx.actor()?.id;
    let invitation = WorkspaceService::new(&mut ctx.db).reject_invitation(invitation, actor)?;
    ctx.emit(&invitation, || format!("Rejected invitation {}", invitation.id))
}

pub fn role(ctx: &mut Context, login: &str, role: &str) -> Result<()> {
    let role = parse::<WorkspaceRole>(role)?;
    let actor = ctx.actor()?.id;
    let code = ctx.workspace()?;
    let target = ctx.seat_id(&code, login)?;
    let seat = WorkspaceService::new(&mut ctx.db).update_role(&code, actor, target, role)?;
    ctx.emit(&seat, || format_member_line(&seat))
}

pub fn transfer(ctx: &mut Context, login: &str) -> Result<()> {
    let actor = ctx.actor()?.id;
    let code = ctx.workspace()?;
    let target = ctx.seat_id(&code, login)?;
    let seat = WorkspaceService::new(&mut ctx.db).transfer_ownership(&code, actor, target)?;
    ctx.emit(&seat, || format!("{} now owns {code}", seat.nickname))
}

/// Give `login` a position, or clear it when `position` is `None`.
pub fn position(ctx: &mut Context, login: &str, position: Option<i64>) -> Result<()> {
    let actor = ctx.actor()?.id;
    let code = ctx.workspace()?;
    let target = ctx.seat_id(&code, login)?;
    let seat = WorkspaceService::new(&mut ctx.db).assign_position(&code, actor, target, position)?;
    ctx.emit(&seat, || format_member_line(&seat))
}

pub fn remove(ctx: &mut Context, login: &str) -> Result<()> {
    let actor = ctx.actor()?.id;
    let code = ctx.workspace()?;
    let target = ctx.seat_id(&code, login)?;
    let seat = WorkspaceService::new(&mut ctx.db).remove_member(&code, actor, target)?;
    ctx.emit(&seat, || format!("Removed {} from {code}", seat.nickname))
}

/// Leave the workspace. When the configured actor leaves their default
/// workspace, the default is cleared.
pub fn leave(ctx: &mut Context) -> Result<()> {
    let actor = ctx.actor()?;
    let code = ctx.workspace()?;
    let seat = WorkspaceService::new(&mut ctx.db).leave_workspace(&code, actor.id)?;
    if ctx.config.actor.as_deref() == Some(actor.login_id.as_str())
        && ctx.config.default_workspace.as_deref() == Some(code.as_str())
    {
        ctx.config.default_workspace = None;
        ctx.config.save(&ctx.data_dir)?;
    }
    ctx.emit(&seat, || format!("Left {code}"))
}

pub fn nickname(ctx: &mut Context, nickname: &str) -> Result<()> {
    let actor = ctx.actor()?.id;
    let code = ctx.workspace()?;
    let seat = WorkspaceService::new(&mut ctx.db).update_nickname(&code, actor, nickname)?;
    ctx.emit(&seat, || format!("You are {} in {code}", seat.nickname))
}

#[cfg(test)]
#[path = "member_tests.rs"]
mod tests;
