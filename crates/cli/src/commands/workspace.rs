// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use stint_core::WorkspaceService;

use crate::display::{format_member_line, format_workspace};
use crate::error::Result;

use super::Context;

pub fn create(
    ctx: &mut Context,
    name: &str,
    prefix: &str,
    description: Option<String>,
) -> Result<()> {
    let actor = ctx.actor()?;
    let workspace =
        WorkspaceService::new(&mut ctx.db).create_workspace(actor.id, name, description, prefix)?;

    // The first workspace becomes the default.
    if ctx.config.default_workspace.is_none() {
        ctx.config.default_workspace = Some(workspace.code.clone());
        ctx.config.save(&ctx.data_dir)?;
    }

    ctx.emit(&workspace, || {
        format!("Created workspace {} ({})", workspace.code, workspace.key_prefix)
    })
}

pub fn show(ctx: &mut Context) -> Result<()> {
    let actor = ctx.actor()?;
    let code = ctx.workspace()?;
    let workspace = WorkspaceService::new(&mut ctx.db).get_workspace(&code, actor.id)?;
    ctx.emit(&workspace, || format_workspace(&workspace))
}

pub fn edit(
    ctx: &mut Context,
    name: Option<&str>,
    description: Option<String>,
    prefix: Option<&str>,
) -> Result<()> {
    let actor = ctx.actor()?;
    let code = ctx.workspace()?;
    let workspace = WorkspaceService::new(&mut ctx.db)
        .update_workspace(&code, actor.id, name, description, prefix)?;
    ctx.emit(&workspace, || format_workspace(&workspace))
}

pub fn list(ctx: &mut Context) -> Result<()> {
    let actor = ctx.actor()?;
    let workspaces = WorkspaceService::new(&mut ctx.db).list_workspaces(actor.id)?;
    let default = ctx.config.default_workspace.clone();
    ctx.emit(&workspaces, || {
        workspaces
            .iter()
            .map(|w| {
                let marker = if default.as_deref() == Some(w.code.as_str()) { "*" } else { " " };
                format!("{marker} {} {} ({})", w.code, w.name, w.key_prefix)
            })
            .collect::<Vec<_>>()
            .join("\n")
    })
}

/// Make `code` the default workspace. The actor must belong to it.
pub fn use_workspace(ctx: &mut Context, code: &str) -> Result<()> {
    let actor = ctx.actor()?;
    let workspace = WorkspaceService::new(&mut ctx.db).get_workspace(code, actor.id)?;
    ctx.config.default_workspace = Some(workspace.code.clone());
    ctx.config.save(&ctx.data_dir)?;
    ctx.emit(&workspace, || format!("Using workspace {} ({})", workspace.code, workspace.name))
}

pub fn members(ctx: &mut Context) -> Result<()> {
    let actor = ctx.actor()?;
    let code = ctx.workspace()?;
    let members = WorkspaceService::new(&mut ctx.db).list_members(&code, actor.id)?;
    ctx.emit(&members, || {
        members
            .iter()
            .map(format_member_line)
            .collect::<Vec<_>>()
            .join("\n")
    })
}

#[cfg(test)]
#[path = "workspace_tests.rs"]
mod tests;
