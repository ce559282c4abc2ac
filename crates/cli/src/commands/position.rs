// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use serde_json::json;
use stint_core::{Color, WorkspaceService};

use crate::error::Result;

use super::{parse, Context};

pub fn create(
    ctx: &mut Context,
    name: &str,
    color: &str,
    description: Option<String>,
) -> Result<()> {
    let color = parse::<Color>(color)?;
    let actor = ctx.actor()?.id;
    let code = ctx.workspace()?;
    let position =
        WorkspaceService::new(&mut ctx.db).create_position(&code, actor, name, description, color)?;
    ctx.emit(&position, || {
        format!("Created position {} {} ({})", position.id, position.name, position.color)
    })
}

pub fn delete(ctx: &mut Context, id: i64) -> Result<()> {
    let actor = ctx.actor()?.id;
    let code = ctx.workspace()?;
    WorkspaceService::new(&mut ctx.db).delete_position(&code, actor, id)?;
    ctx.emit(&json!({ "deleted": id }), || format!("Deleted position {id}"))
}

#[cfg(test)]
#[path = "position_tests.rs"]
mod tests;
