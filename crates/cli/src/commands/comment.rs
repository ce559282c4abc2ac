// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use stint_core::IssueService;

use crate::display::format_comments;
use crate::error::Result;

use super::Context;

pub fn add(
    ctx: &mut Context,
    key: &str,
    content: &str,
    review: Option<i64>,
    reply_to: Option<i64>,
) -> Result<()> {
    let actor = ctx.actor()?.id;
    let code = ctx.workspace()?;
    let comment =
        IssueService::new(&mut ctx.db).add_comment(&code, key, actor, review, reply_to, content)?;
    ctx.emit(&comment, || match comment.parent_id {
        Some(parent) => format!("Comment {} on {key} (reply to {parent})", comment.id),
        None => format!("Comment {} on {key}", comment.id),
    })
}

pub fn edit(ctx: &mut Context, id: i64, content: &str) -> Result<()> {
    let actor = ctx.actor()?.id;
    let code = ctx.workspace()?;
    let comment = IssueService::new(&mut ctx.db).update_comment(&code, id, actor, content)?;
    ctx.emit(&comment, || format!("Comment {} updated", comment.id))
}

pub fn delete(ctx: &mut Context, id: i64) -> Result<()> {
    let actor = ctx.actor()?.id;
    let code = ctx.workspace()?;
    let comment = IssueService::new(&mut ctx.db).delete_comment(&code, id, actor)?;
    ctx.emit(&comment, || format!("Comment {} deleted", comment.id))
}

pub fn list(ctx: &mut Context, key: &str) -> Result<()> {
    let actor = ctx.actor()?.id;
    let code = ctx.workspace()?;
    let comments = IssueService::new(&mut ctx.db).comments(&code, key, actor)?;
    let names = ctx.names(&code)?;
    ctx.emit(&comments, || format_comments(&comments, &names))
}

#[cfg(test)]
#[path = "comment_tests.rs"]
mod tests;
