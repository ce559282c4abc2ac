// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use stint_core::{IssueService, RelationType};

use crate::error::Result;

use super::{parse, Context};

/// Relate `source` to `target`, e.g. `PROJ-1 blocks PROJ-2`.
pub fn relate(ctx: &mut Context, source: &str, relation: &str, target: &str) -> Result<()> {
    let relation = parse::<RelationType>(relation)?;
    let actor = ctx.actor()?.id;
    let code = ctx.workspace()?;
    let issue =
        IssueService::new(&mut ctx.db).add_relation(&code, source, target, relation, actor)?;
    ctx.emit(&issue, || format!("{} {relation} {target}", issue.key))
}

pub fn unrelate(ctx: &mut Context, source: &str, target: &str) -> Result<()> {
    let actor = ctx.actor()?.id;
    let code = ctx.workspace()?;
    let issue = IssueService::new(&mut ctx.db).remove_relation(&code, source, target, actor)?;
    ctx.emit(&issue, || format!("{} no longer related to {target}", issue.key))
}

#[cfg(test)]
#[path = "relation_tests.rs"]
mod tests;
