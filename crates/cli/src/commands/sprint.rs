// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use serde::Serialize;

use stint_core::{Sprint, SprintService, SprintStatus, SprintUpdate};

use crate::display::format_sprint;
use crate::error::Result;

use super::{parse_date, Context};

#[derive(Serialize)]
struct SprintView {
    #[serde(flatten)]
    sprint: Sprint,
    issues: Vec<String>,
}

pub fn new(
    ctx: &mut Context,
    title: &str,
    start: &str,
    end: &str,
    goal: Option<String>,
) -> Result<()> {
    let start = parse_date(start)?;
    let end = parse_date(end)?;
    let actor = ctx.actor()?.id;
    let code = ctx.workspace()?;
    let sprint =
        SprintService::new(&mut ctx.db).create_sprint(&code, actor, title, goal, start, end)?;
    ctx.emit(&sprint, || format!("Created sprint {}: {}", sprint.key, sprint.title))
}

pub fn show(ctx: &mut Context, key: &str) -> Result<()> {
    let actor = ctx.actor()?.id;
    let code = ctx.workspace()?;
    let sprint = SprintService::new(&mut ctx.db).get_sprint(&code, key, actor)?;
    let store = ctx.db.store();
    let issues = sprint
        .issue_ids
        .iter()
        .map(|id| store.get_issue_by_id(*id).map(|i| i.key))
        .collect::<stint_core::Result<Vec<_>>>()?;

    let view = SprintView { sprint, issues };
    ctx.emit(&view, || format_sprint(&view.sprint, &view.issues))
}

pub fn edit(
    ctx: &mut Context,
    key: &str,
    title: Option<String>,
    goal: Option<String>,
    start: Option<&str>,
    end: Option<&str>,
) -> Result<()> {
    let update = SprintUpdate {
        title,
        goal,
        start_at: start.map(parse_date).transpose()?,
        end_at: end.map(parse_date).transpose()?,
    };
    let actor = ctx.actor()?.id;
    let code = ctx.workspace()?;
    let sprint = SprintService::new(&mut ctx.db).update_sprint(&code, key, actor, update)?;
    ctx.emit(&sprint, || format_sprint(&sprint, &[]))
}

pub fn add(ctx: &mut Context, sprint: &str, issue: &str) -> Result<()> {
    let actor = ctx.actor()?.id;
    let code = ctx.workspace()?;
    let sprint = SprintService::new(&mut ctx.db).add_issue(&code, sprint, issue, actor)?;
    ctx.emit(&sprint, || format!("Added {issue} to {}", sprint.key))
}

pub fn remove(ctx: &mut Context, sprint: &str, issue: &str) -> Result<()> {
    let actor = ctx.actor()?.id;
    let code = ctx.workspace()?;
    let sprint = SprintService::new(&mut ctx.db).remove_issue(&code, sprint, issue, actor)?;
    ctx.emit(&sprint, || format!("Removed {issue} from {}", sprint.key))
}

/// Move a sprint to `status`; backs `start`, `complete` and `cancel`.
pub fn transition(ctx: &mut Context, key: &str, status: SprintStatus) -> Result<()> {
    let actor = ctx.actor()?.id;
    let code = ctx.workspace()?;
    let sprint = SprintService::new(&mut ctx.db).update_status(&code, key, actor, status)?;
    ctx.emit(&sprint, || format!("{} is now {}", sprint.key, sprint.status))
}

#[cfg(test)]
#[path = "sprint_tests.rs"]
mod tests;
