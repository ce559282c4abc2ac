// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use stint_core::{IssueService, ReviewStatus};

use crate::error::Result;

use super::{parse, Context};

pub fn add(ctx: &mut Context, key: &str, login: &str) -> Result<()> {
    let actor = ctx.actor()?.id;
    let code = ctx.workspace()?;
    let seat = ctx.seat_id(&code, login)?;
    let issue = IssueService::new(&mut ctx.db).add_reviewer(&code, key, actor, seat)?;
    ctx.emit(&issue, || format!("Added reviewer {login} to {}", issue.key))
}

pub fn remove(ctx: &mut Context, key: &str, login: &str) -> Result<()> {
    let actor = ctx.actor()?.id;
    let code = ctx.workspace()?;
    let seat = ctx.seat_id(&code, login)?;
    let issue = IssueService::new(&mut ctx.db).remove_reviewer(&code, key, actor, seat)?;
    ctx.emit(&issue, || format!("Removed reviewer {login} from {}", issue.key))
}

/// Open the next review round and move the issue to review.
pub fn request(ctx: &mut Context, key: &str) -> Result<()> {
    let actor = ctx.actor()?.id;
    let code = ctx.workspace()?;
    let issue = IssueService::new(&mut ctx.db).request_review(&code, key, actor)?;
    ctx.emit(&issue, || {
        format!(
            "Requested review round {} on {}",
            issue.current_review_round, issue.key
        )
    })
}

pub fn submit(
    ctx: &mut Context,
    key: &str,
    verdict: &str,
    title: &str,
    content: &str,
) -> Result<()> {
    let verdict = parse::<ReviewStatus>(verdict)?;
    let actor = ctx.actor()?.id;
    let code = ctx.workspace()?;
    let review =
        IssueService::new(&mut ctx.db).submit_review(&code, key, actor, verdict, title, content)?;
    ctx.emit(&review, || {
        format!(
            "Review {} on {key}: {} (round {})",
            review.id, review.status, review.round
        )
    })
}

pub fn status(ctx: &mut Context, review_id: i64, verdict: &str) -> Result<()> {
    let verdict = parse::<ReviewStatus>(verdict)?;
    let actor = ctx.actor()?.id;
    let code = ctx.workspace()?;
    let review =
        IssueService::new(&mut ctx.db).update_review_status(&code, review_id, actor, verdict)?;
    ctx.emit(&review, || format!("Review {} is now {}", review.id, review.status))
}

pub fn edit(
    ctx: &mut Context,
    review_id: i64,
    title: Option<&str>,
    content: Option<&str>,
) -> Result<()> {
    let actor = ctx.actor()?.id;
    let code = ctx.workspace()?;
    let review =
        IssueService::new(&mut ctx.db).update_review(&code, review_id, actor, title, content)?;
    ctx.emit(&review, || format!("Review {}: {}", review.id, review.title))
}

#[cfg(test)]
#[path = "review_tests.rs"]
mod tests;
