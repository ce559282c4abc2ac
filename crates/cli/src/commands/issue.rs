// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use serde::Serialize;

use stint_core::{
    BugSeverity, Difficulty, Event, Issue, IssueDetails, IssueDraft, IssueService, IssueType,
    IssueUpdate, Priority, Status,
};

use crate::cli::{DraftArgs, EditArgs};
use crate::display::{format_issue_details, format_issue_line};
use crate::error::Result;

use super::{parse, parse_date, Context};

#[derive(Serialize)]
struct IssueView {
    #[serde(flatten)]
    issue: Issue,
    parent: Option<String>,
    children: Vec<String>,
    events: Vec<Event>,
}

/// Build a draft from the positional arguments and flags.
///
/// A lone argument is a task title; with two, the first names the type.
pub(crate) fn build_draft(
    type_or_title: &str,
    title: Option<&str>,
    args: &DraftArgs,
) -> Result<IssueDraft> {
    let (issue_type, title) = match title {
        Some(title) => (parse::<IssueType>(type_or_title)?, title),
        None => (IssueType::Task, type_or_title),
    };

    let mut details = IssueDetails::empty(issue_type);
    if let Some(severity) = &args.severity {
        match &mut details {
            IssueDetails::Bug { severity: s, .. } => *s = parse::<BugSeverity>(severity)?,
            _ => {
                return Err(stint_core::Error::InvalidOperation(format!(
                    "only bugs have a severity, not {issue_type}"
                ))
                .into())
            }
        }
    }

    let mut draft = IssueDraft::new(title.trim(), details);
    if let Some(content) = &args.content {
        draft = draft.with_content(content.as_str());
    }
    if let Some(priority) = &args.priority {
        draft = draft.with_priority(parse::<Priority>(priority)?);
    }
    draft.summary = args.summary.clone();
    draft.story_point = args.points;
    draft.due_at = args.due.as_deref().map(parse_date).transpose()?;
    Ok(draft)
}

pub fn new(
    ctx: &mut Context,
    type_or_title: &str,
    title: Option<&str>,
    args: &DraftArgs,
) -> Result<()> {
    let draft = build_draft(type_or_title, title, args)?;
    let actor = ctx.actor()?.id;
    let code = ctx.workspace()?;
    let issue = IssueService::new(&mut ctx.db).create_issue(
        &code,
        actor,
        draft,
        args.parent.as_deref(),
    )?;
    ctx.emit(&issue, || {
        format!("Created [{}] {}: {}", issue.issue_type(), issue.key, issue.title)
    })
}

/// Turn edit flags into an update, parsing enums and dates.
pub(crate) fn build_update(args: &EditArgs) -> Result<IssueUpdate> {
    let day = |value: &str| parse_date(value).map(|at| at.date_naive());
    Ok(IssueUpdate {
        title: args.title.clone(),
        content: args.content.clone(),
        summary: args.summary.clone(),
        due_at: args.due.as_deref().map(parse_date).transpose()?,
        priority: args.priority.as_deref().map(parse::<Priority>).transpose()?,
        story_point: args.points,
        difficulty: args.difficulty.as_deref().map(parse::<Difficulty>).transpose()?,
        business_goal: args.goal.clone(),
        target_release_date: args.release.as_deref().map(day).transpose()?,
        hard_deadline: args.deadline.as_deref().map(day).transpose()?,
        user_story: args.user_story.clone(),
        acceptance_criteria: args.acceptance.clone(),
        reproducing_steps: args.steps.clone(),
        affected_versions: args
            .versions
            .as_ref()
            .map(|versions| versions.iter().map(|v| v.trim().to_string()).collect()),
    })
}

pub fn edit(ctx: &mut Context, key: &str, args: &EditArgs) -> Result<()> {
    let update = build_update(args)?;
    let actor = ctx.actor()?.id;
    let code = ctx.workspace()?;
    let issue = IssueService::new(&mut ctx.db).update_issue(&code, key, actor, update)?;
    ctx.emit(&issue, || format!("Updated {}: {}", issue.key, issue.title))
}

pub fn show(ctx: &mut Context, key: &str) -> Result<()> {
    let actor = ctx.actor()?.id;
    let code = ctx.workspace()?;
    let service = IssueService::new(&mut ctx.db);
    let issue = service.get_issue(&code, key, actor)?;
    let events = service.events(&code, key, actor)?;

    let store = ctx.db.store();
    let parent = issue
        .parent_id
        .map(|id| store.get_issue_by_id(id).map(|p| p.key))
        .transpose()?;
    let children = issue
        .child_ids
        .iter()
        .map(|id| store.get_issue_by_id(*id).map(|c| c.key))
        .collect::<stint_core::Result<Vec<_>>>()?;
    let names = ctx.names(&code)?;

    let view = IssueView {
        issue,
        parent,
        children,
        events,
    };
    ctx.emit(&view, || {
        format_issue_details(
            &view.issue,
            view.parent.as_deref(),
            &view.children,
            &names,
            &view.events,
        )
    })
}

pub fn list(ctx: &mut Context, status: Option<&str>) -> Result<()> {
    let status = status.map(parse::<Status>).transpose()?;
    let actor = ctx.actor()?.id;
    let code = ctx.workspace()?;
    let issues = IssueService::new(&mut ctx.db).list_issues(&code, actor, status)?;
    ctx.emit(&issues, || {
        if issues.is_empty() {
            return "No issues".to_string();
        }
        issues
            .iter()
            .map(format_issue_line)
            .collect::<Vec<_>>()
            .join("\n")
    })
}

pub fn status(ctx: &mut Context, key: &str, status: &str) -> Result<()> {
    let status = parse::<Status>(status)?;
    let actor = ctx.actor()?.id;
    let code = ctx.workspace()?;
    let issue = IssueService::new(&mut ctx.db).update_status(&code, key, actor, status)?;
    ctx.emit(&issue, || format!("{} is now {}", issue.key, issue.status))
}

pub fn severity(ctx: &mut Context, key: &str, severity: &str) -> Result<()> {
    let severity = parse::<BugSeverity>(severity)?;
    let actor = ctx.actor()?.id;
    let code = ctx.workspace()?;
    let issue = IssueService::new(&mut ctx.db).update_severity(&code, key, actor, severity)?;
    ctx.emit(&issue, || {
        format!("{} severity {} (priority {})", issue.key, severity, issue.priority)
    })
}

pub fn parent(ctx: &mut Context, key: &str, parent: &str) -> Result<()> {
    let actor = ctx.actor()?.id;
    let code = ctx.workspace()?;
    let issue = IssueService::new(&mut ctx.db).update_parent(&code, key, parent, actor)?;
    ctx.emit(&issue, || format!("{} moved under {parent}", issue.key))
}

pub fn unparent(ctx: &mut Context, key: &str) -> Result<()> {
    let actor = ctx.actor()?.id;
    let code = ctx.workspace()?;
    let issue = IssueService::new(&mut ctx.db).remove_parent(&code, key, actor)?;
    ctx.emit(&issue, || format!("{} has no parent", issue.key))
}

pub fn assign(ctx: &mut Context, key: &str, login: &str) -> Result<()> {
    let actor = ctx.actor()?.id;
    let code = ctx.workspace()?;
    let seat = ctx.seat_id(&code, login)?;
    let issue = IssueService::new(&mut ctx.db).add_assignee(&code, key, actor, seat)?;
    ctx.emit(&issue, || format!("Assigned {login} to {}", issue.key))
}

pub fn unassign(ctx: &mut Context, key: &str, login: &str) -> Result<()> {
    let actor = ctx.actor()?.id;
    let code = ctx.workspace()?;
    let seat = ctx.seat_id(&code, login)?;
    let issue = IssueService::new(&mut ctx.db).remove_assignee(&code, key, actor, seat)?;
    ctx.emit(&issue, || format!("Unassigned {login} from {}", issue.key))
}

pub fn watch(ctx: &mut Context, key: &str) -> Result<()> {
    let actor = ctx.actor()?.id;
    let code = ctx.workspace()?;
    let issue = IssueService::new(&mut ctx.db).watch(&code, key, actor)?;
    ctx.emit(&issue, || format!("Watching {}", issue.key))
}

pub fn unwatch(ctx: &mut Context, key: &str) -> Result<()> {
    let actor = ctx.actor()?.id;
    let code = ctx.workspace()?;
    let issue = IssueService::new(&mut ctx.db).unwatch(&code, key, actor)?;
    ctx.emit(&issue, || format!("No longer watching {}", issue.key))
}

#[cfg(test)]
#[path = "issue_tests.rs"]
mod tests;
