// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::collections::HashMap;

use stint_core::{Action, Comment, Event, Issue, Sprint, Workspace, WorkspaceMember};

use crate::colors;

/// Seat id to nickname, for rendering member references.
pub type Names = HashMap<i64, String>;

pub fn names(members: &[WorkspaceMember]) -> Names {
    members.iter().map(|m| (m.id, m.nickname.clone())).collect()
}

fn name(names: &Names, seat_id: i64) -> String {
    names
        .get(&seat_id)
        .cloned()
        .unwrap_or_else(|| format!("#{seat_id}"))
}

/// Format a single issue line for list output
pub fn format_issue_line(issue: &Issue) -> String {
    format!(
        "- [{}] ({}) {}: {}",
        issue.issue_type(),
        colors::status(issue.status),
        issue.key,
        issue.title
    )
}

/// Format issue details for the show command
pub fn format_issue_details(
    issue: &Issue,
    parent_key: Option<&str>,
    child_keys: &[String],
    names: &Names,
    events: &[Event],
) -> String {
    let mut output = Vec::new();

    output.push(format!("[{}] {}", issue.issue_type(), issue.key));
    output.push(format!("Title: {}", issue.title));
    output.push(format!("Status: {}", colors::status(issue.status)));
    output.push(format!("Priority: {}", issue.priority));
    if let Some(points) = issue.story_point {
        output.push(format!("Points: {points}"));
    }
    if let Some(due) = issue.due_at {
        output.push(format!("Due: {}", due.format("%Y-%m-%d")));
    }
    if let Some(author) = issue.created_by {
        output.push(format!("Author: {}", name(names, author)));
    }
    output.push(format!(
        "Created: {}",
        issue.created_at.format("%Y-%m-%d %H:%M")
    ));
    output.push(format!(
        "Updated: {}",
        issue.updated_at.format("%Y-%m-%d %H:%M")
    ));

    if let Some(summary) = &issue.summary {
        output.push(format!("Summary: {summary}"));
    }
    if !issue.content.is_empty() {
        output.push(String::new());
        output.push("Description:".to_string());
        output.extend(issue.content.lines().map(|l| format!("  {l}")));
    }

    if !issue.assignees.is_empty() {
        let assignees: Vec<_> = issue
            .assignees
            .iter()
            .map(|a| name(names, a.member_id))
            .collect();
        output.push(format!("Assignees: {}", assignees.join(", ")));
    }
    if !issue.watchers.is_empty() {
        let watchers: Vec<_> = issue.watchers.iter().map(|w| name(names, *w)).collect();
        output.push(format!("Watchers: {}", watchers.join(", ")));
    }

    if !issue.reviewers.is_empty() {
        output.push(String::new());
        output.push(format!("Reviewers (round {}):", issue.current_review_round));
        for reviewer in &issue.reviewers {
            let verdict = reviewer
                .status_for_round(issue.current_review_round)
                .map(|s| s.to_string())
                .unwrap_or_else(|| "pending".to_string());
            output.push(format!("  - {} ({verdict})", name(names, reviewer.member_id)));
        }
    }

    if let Some(parent) = parent_key {
        output.push(String::new());
        output.push(format!("Parent: {parent}"));
    }
    if !child_keys.is_empty() {
        output.push(String::new());
        output.push("Children:".to_string());
        output.extend(child_keys.iter().map(|k| format!("  - {k}")));
    }

    if !issue.relations.is_empty() {
        output.push(String::new());
        output.push("Relations:".to_string());
        for edge in &issue.relations {
            output.push(format!(
                "  - {} {} ({})",
                edge.relation_type, edge.other_key, edge.other_status
            ));
        }
    }

    let log: Vec<_> = events
        .iter()
        .filter(|e| e.action != Action::Created)
        .collect();
    if !log.is_empty() {
        output.push(String::new());
        output.push("Log:".to_string());
        for event in log {
            output.push(format_event(event, names));
        }
    }

    output.join("\n")
}

/// Format a single event for log output
pub fn format_event(event: &Event, names: &Names) -> String {
    let timestamp = event.created_at.format("%Y-%m-%d %H:%M");
    let mut line = format!("  {}  {}", timestamp, event.action);

    match (&event.old_value, &event.new_value) {
        (Some(old), Some(new)) => line.push_str(&format!(" {old} -> {new}")),
        (None, Some(new)) => line.push_str(&format!(" {new}")),
        (Some(old), None) => line.push_str(&format!(" {old}")),
        (None, None) => {}
    }
    if let Some(actor) = event.actor_id {
        line.push_str(&format!(" (by {})", name(names, actor)));
    }
    line
}

/// Format an event with its issue key, for the workspace log
pub fn format_event_with_key(event: &Event, key: &str, names: &Names) -> String {
    format!("{key}{}", format_event(event, names))
}

pub fn format_workspace(workspace: &Workspace) -> String {
    let mut output = vec![
        format!("{} {}", workspace.code, workspace.name),
        format!("Prefix: {}", workspace.key_prefix),
        format!("Members: {}", workspace.member_count),
        format!("Next key: {}", workspace.issue_key()),
    ];
    if let Some(description) = &workspace.description {
        output.push(format!("Description: {description}"));
    }
    output.join("\n")
}

pub fn format_member_line(member: &WorkspaceMember) -> String {
    match member.position_id {
        Some(position) => format!("- {} ({}, position {})", member.nickname, member.role, position),
        None => format!("- {} ({})", member.nickname, member.role),
    }
}

pub fn format_sprint(sprint: &Sprint, issue_keys: &[String]) -> String {
    let mut output = vec![
        format!("{} {} ({})", sprint.key, sprint.title, sprint.status),
        format!(
            "Dates: {} .. {}",
            sprint.start_at.format("%Y-%m-%d"),
            sprint.end_at.format("%Y-%m-%d")
        ),
    ];
    if let Some(goal) = &sprint.goal {
        output.push(format!("Goal: {goal}"));
    }
    if !issue_keys.is_empty() {
        output.push("Issues:".to_string());
        output.extend(issue_keys.iter().map(|k| format!("  - {k}")));
    }
    output.join("\n")
}

fn format_comment(comment: &Comment, names: &Names) -> String {
    let body = if comment.deleted { "(deleted)" } else { comment.content.as_str() };
    let thread = comment
        .review_id
        .map(|id| format!(" [review {id}]"))
        .unwrap_or_default();
    format!(
        "#{} {} {}{thread}: {body}",
        comment.id,
        name(names, comment.author_id),
        comment.created_at.format("%Y-%m-%d %H:%M"),
    )
}

/// Comments as threads: each top-level comment followed by its replies.
pub fn format_comments(comments: &[Comment], names: &Names) -> String {
    if comments.is_empty() {
        return "No comments".to_string();
    }
    let mut output = Vec::new();
    for top in comments.iter().filter(|c| !c.is_reply()) {
        output.push(format_comment(top, names));
        for reply in comments.iter().filter(|c| c.parent_id == Some(top.id)) {
            output.push(format!("  {}", format_comment(reply, names)));
        }
    }
    output.join("\n")
}

#[cfg(test)]
#[path = "display_tests.rs"]
mod tests;
