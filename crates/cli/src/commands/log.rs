// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::collections::HashMap;

use stint_core::IssueService;

use crate::display::{format_event, format_event_with_key};
use crate::error::Result;

use super::Context;

/// Show the newest `limit` events of one issue, or of the whole workspace.
pub fn run(ctx: &mut Context, key: Option<&str>, limit: usize) -> Result<()> {
    let actor = ctx.actor()?.id;
    let code = ctx.workspace()?;
    let names = ctx.names(&code)?;
    let service = IssueService::new(&mut ctx.db);

    match key {
        Some(key) => {
            let mut events = service.events(&code, key, actor)?;
            events.reverse();
            events.truncate(limit);
            ctx.emit(&events, || {
                if events.is_empty() {
                    return format!("No events for {key}");
                }
                events
                    .iter()
                    .map(|e| format_event(e, &names))
                    .collect::<Vec<_>>()
                    .join("\n")
            })
        }
        None => {
            let events = service.recent_events(&code, actor, limit)?;
            let store = ctx.db.store();
            let mut keys: HashMap<i64, String> = HashMap::new();
            for event in &events {
                if !keys.contains_key(&event.issue_id) {
                    keys.insert(event.issue_id, store.get_issue_by_id(event.issue_id)?.key);
                }
            }
            ctx.emit(&events, || {
                if events.is_empty() {
                    return "No events".to_string();
                }
                events
                    .iter()
                    .map(|e| {
                        let key = keys.get(&e.issue_id).map(String::as_str).unwrap_or("?");
                        format_event_with_key(e, key, &names)
                    })
                    .collect::<Vec<_>>()
                    .join("\n")
            })
        }
    }
}

#[cfg(test)]
#[path = "log_tests.rs"]
mod tests;
