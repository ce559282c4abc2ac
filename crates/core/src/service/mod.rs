// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Use-cases over the database.
//!
//! Every mutating method runs inside one [`Database::unit_of_work`]: it loads
//! the aggregates it needs, applies domain operations, writes the changes,
//! and records an [`crate::Event`]. A domain error leaves the database
//! untouched. Actors are identified by their member id; the service resolves
//! the actor's seat in the workspace and checks its role.

mod issue;
mod sprint;
mod workspace;

pub use issue::IssueService;
pub use sprint::SprintService;
pub use workspace::WorkspaceService;

use crate::db::Store;
use crate::error::{Error, Result};
use crate::member::{WorkspaceMember, WorkspaceRole};

/// The acting member's seat in `workspace_code`.
fn seat_of(store: &Store<'_>, workspace_code: &str, member_id: i64) -> Result<WorkspaceMember> {
    store
        .find_workspace_member(workspace_code, member_id)?
        .ok_or_else(|| {
            Error::Forbidden(format!(
                "member {member_id} does not belong to workspace {workspace_code}"
            ))
        })
}

/// A current seat in `workspace_code`, looked up by seat id.
fn active_seat(store: &Store<'_>, workspace_code: &str, seat_id: i64) -> Result<WorkspaceMember> {
    let seat = store.get_workspace_member(seat_id)?;
    if seat.workspace_code != workspace_code || !seat.is_active() {
        return Err(Error::MemberNotFound(format!("workspace member {seat_id}")));
    }
    Ok(seat)
}

fn require_role(seat: &WorkspaceMember, role: WorkspaceRole) -> Result<()> {
    if !seat.role.is_at_least(role) {
        return Err(Error::Forbidden(format!(
            "{} is {}; this requires {} or higher",
            seat.nickname, seat.role, role
        )));
    }
    Ok(())
}
