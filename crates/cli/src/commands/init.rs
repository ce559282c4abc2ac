// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::path::{Path, PathBuf};

use stint_core::{Database, Member, WorkspaceService};

use crate::config::Config;
use crate::error::{Error, Result};

use super::Globals;

pub fn run(
    data_dir: &Path,
    globals: &Globals,
    login: &str,
    email: &str,
    name: Option<&str>,
    database: Option<PathBuf>,
) -> Result<()> {
    if Config::exists(data_dir) {
        return Err(Error::AlreadyInitialized(data_dir.display().to_string()));
    }

    let config = Config {
        database,
        actor: Some(login.to_string()),
        ..Config::default()
    };
    let mut db = Database::open_with_timeout(&config.db_path(data_dir), config.busy_timeout_ms())?;
    let member = register_or_reuse(&mut db, login, email, name)?;
    config.save(data_dir)?;

    if globals.json {
        println!("{}", serde_json::to_string_pretty(&member)?);
    } else {
        println!("Initialized stint in {}", data_dir.display());
        println!("Acting as {} <{}>", member.login_id, member.email);
    }
    Ok(())
}

/// Register `login`, or pick up an existing registration when the database
/// outlived its config file.
pub(crate) fn register_or_reuse(
    db: &mut Database,
    login: &str,
    email: &str,
    name: Option<&str>,
) -> Result<Member> {
    match db.store().get_member_by_login(login) {
        Ok(member) => return Ok(member),
        Err(stint_core::Error::MemberNotFound(_)) => {}
        Err(e) => return Err(e.into()),
    }
    let member = WorkspaceService::new(db).register_member(login, email, name.unwrap_or(login))?;
    Ok(member)
}

#[cfg(test)]
#[path = "init_tests.rs"]
mod tests;
