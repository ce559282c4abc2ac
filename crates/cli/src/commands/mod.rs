// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

pub mod comment;
pub mod init;
pub mod issue;
pub mod log;
pub mod member;
pub mod position;
pub mod relation;
pub mod review;
pub mod sprint;
#[cfg(test)]
#[path = "mod_tests.rs"]
pub mod testing;
pub mod workspace;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use std::path::PathBuf;

use stint_core::{Database, Member};

use crate::config::Config;
use crate::display::{names, Names};
use crate::env;
use crate::error::{Error, Result};

/// Flags shared by every command.
#[derive(Debug, Clone, Default)]
pub struct Globals {
    pub actor: Option<String>,
    pub workspace: Option<String>,
    pub json: bool,
}

/// Everything a command needs: the open database, the loaded config and
/// the global flags.
pub struct Context {
    pub db: Database,
    pub config: Config,
    pub data_dir: PathBuf,
    pub globals: Globals,
}

impl Context {
    /// Open the configured database. Fails until `stint init` has run.
    pub fn open(data_dir: PathBuf, config: Config, globals: Globals) -> Result<Self> {
        if !Config::exists(&data_dir) {
            return Err(Error::NotInitialized);
        }
        let db = Database::open_with_timeout(&config.db_path(&data_dir), config.busy_timeout_ms())?;
        Ok(Context {
            db,
            config,
            data_dir,
            globals,
        })
    }

    /// The acting login: `--actor`, then `STINT_ACTOR`, then the config.
    pub fn actor_login(&self) -> Result<String> {
        self.globals
            .actor
            .clone()
            .or_else(env::actor)
            .or_else(|| self.config.actor.clone())
            .ok_or(Error::NoActor)
    }

    pub fn actor(&self) -> Result<Member> {
        let login = self.actor_login()?;
        Ok(self.db.store().get_member_by_login(&login)?)
    }

    /// The selected workspace: `--workspace`, then the config default.
    pub fn workspace(&self) -> Result<String> {
        self.globals
            .workspace
            .clone()
            .or_else(|| self.config.default_workspace.clone())
            .ok_or(Error::NoWorkspace)
    }

    /// Seat id of the member with `login` in `workspace_code`.
    pub fn seat_id(&self, workspace_code: &str, login: &str) -> Result<i64> {
        let store = self.db.store();
        let member = store.get_member_by_login(login)?;
        store
            .find_workspace_member(workspace_code, member.id)?
            .map(|seat| seat.id)
            .ok_or_else(|| {
                stint_core::Error::MemberNotFound(format!("{login} in workspace {workspace_code}"))
                    .into()
            })
    }

    pub fn names(&self, workspace_code: &str) -> Result<Names> {
        Ok(names(&self.db.store().list_workspace_seats(workspace_code)?))
    }

    /// Print `value` as JSON with `--json`, else the text rendering.
    pub fn emit<T: Serialize>(&self, value: &T, text: impl FnOnce() -> String) -> Result<()> {
        if self.globals.json {
            println!("{}", serde_json::to_string_pretty(value)?);
        } else {
            println!("{}", text());
        }
        Ok(())
    }
}

/// Parse a `YYYY-MM-DD` date as midnight UTC.
pub fn parse_date(value: &str) -> Result<DateTime<Utc>> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
        .ok_or_else(|| Error::InvalidDate(value.to_string()))
}

/// Parse a domain value, keeping the core error kind.
pub fn parse<T>(value: &str) -> Result<T>
where
    T: std::str::FromStr<Err = stint_core::Error>,
{
    Ok(value.parse::<T>()?)
}
