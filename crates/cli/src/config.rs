// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! User configuration management.
//!
//! Configuration is stored in `stint.toml` inside the data directory
//! (`$STINT_HOME`, else the platform data dir joined with `stint`):
//! - `database`: path of the SQLite file, relative to the data directory
//! - `log_level`: default tracing filter when `STINT_LOG` is unset
//! - `busy_timeout_ms`: how long a writer waits for the database lock
//! - `default_workspace`: workspace code used when `--workspace` is omitted
//! - `actor`: login of the member acting for CLI calls

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::env;
use crate::error::{Error, Result};

const DATA_DIR_NAME: &str = "stint";
const CONFIG_FILE_NAME: &str = "stint.toml";
const DB_FILE_NAME: &str = "stint.db";
const DEFAULT_LOG_LEVEL: &str = "warn";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub busy_timeout_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_workspace: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actor: Option<String>,
}

/// The directory holding `stint.toml` and, by default, the database.
pub fn data_dir() -> PathBuf {
    if let Some(dir) = env::stint_home() {
        return dir;
    }
    dirs::data_dir()
        .map(|d| d.join(DATA_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from(".stint"))
}

impl Config {
    /// Load `stint.toml` from `dir`. A missing file yields the defaults.
    pub fn load(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILE_NAME);
        if !path.exists() {
            return Ok(Config::default());
        }
        let content = fs::read_to_string(&path)?;
        toml::from_str(&content).map_err(|e| Error::Config(format!("{}: {e}", path.display())))
    }

    pub fn save(&self, dir: &Path) -> Result<()> {
        fs::create_dir_all(dir)?;
        let content = toml::to_string_pretty(self).map_err(|e| Error::Config(e.to_string()))?;
        fs::write(dir.join(CONFIG_FILE_NAME), content)?;
        Ok(())
    }

    /// True once `stint init` has written a config file into `dir`.
    pub fn exists(dir: &Path) -> bool {
        dir.join(CONFIG_FILE_NAME).exists()
    }

    /// Resolve the database path; relative paths are taken from `dir`.
    pub fn db_path(&self, dir: &Path) -> PathBuf {
        match &self.database {
            Some(path) if path.is_absolute() => path.clone(),
            Some(path) => dir.join(path),
            None => dir.join(DB_FILE_NAME),
        }
    }

    pub fn log_level(&self) -> &str {
        self.log_level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)
    }

    pub fn busy_timeout_ms(&self) -> u64 {
        self.busy_timeout_ms
            .unwrap_or(stint_core::db::DEFAULT_BUSY_TIMEOUT_MS)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
