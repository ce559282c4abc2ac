// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access.
//!
//! The variable name constants are generated by `build.rs` and live in the
//! [`vars`] submodule. Empty values count as unset.

use std::path::PathBuf;

/// Generated environment variable name constants.
pub mod vars {
    include!(concat!(env!("OUT_DIR"), "/env_vars.rs"));
}

fn read(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

/// Switches are on only for the exact value `1`.
fn is_on(value: Option<String>) -> bool {
    value.as_deref() == Some("1")
}

pub fn stint_home() -> Option<PathBuf> {
    read(vars::STINT_HOME).map(PathBuf::from)
}

pub fn log_filter() -> Option<String> {
    read(vars::STINT_LOG)
}

pub fn actor() -> Option<String> {
    read(vars::STINT_ACTOR)
}

pub fn no_color() -> bool {
    is_on(read(vars::NO_COLOR))
}

pub fn force_color() -> bool {
    is_on(read(vars::COLOR))
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
