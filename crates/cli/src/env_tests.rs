// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use yare::parameterized;

#[test]
fn generated_names_match_variables() {
    assert_eq!(vars::STINT_HOME, "STINT_HOME");
    assert_eq!(vars::STINT_LOG, "STINT_LOG");
    assert_eq!(vars::STINT_ACTOR, "STINT_ACTOR");
    assert_eq!(vars::NO_COLOR, "NO_COLOR");
    assert_eq!(vars::COLOR, "COLOR");
}

#[parameterized(
    one = { Some("1"), true },
    word = { Some("true"), false },
    zero = { Some("0"), false },
    unset = { None, false },
)]
fn switches_need_exact_one(value: Option<&str>, expected: bool) {
    assert_eq!(is_on(value.map(String::from)), expected);
}

// Only STINT_HOME is mutated here; color variables are shared with
// rendering tests running in parallel.
#[test]
fn stint_home_ignores_empty() {
    std::env::set_var("STINT_HOME", "");
    assert_eq!(stint_home(), None);
    std::env::set_var("STINT_HOME", "/tmp/stint-home");
    assert_eq!(stint_home(), Some(PathBuf::from("/tmp/stint-home")));
    std::env::remove_var("STINT_HOME");
}
