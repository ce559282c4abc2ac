// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

// Allow unused items: test helpers are shared across multiple test binaries,
// and not every test file uses every helper.
#![allow(dead_code)]
#![allow(unused_imports)]

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;

pub use predicates::prelude::*;
pub use serde_json::Value;
pub use tempfile::TempDir;

/// A `stint` command pointed at `home`, with a clean environment.
pub fn stint(home: &TempDir) -> Command {
    let mut cmd = cargo_bin_cmd!("stint");
    cmd.env("STINT_HOME", home.path())
        .env_remove("STINT_ACTOR")
        .env_remove("STINT_LOG")
        .env("NO_COLOR", "1");
    cmd
}

/// Run `stint --json <args>` and parse its output.
pub fn json(home: &TempDir, args: &[&str]) -> Value {
    let output = stint(home).arg("--json").args(args).output().unwrap();
    assert!(
        output.status.success(),
        "stint {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).unwrap()
}

/// A data directory initialized for `owner`, holding one `PROJ` workspace.
pub fn init_home() -> TempDir {
    let home = TempDir::new().unwrap();
    stint(&home)
        .args(["init", "owner", "owner@example.com"])
        .assert()
        .success();
    stint(&home)
        .args(["workspace", "create", "Demo", "--prefix", "PROJ"])
        .assert()
        .success();
    home
}

/// Create an issue and return its key.
pub fn create_issue(home: &TempDir, args: &[&str]) -> String {
    let mut full = vec!["issue", "new"];
    full.extend_from_slice(args);
    json(home, &full)["key"].as_str().unwrap().to_string()
}

/// Register `login` and seat them in the default workspace.
pub fn join(home: &TempDir, login: &str) {
    let email = format!("{login}@example.com");
    stint(home)
        .args(["member", "register", login, &email])
        .assert()
        .success();
    let invitation = json(home, &["member", "invite", login])["id"]
        .as_i64()
        .unwrap()
        .to_string();
    stint(home)
        .args(["--actor", login, "member", "accept", &invitation])
        .assert()
        .success();
}
