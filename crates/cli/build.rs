// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::io::Write;

/// Environment variables the binary reads, with the doc line for each constant.
const VARS: &[(&str, &str)] = &[
    ("STINT_HOME", "Data directory holding stint.toml and the database."),
    ("STINT_LOG", "tracing filter directive, e.g. `debug` or `stint_core=trace`."),
    ("STINT_ACTOR", "Login of the acting member."),
    ("NO_COLOR", "Set to 1 to disable colors."),
    ("COLOR", "Set to 1 to force colors without a TTY."),
];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed=build.rs");

    let out_dir = std::env::var("OUT_DIR")?;
    let path = std::path::Path::new(&out_dir).join("env_vars.rs");
    let mut f = std::fs::File::create(path)?;

    for (name, doc) in VARS {
        writeln!(f, "/// {doc}")?;
        writeln!(f, "pub const {name}: &str = \"{name}\";")?;
    }

    Ok(())
}
