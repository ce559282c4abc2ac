// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

use clap::Parser;
use stintrs::Cli;

fn main() {
    let cli = Cli::parse();
    let json = cli.json;
    if let Err(e) = stintrs::run(cli) {
        match serde_json::to_string(&e.body()) {
            Ok(body) if json => println!("{body}"),
            _ => eprintln!("error: {e}"),
        }
        std::process::exit(e.exit_code());
    }
}
