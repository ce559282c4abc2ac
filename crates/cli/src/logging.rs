// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use tracing_subscriber::EnvFilter;

use crate::env;

/// Build the filter: `STINT_LOG` wins, then the configured level.
pub fn filter(configured_level: &str) -> EnvFilter {
    env::log_filter()
        .and_then(|directive| EnvFilter::try_new(directive).ok())
        .or_else(|| EnvFilter::try_new(configured_level).ok())
        .unwrap_or_else(|| EnvFilter::new("warn"))
}

/// Install the stderr subscriber. Safe to call more than once.
pub fn setup_logging(configured_level: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter(configured_level))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
