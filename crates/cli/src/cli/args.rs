// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shared argument structs for CLI commands.

use clap::Args;

/// Optional fields of a new issue.
#[derive(Args, Clone, Debug, Default)]
pub struct DraftArgs {
    /// Longer description
    #[arg(long, short)]
    pub content: Option<String>,

    /// One-line summary
    #[arg(long)]
    pub summary: Option<String>,

    /// Priority (lowest, low, medium, high, highest, emergency)
    #[arg(long, short)]
    pub priority: Option<String>,

    /// Story points
    #[arg(long)]
    pub points: Option<u32>,

    /// Due date (YYYY-MM-DD)
    #[arg(long)]
    pub due: Option<String>,

    /// Bug severity (minor, major, critical, blocker)
    #[arg(long)]
    pub severity: Option<String>,

    /// Create under this parent issue
    #[arg(long, value_name = "KEY")]
    pub parent: Option<String>,
}

/// Limit arguments for paginated results.
#[derive(Args, Clone, Debug, Default)]
pub struct LimitArgs {
    /// Maximum number of results
    #[arg(short = 'n', long, default_value_t = 20)]
    pub limit: usize,
}

/// Fields to change on an existing issue. Omitted flags keep their value.
#[derive(Args, Clone, Debug, Default)]
pub struct EditArgs {
    #[arg(long, short)]
    pub title: Option<String>,

    #[arg(long, short)]
    pub content: Option<String>,

    /// One-line summary (empty to clear)
    #[arg(long)]
    pub summary: Option<String>,

    /// Priority (lowest, low, medium, high, highest, emergency)
    #[arg(long, short)]
    pub priority: Option<String>,

    #[arg(long)]
    pub points: Option<u32>,

    /// Due date (YYYY-MM-DD)
    #[arg(long)]
    pub due: Option<String>,

    /// Difficulty (easy, normal, hard); not for epics
    #[arg(long)]
    pub difficulty: Option<String>,

    /// Epic business goal
    #[arg(long)]
    pub goal: Option<String>,

    /// Epic target release date (YYYY-MM-DD)
    #[arg(long)]
    pub release: Option<String>,

    /// Epic hard deadline (YYYY-MM-DD)
    #[arg(long)]
    pub deadline: Option<String>,

    /// Story text
    #[arg(long)]
    pub user_story: Option<String>,

    /// Story acceptance criteria (empty to clear)
    #[arg(long)]
    pub acceptance: Option<String>,

    /// Bug reproducing steps
    #[arg(long)]
    pub steps: Option<String>,

    /// Bug affected versions, comma separated
    #[arg(long, value_delimiter = ',')]
    pub versions: Option<Vec<String>>,
}
