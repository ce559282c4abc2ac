// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Help text generation with colorization support.

use crate::colors;
use clap::builder::styling::Styles;

/// Generate clap Styles for help output.
pub fn styles() -> Styles {
    if !colors::should_colorize() {
        return Styles::plain();
    }

    use anstyle::{Ansi256Color, Color, Style};

    let fg = |code| Style::new().fg_color(Some(Color::Ansi256(Ansi256Color(code))));
    let header = fg(colors::codes::HEADER);
    let context = fg(colors::codes::CONTEXT);

    Styles::styled()
        .header(header)
        .usage(header)
        .literal(fg(colors::codes::LITERAL))
        .placeholder(context)
        .valid(context)
}

/// Main help template with colorized Options header.
pub fn template() -> String {
    format!(
        "{{about-with-newline}}
{{usage-heading}} {{usage}}

{{before-help}}{}
{{options}}{{after-help}}",
        colors::header("Options:")
    )
}

/// Commands list shown before options in main help.
pub fn commands() -> String {
    let rows = [
        ("Work:", None),
        ("issue", Some("Create, edit, move and inspect issues")),
        ("review", Some("Reviewers, review rounds and verdicts")),
        ("comment", Some("Discuss issues and reviews")),
        ("relate", Some("Relate two issues (blocks, causes, ...)")),
        ("unrelate", Some("Remove a relation")),
        ("sprint", Some("Plan and run sprints")),
        ("log", Some("View the event log")),
        ("", None),
        ("Workspace:", None),
        ("init", Some("Set up and register the acting member")),
        ("workspace", Some("Create, show and select workspaces")),
        ("member", Some("Invitations, roles, removal and ownership")),
        ("position", Some("Member positions")),
        ("completion", Some("Generate shell completions")),
    ];

    rows.iter()
        .map(|(name, about)| match about {
            None if name.is_empty() => String::new(),
            None => colors::header(name),
            Some(about) => format!("  {}{}  {about}", colors::literal(name), " ".repeat(10 - name.len())),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Quickstart help shown after options in main help.
pub fn quickstart() -> String {
    colors::examples(
        "\
Get started:
  stint init alice alice@example.com        Register yourself
  stint workspace create Demo -p DEMO       Create a workspace
  stint issue new \"My task\"                 Create a task
  stint issue status DEMO-1 in_progress     Start working on it",
    )
}

#[cfg(test)]
#[path = "help_tests.rs"]
mod tests;
