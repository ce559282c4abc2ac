// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Terminal colors for help and issue output.
//!
//! Respects environment variables:
//! - `NO_COLOR=1`: Disables colors
//! - `COLOR=1`: Forces colors even without TTY

use std::io::IsTerminal;

use stint_core::Status;

use crate::env;

/// ANSI 256-color codes.
pub mod codes {
    /// Section headers: steel blue
    pub const HEADER: u8 = 74;
    /// Commands/literals: light grey
    pub const LITERAL: u8 = 250;
    /// Placeholders and hints: medium grey
    pub const CONTEXT: u8 = 245;
    pub const ACTIVE: u8 = 179;
    pub const REVIEW: u8 = 141;
    pub const FINISHED: u8 = 108;
}

/// Check if colors should be enabled based on TTY and environment variables.
pub fn should_colorize() -> bool {
    if env::no_color() {
        return false;
    }
    if env::force_color() {
        return true;
    }
    std::io::stdout().is_terminal()
}

fn fg256(code: u8) -> String {
    format!("\x1b[38;5;{code}m")
}

const RESET: &str = "\x1b[0m";

fn paint(code: u8, text: &str) -> String {
    format!("{}{}{}", fg256(code), text, RESET)
}

pub fn header(text: &str) -> String {
    paint(codes::HEADER, text)
}

pub fn literal(text: &str) -> String {
    paint(codes::LITERAL, text)
}

pub fn context(text: &str) -> String {
    paint(codes::CONTEXT, text)
}

/// Status label for issue output, colored by lifecycle stage when enabled.
pub fn status(status: Status) -> String {
    if !should_colorize() {
        return status.to_string();
    }
    let code = match status {
        Status::Todo | Status::Paused => codes::CONTEXT,
        Status::InProgress => codes::ACTIVE,
        Status::InReview => codes::REVIEW,
        Status::Done => codes::FINISHED,
        Status::Closed | Status::Deleted => codes::LITERAL,
    };
    paint(code, status.as_str())
}

/// Colorize an examples help block.
///
/// Lines ending with `:` become headers; on example lines the command (up
/// to the first run of two spaces) is shown as a literal and any `<placeholder>`
/// in it as context.
pub fn examples(text: &str) -> String {
    if !should_colorize() {
        return text.to_string();
    }

    text.lines()
        .map(|line| {
            let trimmed = line.trim_start();
            let indent = &line[..line.len() - trimmed.len()];
            if trimmed.ends_with(':') && !trimmed.contains("  ") {
                return format!("{indent}{}", header(trimmed));
            }
            match find_description_start(trimmed) {
                Some(end) => format!(
                    "{indent}{}{}",
                    colorize_command(&trimmed[..end]),
                    &trimmed[end..]
                ),
                None => line.to_string(),
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Literal words with `<placeholders>` and quoted strings dimmed.
pub fn colorize_command(cmd: &str) -> String {
    cmd.split(' ')
        .map(|word| {
            if word.starts_with('<') || word.starts_with('"') {
                context(word)
            } else if word.is_empty() {
                String::new()
            } else {
                literal(word)
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Byte offset where the description starts (2+ spaces after the command).
pub fn find_description_start(line: &str) -> Option<usize> {
    line.find("  ")
        .filter(|&start| !line[start..].trim().is_empty())
}

#[cfg(test)]
#[path = "colors_tests.rs"]
mod tests;
