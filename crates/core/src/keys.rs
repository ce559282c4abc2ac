// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};

use crate::error::{Error, Result};

/// Attempts made before giving up on a unique workspace code.
pub const MAX_CODE_ATTEMPTS: u32 = 5;

/// Generate a workspace code from name, timestamp and attempt number.
/// Format: first 8 hex chars of SHA256(name + timestamp + attempt), uppercased.
pub fn generate_workspace_code(name: &str, created_at: &DateTime<Utc>, attempt: u32) -> String {
    let input = format!("{}{}{}", name, created_at.to_rfc3339(), attempt);
    let hash = Sha256::digest(input.as_bytes());
    hex::encode_upper(&hash[..4]) // First 8 hex chars (4 bytes)
}

/// Generate a code not yet taken, retrying with a new attempt number on collision.
pub fn generate_unique_code<F>(name: &str, created_at: &DateTime<Utc>, mut exists: F) -> Result<String>
where
    F: FnMut(&str) -> Result<bool>,
{
    for attempt in 0..MAX_CODE_ATTEMPTS {
        let code = generate_workspace_code(name, created_at, attempt);
        if !exists(&code)? {
            return Ok(code);
        }
        tracing::warn!(code = %code, attempt, "workspace code collision");
    }
    Err(Error::CodeGenerationFailed(MAX_CODE_ATTEMPTS))
}

/// Validate an issue key prefix (2-16 uppercase alphanumeric with at least one letter).
pub fn validate_key_prefix(prefix: &str) -> Result<()> {
    let valid = (2..=16).contains(&prefix.len())
        && prefix
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
        && prefix.chars().any(|c| c.is_ascii_uppercase());
    if !valid {
        return Err(Error::InvalidValue {
            field: "key prefix",
            value: prefix.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
#[path = "keys_tests.rs"]
mod tests;
