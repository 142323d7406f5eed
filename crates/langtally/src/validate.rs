// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Input guards run before any request is issued

use crate::error::StatsError;

/// Longest login GitHub accepts
pub const MAX_USERNAME_LEN: usize = 39;

/// Check that an access token is usable as a bearer credential
///
/// # Errors
///
/// Returns `StatsError::Validation` if the token is empty or contains
/// whitespace or control characters.
pub fn validate_credential(credential: &str) -> Result<(), StatsError> {
    if credential.trim().is_empty() {
        return Err(StatsError::invalid("credential", "must not be empty"));
    }
    if credential
        .chars()
        .any(|c| c.is_whitespace() || c.is_control())
    {
        return Err(StatsError::invalid(
            "credential",
            "must not contain whitespace or control characters",
        ));
    }
    Ok(())
}

/// Check that a username looks like a GitHub login
///
/// # Errors
///
/// Returns `StatsError::Validation` if the username is empty, too long, or
/// contains characters other than ASCII letters, digits, `-` and `_`.
pub fn validate_username(username: &str) -> Result<(), StatsError> {
    if username.is_empty() {
        return Err(StatsError::invalid("username", "must not be empty"));
    }
    if username.len() > MAX_USERNAME_LEN {
        return Err(StatsError::invalid(
            "username",
            format!("must be at most {MAX_USERNAME_LEN} characters"),
        ));
    }
    if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(StatsError::invalid(
            "username",
            format!("'{username}' may only contain ASCII letters, digits, '-' or '_'"),
        ));
    }
    Ok(())
}
