// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Error types for langtally

use thiserror::Error;

/// Errors that can occur while collecting language statistics
#[derive(Debug, Error)]
pub enum StatsError {
    /// An input was rejected before any request was made
    #[error("Invalid {field}: {reason}")]
    Validation {
        /// Name of the rejected input
        field: &'static str,
        /// Why the input was rejected
        reason: String,
    },

    /// The API answered with a non-success status
    #[error("GitHub API error {status}: {message}")]
    Remote {
        /// HTTP status code
        status: u16,
        /// The `message` field of the error body, or the status reason
        message: String,
    },

    /// The request never produced a response
    #[error("Request failed: {0}")]
    Transport(String),

    /// A response body did not have the expected shape
    #[error("Unexpected response from {url}: {source}")]
    Decode {
        /// The URL whose response failed to decode
        url: String,
        /// The underlying JSON error
        #[source]
        source: serde_json::Error,
    },

    /// The configured API base URL could not be parsed
    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),

    /// A concurrent request task panicked or was cancelled
    #[error("Request task failed: {0}")]
    TaskFailed(String),
}

impl StatsError {
    /// Build a validation error for `field`
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field,
            reason: reason.into(),
        }
    }

    /// The HTTP status code, if the error came from the API
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Remote { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the error was raised by input validation
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }
}
