// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Error types for langtally-diff

use thiserror::Error;

/// Errors that can occur while parsing a unified diff
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiffError {
    /// A line starting with `@@` could not be read as a hunk header
    #[error("Malformed hunk header at line {line}: {header}")]
    MalformedHunkHeader {
        /// 1-based line number within the patch text
        line: usize,
        /// The offending header text
        header: String,
    },

    /// Diff content appeared before any hunk header
    #[error("Diff content before first hunk header at line {line}")]
    MissingHunkHeader {
        /// 1-based line number within the patch text
        line: usize,
    },
}
