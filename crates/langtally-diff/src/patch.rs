// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Unified diff parsing
//!
//! This module reads the per-file patch fragments returned by the GitHub
//! commit API (and plain `git diff` output) into hunks of added and removed
//! lines.

use crate::error::DiffError;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Lines that may precede the first hunk of a file diff
const PREAMBLE_PREFIXES: &[&str] = &[
    "diff",
    "index ",
    "--- ",
    "+++ ",
    "new file mode",
    "deleted file mode",
    "old mode",
    "new mode",
    "similarity index",
    "dissimilarity index",
    "rename from",
    "rename to",
    "copy from",
    "copy to",
    "Binary files",
];

/// A single hunk of a unified diff
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hunk {
    /// First line of the hunk in the old file
    pub old_start: u32,
    /// Number of old-file lines covered by the hunk
    pub old_lines: u32,
    /// First line of the hunk in the new file
    pub new_start: u32,
    /// Number of new-file lines covered by the hunk
    pub new_lines: u32,
    /// Added line contents, without the leading `+`
    pub added: Vec<String>,
    /// Removed line contents, without the leading `-`
    pub removed: Vec<String>,
}

impl Hunk {
    fn new(old_start: u32, old_lines: u32, new_start: u32, new_lines: u32) -> Self {
        Self {
            old_start,
            old_lines,
            new_start,
            new_lines,
            added: Vec::new(),
            removed: Vec::new(),
        }
    }

    /// Total character length of the added lines
    #[must_use]
    pub fn added_chars(&self) -> usize {
        self.added.iter().map(|line| line.chars().count()).sum()
    }
}

/// Sum of [`Hunk::added_chars`] over all hunks
#[must_use]
pub fn added_chars(hunks: &[Hunk]) -> usize {
    hunks.iter().map(Hunk::added_chars).sum()
}

/// A hunk still consuming lines, with the counts left from its header
struct OpenHunk {
    hunk: Hunk,
    old_left: u32,
    new_left: u32,
}

impl OpenHunk {
    fn is_exhausted(&self) -> bool {
        self.old_left == 0 && self.new_left == 0
    }
}

/// Parse a unified diff into its hunks
///
/// Accepts either a bare patch fragment starting at the first `@@` header or
/// a full file diff with its `diff`/`---`/`+++` preamble. Lines past the
/// counts announced by a hunk header are attributed to the last hunk.
///
/// # Errors
///
/// Returns `DiffError::MalformedHunkHeader` if an `@@` line cannot be read,
/// and `DiffError::MissingHunkHeader` if diff content precedes any header.
pub fn parse_patch(text: &str) -> Result<Vec<Hunk>, DiffError> {
    let mut hunks: Vec<Hunk> = Vec::new();
    let mut open: Option<OpenHunk> = None;

    for (index, line) in text.lines().enumerate() {
        let line_no = index + 1;

        if line.starts_with("@@") {
            if let Some(done) = open.take() {
                hunks.push(done.hunk);
            }
            let hunk = parse_header(line).ok_or_else(|| DiffError::MalformedHunkHeader {
                line: line_no,
                header: line.to_string(),
            })?;
            open = Some(OpenHunk {
                old_left: hunk.old_lines,
                new_left: hunk.new_lines,
                hunk,
            });
            continue;
        }

        match open.as_mut() {
            Some(current) if !current.is_exhausted() => {
                apply_line(current, line);
                if current.is_exhausted() {
                    if let Some(done) = open.take() {
                        hunks.push(done.hunk);
                    }
                }
            }
            _ => {
                if let Some(done) = open.take() {
                    hunks.push(done.hunk);
                }
                if line.is_empty() || line.starts_with('\\') || is_preamble(line) {
                    continue;
                }
                match hunks.last_mut() {
                    Some(last) => {
                        trace!(line = line_no, "diff line beyond hunk range");
                        record_line(last, line);
                    }
                    None => return Err(DiffError::MissingHunkHeader { line: line_no }),
                }
            }
        }
    }

    if let Some(done) = open {
        hunks.push(done.hunk);
    }

    Ok(hunks)
}

fn is_preamble(line: &str) -> bool {
    PREAMBLE_PREFIXES
        .iter()
        .any(|prefix| line.starts_with(prefix))
}

enum LineKind {
    Added,
    Removed,
    Context,
    Marker,
}

/// Store an added or removed line in `hunk` and report what kind it was
fn record_line(hunk: &mut Hunk, line: &str) -> LineKind {
    if let Some(content) = line.strip_prefix('+') {
        hunk.added.push(content.to_string());
        LineKind::Added
    } else if let Some(content) = line.strip_prefix('-') {
        hunk.removed.push(content.to_string());
        LineKind::Removed
    } else if line.starts_with('\\') {
        LineKind::Marker
    } else {
        // Context lines, including blank ones whose leading space was stripped
        LineKind::Context
    }
}

fn apply_line(current: &mut OpenHunk, line: &str) {
    match record_line(&mut current.hunk, line) {
        LineKind::Added => current.new_left = current.new_left.saturating_sub(1),
        LineKind::Removed => current.old_left = current.old_left.saturating_sub(1),
        LineKind::Context => {
            current.old_left = current.old_left.saturating_sub(1);
            current.new_left = current.new_left.saturating_sub(1);
        }
        LineKind::Marker => {}
    }
}

/// Parse `@@ -a[,b] +c[,d] @@ optional section`
fn parse_header(line: &str) -> Option<Hunk> {
    let body = line.strip_prefix("@@ ")?;
    let end = body.find(" @@")?;
    let mut ranges = body[..end].split_whitespace();

    let (old_start, old_lines) = parse_range(ranges.next()?.strip_prefix('-')?)?;
    let (new_start, new_lines) = parse_range(ranges.next()?.strip_prefix('+')?)?;
    if ranges.next().is_some() {
        return None;
    }

    Some(Hunk::new(old_start, old_lines, new_start, new_lines))
}

fn parse_range(range: &str) -> Option<(u32, u32)> {
    match range.split_once(',') {
        Some((start, count)) => Some((start.parse().ok()?, count.parse().ok()?)),
        None => Some((range.parse().ok()?, 1)),
    }
}
