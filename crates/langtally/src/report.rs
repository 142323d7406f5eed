// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Rendering of language totals for the command line

use std::fmt::Write as _;

use serde::Serialize;

use crate::totals::{ByteTotals, CommitTotals};

const LANGUAGE_HEADER: &str = "LANGUAGE";

/// Share of `total` taken by `part`, in percent
#[must_use]
pub fn percentage(part: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let share = part as f64 / total as f64 * 100.0;
    share
}

fn name_width<'a>(names: impl Iterator<Item = &'a str>) -> usize {
    names
        .map(|n| n.chars().count())
        .max()
        .unwrap_or(0)
        .max(LANGUAGE_HEADER.len())
}

/// Table of bytes per language, largest first
#[must_use]
pub fn render_bytes_table(totals: &ByteTotals) -> String {
    let ranked = totals.ranked();
    if ranked.is_empty() {
        return "No languages found.\n".to_string();
    }

    let total = totals.total();
    let width = name_width(ranked.iter().map(|(name, _)| *name));
    let mut out = String::new();
    let _ = writeln!(out, "{LANGUAGE_HEADER:<width$}  {:>14}  {:>7}", "BYTES", "SHARE");
    for (language, bytes) in ranked {
        let _ = writeln!(
            out,
            "{language:<width$}  {bytes:>14}  {:>6.2}%",
            percentage(bytes, total)
        );
    }
    let _ = writeln!(out, "{:<width$}  {total:>14}", "TOTAL");
    out
}

/// Table of characters added and commits per language, largest first
#[must_use]
pub fn render_commit_table(totals: &CommitTotals) -> String {
    let ranked = totals.ranked();
    if ranked.is_empty() {
        return "No attributed commits found.\n".to_string();
    }

    let total = totals.total_bytes();
    let width = name_width(ranked.iter().map(|(name, _)| *name));
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{LANGUAGE_HEADER:<width$}  {:>14}  {:>7}  {:>8}",
        "BYTES", "SHARE", "COMMITS"
    );
    for (language, activity) in ranked {
        let _ = writeln!(
            out,
            "{language:<width$}  {:>14}  {:>6.2}%  {:>8}",
            activity.bytes,
            percentage(activity.bytes, total),
            activity.commits
        );
    }
    let _ = writeln!(out, "{:<width$}  {total:>14}", "TOTAL");
    out
}

/// Pretty-printed JSON of any totals
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn render_json<T: Serialize>(totals: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(totals)
}
