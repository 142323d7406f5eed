// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Per-language accumulators
//!
//! Keys are created on first observation and never removed; values only
//! grow during an aggregation pass.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

/// Bytes per language, as summed from repository language breakdowns
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ByteTotals(HashMap<String, u64>);

impl ByteTotals {
    /// Create empty totals
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `bytes` to `language`
    pub fn add(&mut self, language: &str, bytes: u64) {
        let total = self.0.entry(language.to_string()).or_default();
        *total = total.saturating_add(bytes);
    }

    /// Add every entry of a language breakdown
    pub fn absorb<'a, I>(&mut self, breakdown: I)
    where
        I: IntoIterator<Item = (&'a String, &'a u64)>,
    {
        for (language, bytes) in breakdown {
            self.add(language, *bytes);
        }
    }

    /// Bytes recorded for `language`
    #[must_use]
    pub fn get(&self, language: &str) -> Option<u64> {
        self.0.get(language).copied()
    }

    /// Number of languages seen
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no language has been seen
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Sum over all languages
    #[must_use]
    pub fn total(&self) -> u64 {
        self.0.values().fold(0, |acc, b| acc.saturating_add(*b))
    }

    /// Iterate in unspecified order
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Entries sorted by bytes descending, then by name
    #[must_use]
    pub fn ranked(&self) -> Vec<(&str, u64)> {
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        entries
    }
}

/// Bytes added and commits touched for one language
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageActivity {
    /// Characters added across all files of the language
    pub bytes: u64,
    /// Distinct commits that touched the language
    pub commits: u64,
}

/// Per-language activity attributed to a user's commits
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommitTotals(HashMap<String, LanguageActivity>);

impl CommitTotals {
    /// Create empty totals
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one commit given its per-file `(language, bytes)` contributions
    ///
    /// Every file adds its own bytes. A language's commit count goes up at
    /// most once per call, however many of the commit's files share it.
    pub fn record_commit<'a, I>(&mut self, contributions: I)
    where
        I: IntoIterator<Item = (&'a str, u64)>,
    {
        let mut touched: HashSet<&str> = HashSet::new();
        for (language, bytes) in contributions {
            let activity = self.0.entry(language.to_string()).or_default();
            activity.bytes = activity.bytes.saturating_add(bytes);
            if touched.insert(language) {
                activity.commits += 1;
            }
        }
    }

    /// Activity recorded for `language`
    #[must_use]
    pub fn get(&self, language: &str) -> Option<LanguageActivity> {
        self.0.get(language).copied()
    }

    /// Number of languages seen
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no language has been seen
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Bytes summed over all languages
    #[must_use]
    pub fn total_bytes(&self) -> u64 {
        self.0
            .values()
            .fold(0, |acc, a| acc.saturating_add(a.bytes))
    }

    /// Iterate in unspecified order
    pub fn iter(&self) -> impl Iterator<Item = (&str, LanguageActivity)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Entries sorted by bytes descending, then commits, then name
    #[must_use]
    pub fn ranked(&self) -> Vec<(&str, LanguageActivity)> {
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort_by(|a, b| {
            b.1.bytes
                .cmp(&a.1.bytes)
                .then_with(|| b.1.commits.cmp(&a.1.commits))
                .then_with(|| a.0.cmp(b.0))
        });
        entries
    }
}
