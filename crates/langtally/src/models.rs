// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! GitHub API response types
//!
//! Only the fields the pipeline reads are modelled; everything else in the
//! API payloads is ignored during deserialization.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A repository from `/user/repos` or `/users/{username}/repos`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    /// `owner/name`
    #[serde(default)]
    pub full_name: String,
    /// API URL of the repository
    pub url: String,
    /// API URL of the per-language byte breakdown
    pub languages_url: String,
    /// Whether the repository is a fork
    #[serde(default)]
    pub fork: bool,
}

impl Repository {
    /// API URL of the repository's commit list
    #[must_use]
    pub fn commits_url(&self) -> String {
        format!("{}/commits", self.url.trim_end_matches('/'))
    }
}

/// A GitHub account as embedded in other payloads, or from `/user`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Login name
    pub login: String,
    /// Numeric account id
    #[serde(default)]
    pub id: Option<u64>,
}

/// An entry of a repository's commit list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitSummary {
    /// API URL of the commit detail
    pub url: String,
    /// Commit SHA
    #[serde(default)]
    pub sha: String,
    /// The GitHub account linked to the commit author, if any
    #[serde(default)]
    pub author: Option<Account>,
}

impl CommitSummary {
    /// Login of the linked author account
    #[must_use]
    pub fn author_login(&self) -> Option<&str> {
        self.author.as_ref().map(|a| a.login.as_str())
    }
}

/// A single commit with its changed files
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitDetail {
    /// Commit SHA
    #[serde(default)]
    pub sha: String,
    /// Changed files
    #[serde(default)]
    pub files: Vec<CommitFile>,
}

/// A changed file within a commit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitFile {
    /// Path of the file after the change
    pub filename: String,
    /// `added`, `modified`, `removed`, `renamed`, ...
    #[serde(default)]
    pub status: Option<String>,
    /// Unified diff fragment; absent for binary files and pure renames
    #[serde(default)]
    pub patch: Option<String>,
}

/// Body of a repository's languages endpoint: language name to bytes
pub type LanguageBreakdown = HashMap<String, u64>;
