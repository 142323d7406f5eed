// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Command-line configuration for langtally
//!
//! This module provides the CLI surface: the credential, API root,
//! concurrency bound, output format and logging options, plus the `repos`
//! and `commits` subcommands with their repository scope flags.

use clap::{Args, Parser, Subcommand, ValueEnum};
use reqwest::Url;

use crate::client::{DEFAULT_API_URL, DEFAULT_CONCURRENCY};
use crate::repos::{Affiliation, RepoOptions, Visibility};
use crate::stats::StatsConfig;

/// Langtally - per-language usage statistics for GitHub accounts
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "langtally")]
#[command(version, about, long_about = None)]
pub struct Config {
    /// Subcommand to run (defaults to `repos` for the authenticated account)
    #[command(subcommand)]
    pub command: Option<Command>,

    /// GitHub API token
    ///
    /// Any classic or fine-grained token with read access to the
    /// repositories being counted.
    #[arg(short, long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// API root URL
    ///
    /// Defaults to https://api.github.com. Point it at
    /// https://HOST/api/v3 for GitHub Enterprise Server.
    #[arg(long, env = "LANGTALLY_API_URL")]
    pub api_url: Option<String>,

    /// Maximum number of API requests in flight
    #[arg(short, long, env = "LANGTALLY_CONCURRENCY")]
    pub concurrency: Option<usize>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Enable verbose logging (debug level)
    ///
    /// Logs every API request. Logs are written to stderr so they never mix
    /// with the report on stdout.
    #[arg(short, long, default_value = "false")]
    pub verbose: bool,

    /// Quiet mode - suppress info-level logs
    ///
    /// Only errors and warnings will be logged.
    #[arg(short, long, default_value = "false")]
    pub quiet: bool,
}

/// How the report is printed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Aligned table, largest language first
    #[default]
    Table,
    /// Pretty-printed JSON object keyed by language
    Json,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Bytes per language summed over repositories
    ///
    /// Example:
    ///   langtally repos --visibility all --affiliation owner
    Repos(ScopeArgs),

    /// Characters added and commits per language over a user's commits
    ///
    /// Example:
    ///   langtally commits --user octocat
    Commits(ScopeArgs),
}

/// Which repositories to count
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct ScopeArgs {
    /// Count another user's public repositories instead of the token's own
    #[arg(short, long)]
    pub user: Option<String>,

    /// Repository visibility (defaults to public)
    #[arg(long, value_enum, conflicts_with = "user")]
    pub visibility: Option<Visibility>,

    /// Comma-separated affiliations (defaults to all three)
    #[arg(long, value_enum, value_delimiter = ',', conflicts_with = "user")]
    pub affiliation: Vec<Affiliation>,
}

impl ScopeArgs {
    /// Repository options for the authenticated account, or `None` when no
    /// scope flag was given
    #[must_use]
    pub fn repo_options(&self) -> Option<RepoOptions> {
        if self.visibility.is_none() && self.affiliation.is_empty() {
            return None;
        }
        Some(RepoOptions {
            visibility: self.visibility,
            affiliation: (!self.affiliation.is_empty()).then(|| self.affiliation.clone()),
        })
    }
}

impl Config {
    /// The subcommand to run, defaulting to `repos` with no scope flags
    #[must_use]
    pub fn command_or_default(&self) -> Command {
        self.command
            .clone()
            .unwrap_or_else(|| Command::Repos(ScopeArgs::default()))
    }

    /// API root, using the public GitHub API if not specified
    #[must_use]
    pub fn api_url(&self) -> &str {
        self.api_url.as_deref().unwrap_or(DEFAULT_API_URL)
    }

    /// Concurrency bound, using the default if not specified
    #[must_use]
    pub fn concurrency(&self) -> usize {
        self.concurrency.unwrap_or(DEFAULT_CONCURRENCY)
    }

    /// Settings for [`crate::stats::LanguageStats`]
    #[must_use]
    pub fn stats_config(&self) -> StatsConfig {
        StatsConfig {
            api_url: self.api_url().to_string(),
            concurrency: self.concurrency(),
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No token was given
    /// - The concurrency is zero
    /// - The API URL is not an http(s) URL
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.token.as_deref().is_none_or(|t| t.trim().is_empty()) {
            return Err(ConfigError::MissingToken);
        }

        if self.concurrency() == 0 {
            return Err(ConfigError::ZeroConcurrency);
        }

        let api_url = self.api_url();
        match Url::parse(api_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            _ => return Err(ConfigError::InvalidApiUrl(api_url.to_string())),
        }

        Ok(())
    }

    /// Get the log level based on verbose/quiet flags
    #[must_use]
    pub fn log_level(&self) -> tracing::Level {
        if self.verbose {
            tracing::Level::DEBUG
        } else if self.quiet {
            tracing::Level::WARN
        } else {
            tracing::Level::INFO
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    /// No token given on the command line or in the environment
    #[error("No GitHub token: pass --token or set GITHUB_TOKEN")]
    MissingToken,

    /// Concurrency must be at least 1
    #[error("Concurrency must be at least 1")]
    ZeroConcurrency,

    /// API root is not an http(s) URL
    #[error("Invalid API URL: {0}")]
    InvalidApiUrl(String),
}
