// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! The four public language-statistics operations
//!
//! # Example
//!
//! ```no_run
//! use langtally::stats::{LanguageStats, StatsConfig};
//!
//! # async fn run() -> Result<(), langtally::StatsError> {
//! let stats = LanguageStats::github(StatsConfig::default())?;
//! let totals = stats.repo_languages("ghp_token", None).await?;
//! for (language, bytes) in totals.ranked() {
//!     println!("{language}: {bytes}");
//! }
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use reqwest::Url;
use tracing::info;

use crate::client::{ApiClient, DEFAULT_API_URL, DEFAULT_CONCURRENCY, HttpTransport, Transport};
use crate::commits::{attributed_commit_urls, commit_detail_totals, discover_commits, resolve_identity};
use crate::error::StatsError;
use crate::repos::{RepoOptions, RepoSelector, list_repositories, repository_bytes};
use crate::totals::{ByteTotals, CommitTotals};
use crate::validate::{validate_credential, validate_username};

/// Settings fixed for the lifetime of a [`LanguageStats`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsConfig {
    /// API root, without a trailing slash
    pub api_url: String,
    /// Maximum requests in flight
    pub concurrency: usize,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            concurrency: DEFAULT_CONCURRENCY,
        }
    }
}

/// Entry point for computing language breakdowns
pub struct LanguageStats {
    client: ApiClient,
    api_url: String,
}

impl LanguageStats {
    /// Create a client over `transport`
    ///
    /// # Errors
    ///
    /// Returns `StatsError::InvalidUrl` if the API URL cannot be parsed and
    /// `StatsError::Validation` if the concurrency is zero.
    pub fn new(transport: Arc<dyn Transport>, config: StatsConfig) -> Result<Self, StatsError> {
        let api_url = config.api_url.trim_end_matches('/').to_string();
        let parsed = Url::parse(&api_url).map_err(|e| StatsError::InvalidUrl(format!("{api_url}: {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(StatsError::InvalidUrl(format!(
                "{api_url}: scheme must be http or https"
            )));
        }
        if config.concurrency == 0 {
            return Err(StatsError::invalid("concurrency", "must be at least 1"));
        }

        Ok(Self {
            client: ApiClient::new(transport, config.concurrency),
            api_url,
        })
    }

    /// Create a client that talks to GitHub over HTTPS
    ///
    /// # Errors
    ///
    /// Returns the errors of [`LanguageStats::new`] and
    /// `StatsError::Transport` if the HTTP client cannot be built.
    pub fn github(config: StatsConfig) -> Result<Self, StatsError> {
        Self::new(Arc::new(HttpTransport::new()?), config)
    }

    /// The API root requests are sent to
    #[must_use]
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Bytes per language across the authenticated account's repositories
    ///
    /// # Errors
    ///
    /// Returns `StatsError::Validation` for bad input (before any request)
    /// and any error from listing repositories or reading their languages.
    pub async fn repo_languages(
        &self,
        credential: &str,
        options: Option<&RepoOptions>,
    ) -> Result<ByteTotals, StatsError> {
        validate_credential(credential)?;
        let selector = RepoSelector::Credential(RepoOptions::resolve(options)?);
        self.repo_bytes_for(credential, &selector).await
    }

    /// Bytes per language across `username`'s public repositories
    ///
    /// # Errors
    ///
    /// Same as [`LanguageStats::repo_languages`].
    pub async fn repo_languages_by_username(
        &self,
        credential: &str,
        username: &str,
    ) -> Result<ByteTotals, StatsError> {
        validate_credential(credential)?;
        validate_username(username)?;
        self.repo_bytes_for(credential, &RepoSelector::Username(username))
            .await
    }

    /// Characters added and commits per language, over the authenticated
    /// account's own commits
    ///
    /// # Errors
    ///
    /// Returns `StatsError::Validation` for bad input (before any request)
    /// and any error from the identity lookup, repository listing, or commit
    /// detail requests. Failures listing a single repository's commits are
    /// logged and skipped.
    pub async fn commit_languages(
        &self,
        credential: &str,
        options: Option<&RepoOptions>,
    ) -> Result<CommitTotals, StatsError> {
        validate_credential(credential)?;
        let selector = RepoSelector::Credential(RepoOptions::resolve(options)?);
        let identity = resolve_identity(&self.client, &self.api_url, credential).await?;
        self.commit_totals_for(credential, &selector, &identity)
            .await
    }

    /// Characters added and commits per language, over `username`'s commits
    /// to their public repositories
    ///
    /// # Errors
    ///
    /// Same as [`LanguageStats::commit_languages`], without the identity
    /// lookup.
    pub async fn commit_languages_by_username(
        &self,
        credential: &str,
        username: &str,
    ) -> Result<CommitTotals, StatsError> {
        validate_credential(credential)?;
        validate_username(username)?;
        self.commit_totals_for(credential, &RepoSelector::Username(username), username)
            .await
    }

    async fn repo_bytes_for(
        &self,
        credential: &str,
        selector: &RepoSelector<'_>,
    ) -> Result<ByteTotals, StatsError> {
        let repos = list_repositories(&self.client, &self.api_url, credential, selector).await?;
        repository_bytes(&self.client, credential, &repos).await
    }

    async fn commit_totals_for(
        &self,
        credential: &str,
        selector: &RepoSelector<'_>,
        identity: &str,
    ) -> Result<CommitTotals, StatsError> {
        info!(identity, "collecting commit languages");
        let repos = list_repositories(&self.client, &self.api_url, credential, selector).await?;
        let per_repository = discover_commits(&self.client, credential, &repos, identity).await;
        let urls = attributed_commit_urls(&per_repository, identity);
        info!(commits = urls.len(), "attributed commits");
        commit_detail_totals(&self.client, credential, urls).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transport() -> Arc<dyn Transport> {
        Arc::new(HttpTransport::new().expect("build transport"))
    }

    #[test]
    fn test_default_config() {
        let config = StatsConfig::default();
        assert_eq!(config.api_url, "https://api.github.com");
        assert_eq!(config.concurrency, 10);
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let stats = LanguageStats::new(
            transport(),
            StatsConfig {
                api_url: "https://github.example.com/api/v3/".to_string(),
                ..Default::default()
            },
        )
        .expect("valid config");
        assert_eq!(stats.api_url(), "https://github.example.com/api/v3");
    }

    #[test]
    fn test_invalid_api_url() {
        let result = LanguageStats::new(
            transport(),
            StatsConfig {
                api_url: "not a url".to_string(),
                ..Default::default()
            },
        );
        assert!(matches!(result, Err(StatsError::InvalidUrl(_))));

        let result = LanguageStats::new(
            transport(),
            StatsConfig {
                api_url: "ftp://example.com".to_string(),
                ..Default::default()
            },
        );
        assert!(matches!(result, Err(StatsError::InvalidUrl(_))));
    }

    #[test]
    fn test_zero_concurrency_rejected() {
        let result = LanguageStats::new(
            transport(),
            StatsConfig {
                concurrency: 0,
                ..Default::default()
            },
        );
        assert!(result.err().is_some_and(|e| e.is_validation()));
    }
}
