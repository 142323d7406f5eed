// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Repository listing and repository language totals

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::client::{ApiClient, ApiRequest};
use crate::error::StatsError;
use crate::fanout::try_fan_out;
use crate::models::{LanguageBreakdown, Repository};
use crate::totals::ByteTotals;
use crate::validate::{validate_credential, validate_username};

/// Which of the authenticated account's repositories to list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    /// Public and private
    All,
    /// Public only
    #[default]
    Public,
    /// Private only
    Private,
}

impl Visibility {
    /// Query parameter value
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Public => "public",
            Self::Private => "private",
        }
    }
}

/// The account's relationship to a repository
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Affiliation {
    /// Repositories owned by the account
    Owner,
    /// Repositories the account collaborates on
    Collaborator,
    /// Repositories of organizations the account belongs to
    #[value(name = "organization_member")]
    OrganizationMember,
}

impl Affiliation {
    /// Every affiliation, in query order
    pub const ALL: [Affiliation; 3] = [
        Affiliation::Owner,
        Affiliation::Collaborator,
        Affiliation::OrganizationMember,
    ];

    /// Query parameter value
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Owner => "owner",
            Self::Collaborator => "collaborator",
            Self::OrganizationMember => "organization_member",
        }
    }
}

/// Optional overrides for listing the authenticated account's repositories
///
/// Unset fields fall back to `visibility = public` and every affiliation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoOptions {
    /// Visibility filter
    pub visibility: Option<Visibility>,
    /// Affiliation filter
    pub affiliation: Option<Vec<Affiliation>>,
}

impl RepoOptions {
    /// Set the visibility filter
    #[must_use]
    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = Some(visibility);
        self
    }

    /// Set the affiliation filter
    #[must_use]
    pub fn with_affiliation(mut self, affiliation: impl IntoIterator<Item = Affiliation>) -> Self {
        self.affiliation = Some(affiliation.into_iter().collect());
        self
    }

    /// Merge `options` over the defaults
    ///
    /// # Errors
    ///
    /// Returns `StatsError::Validation` if an explicit affiliation list is
    /// empty.
    pub fn resolve(options: Option<&RepoOptions>) -> Result<ResolvedRepoOptions, StatsError> {
        let mut resolved = ResolvedRepoOptions::default();
        let Some(options) = options else {
            return Ok(resolved);
        };

        if let Some(visibility) = options.visibility {
            resolved.visibility = visibility;
        }
        if let Some(affiliation) = &options.affiliation {
            if affiliation.is_empty() {
                return Err(StatsError::invalid(
                    "affiliation",
                    "must name at least one of owner, collaborator, organization_member",
                ));
            }
            let mut affiliation = affiliation.clone();
            affiliation.sort_unstable();
            affiliation.dedup();
            resolved.affiliation = affiliation;
        }
        Ok(resolved)
    }
}

/// [`RepoOptions`] with defaults applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRepoOptions {
    /// Visibility filter
    pub visibility: Visibility,
    /// Affiliation filter, deduplicated and in query order
    pub affiliation: Vec<Affiliation>,
}

impl Default for ResolvedRepoOptions {
    fn default() -> Self {
        Self {
            visibility: Visibility::default(),
            affiliation: Affiliation::ALL.to_vec(),
        }
    }
}

impl ResolvedRepoOptions {
    /// Comma-joined affiliation query value
    #[must_use]
    pub fn affiliation_param(&self) -> String {
        self.affiliation
            .iter()
            .map(|a| a.as_str())
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Whose repositories to list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoSelector<'a> {
    /// The authenticated account, filtered by the options
    Credential(ResolvedRepoOptions),
    /// Another account's public repositories
    Username(&'a str),
}

/// List the repositories chosen by `selector`
///
/// # Errors
///
/// Returns `StatsError::Validation` for a bad credential or username (before
/// any request) and any error from the paginated listing.
pub async fn list_repositories(
    client: &ApiClient,
    api_url: &str,
    credential: &str,
    selector: &RepoSelector<'_>,
) -> Result<Vec<Repository>, StatsError> {
    validate_credential(credential)?;

    let request = match selector {
        RepoSelector::Credential(options) => {
            ApiRequest::new(format!("{api_url}/user/repos"), credential)
                .query("visibility", options.visibility.as_str())
                .query("affiliation", options.affiliation_param())
        }
        RepoSelector::Username(username) => {
            validate_username(username)?;
            ApiRequest::new(format!("{api_url}/users/{username}/repos"), credential)
        }
    };

    let repos: Vec<Repository> = client.fetch_all(request).await?;
    info!(
        count = repos.len(),
        forks = repos.iter().filter(|repo| repo.fork).count(),
        "listed repositories"
    );
    Ok(repos)
}

/// Sum the language breakdowns of `repos`
///
/// Language names are kept exactly as the API reports them.
///
/// # Errors
///
/// Returns the first error from any repository's languages request.
pub async fn repository_bytes(
    client: &ApiClient,
    credential: &str,
    repos: &[Repository],
) -> Result<ByteTotals, StatsError> {
    let requests: Vec<ApiRequest> = repos
        .iter()
        .map(|repo| ApiRequest::new(repo.languages_url.clone(), credential))
        .collect();

    let client = client.clone();
    let breakdowns = try_fan_out(requests, move |request| {
        let client = client.clone();
        async move { client.get_json::<LanguageBreakdown>(&request).await }
    })
    .await?;

    let mut totals = ByteTotals::new();
    for breakdown in &breakdowns {
        totals.absorb(breakdown);
    }
    info!(
        repositories = repos.len(),
        languages = totals.len(),
        "summed repository languages"
    );
    Ok(totals)
}
