// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Commit discovery, attribution and per-language commit totals
//!
//! The commit pipeline runs in three steps:
//!
//! 1. [`discover_commits`] lists each repository's commits by the identity,
//!    skipping repositories whose listing fails.
//! 2. [`attributed_commit_urls`] keeps only commits whose linked author is
//!    the identity, since the `author` query filter also matches by email.
//! 3. [`commit_detail_totals`] fetches every kept commit and tallies the
//!    characters added per language.

use std::future::Future;

use langtally_diff::{added_chars, detect_language, parse_patch};
use tracing::{debug, info, warn};

use crate::client::{ApiClient, ApiRequest};
use crate::error::StatsError;
use crate::fanout::{spawn_indexed, try_fan_out};
use crate::models::{Account, CommitDetail, CommitFile, CommitSummary, Repository};
use crate::totals::CommitTotals;
use crate::validate::validate_credential;

/// Language and added characters of one changed file
pub type FileContribution = (&'static str, u64);

/// Look up the login of the account that owns `credential`
///
/// # Errors
///
/// Returns `StatsError::Validation` for a bad credential and any error from
/// the `/user` request.
pub async fn resolve_identity(
    client: &ApiClient,
    api_url: &str,
    credential: &str,
) -> Result<String, StatsError> {
    validate_credential(credential)?;
    let account: Account = client
        .get_json(&ApiRequest::new(format!("{api_url}/user"), credential))
        .await?;
    debug!(login = %account.login, id = ?account.id, "resolved identity");
    Ok(account.login)
}

/// Run `task` over all items and keep every outcome, in item order
///
/// Unlike [`try_fan_out`], one failure neither stops the others nor fails
/// the whole run.
async fn best_effort<I, R, F, Fut>(items: Vec<I>, task: F) -> Vec<Result<R, StatsError>>
where
    F: Fn(I) -> Fut,
    Fut: Future<Output = Result<R, StatsError>> + Send + 'static,
    R: Send + 'static,
{
    let count = items.len();
    let mut set = spawn_indexed(items, task);
    let mut outcomes: Vec<Option<Result<R, StatsError>>> =
        std::iter::repeat_with(|| None).take(count).collect();

    while let Some(joined) = set.join_next().await {
        match joined {
            Ok((index, outcome)) => outcomes[index] = Some(outcome),
            Err(err) => warn!(error = %err, "request task failed"),
        }
    }

    outcomes
        .into_iter()
        .map(|outcome| {
            outcome.unwrap_or_else(|| {
                Err(StatsError::TaskFailed(
                    "request task did not complete".to_string(),
                ))
            })
        })
        .collect()
}

/// List every repository's commits authored by `identity`
///
/// Returns one list per repository, in repository order. A repository whose
/// listing fails (for example 409 for an empty repository) contributes an
/// empty list and a warning instead of an error.
pub async fn discover_commits(
    client: &ApiClient,
    credential: &str,
    repos: &[Repository],
    identity: &str,
) -> Vec<Vec<CommitSummary>> {
    let requests: Vec<ApiRequest> = repos
        .iter()
        .map(|repo| ApiRequest::new(repo.commits_url(), credential).query("author", identity))
        .collect();

    let task_client = client.clone();
    let outcomes = best_effort(requests, move |request| {
        let client = task_client.clone();
        async move { client.fetch_all::<CommitSummary>(request).await }
    })
    .await;

    let lists: Vec<Vec<CommitSummary>> = outcomes
        .into_iter()
        .zip(repos)
        .map(|(outcome, repo)| match outcome {
            Ok(commits) => {
                debug!(repository = %repo.full_name, commits = commits.len(), "listed commits");
                commits
            }
            Err(err) => {
                warn!(repository = %repo.full_name, error = %err, "skipping repository commits");
                Vec::new()
            }
        })
        .collect();

    info!(
        repositories = repos.len(),
        commits = lists.iter().map(Vec::len).sum::<usize>(),
        "discovered commits"
    );
    lists
}

/// Whether the commit's linked author account is `identity`
///
/// Logins are compared ignoring ASCII case, as GitHub does.
#[must_use]
pub fn is_authored_by(summary: &CommitSummary, identity: &str) -> bool {
    summary
        .author_login()
        .is_some_and(|login| login.eq_ignore_ascii_case(identity))
}

/// Detail URLs of the commits authored by `identity`
///
/// Order is preserved within each repository's list.
#[must_use]
pub fn attributed_commit_urls(per_repository: &[Vec<CommitSummary>], identity: &str) -> Vec<String> {
    per_repository
        .iter()
        .flatten()
        .filter(|summary| {
            let authored = is_authored_by(summary, identity);
            if !authored {
                debug!(
                    sha = %summary.sha,
                    author = ?summary.author_login(),
                    "skipping commit by another author"
                );
            }
            authored
        })
        .map(|summary| summary.url.clone())
        .collect()
}

/// Language and added characters of a changed file
///
/// Returns `None` for files with no recognized language. A recognized file
/// without a usable patch (binary, rename only, unparseable) contributes 0.
#[must_use]
pub fn file_contribution(file: &CommitFile) -> Option<FileContribution> {
    let language = detect_language(&file.filename)?;
    let Some(patch) = file.patch.as_deref() else {
        debug!(
            file = %file.filename,
            status = file.status.as_deref().unwrap_or("unknown"),
            "no patch, counting 0 bytes"
        );
        return Some((language, 0));
    };

    let bytes = match parse_patch(patch) {
        Ok(hunks) => added_chars(&hunks) as u64,
        Err(err) => {
            debug!(
                file = %file.filename,
                status = file.status.as_deref().unwrap_or("unknown"),
                error = %err,
                "unparseable patch, counting 0 bytes"
            );
            0
        }
    };
    Some((language, bytes))
}

/// Per-file contributions of a commit, skipping unrecognized files
#[must_use]
pub fn commit_contributions(detail: &CommitDetail) -> Vec<FileContribution> {
    detail.files.iter().filter_map(file_contribution).collect()
}

/// Fetch every commit in `urls` and tally its files per language
///
/// # Errors
///
/// Returns the first error from any commit detail request.
pub async fn commit_detail_totals(
    client: &ApiClient,
    credential: &str,
    urls: Vec<String>,
) -> Result<CommitTotals, StatsError> {
    let count = urls.len();
    let task_client = client.clone();
    let credential = credential.to_string();
    let per_commit = try_fan_out(urls, move |url| {
        let client = task_client.clone();
        let request = ApiRequest::new(url, &credential);
        async move {
            let detail: CommitDetail = client.get_json(&request).await?;
            debug!(sha = %detail.sha, files = detail.files.len(), "fetched commit");
            Ok(commit_contributions(&detail))
        }
    })
    .await?;

    let mut totals = CommitTotals::new();
    for contributions in per_commit {
        totals.record_commit(contributions);
    }
    info!(
        commits = count,
        languages = totals.len(),
        "tallied commit languages"
    );
    Ok(totals)
}
