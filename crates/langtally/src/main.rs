// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! langtally: per-language usage statistics for GitHub accounts
//!
//! This binary crate prints the language breakdown of a GitHub account, as
//! bytes across its repositories (`repos`) or as characters added by its
//! own commits (`commits`).

use anyhow::Context;
use clap::Parser;
use tracing::info;

use langtally::config::{Command, Config, OutputFormat, ScopeArgs};
use langtally::report::{render_bytes_table, render_commit_table, render_json};
use langtally::stats::LanguageStats;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Logs go to stderr so the report on stdout stays machine readable
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(config.log_level().into()),
        )
        .init();

    config.validate()?;
    let token = config.token.as_deref().unwrap_or_default();
    let stats = LanguageStats::github(config.stats_config())?;
    info!(api_url = stats.api_url(), "starting langtally");

    let output = match config.command_or_default() {
        Command::Repos(scope) => {
            let totals = repo_totals(&stats, token, &scope)
                .await
                .context("failed to compute repository languages")?;
            match config.format {
                OutputFormat::Table => render_bytes_table(&totals),
                OutputFormat::Json => render_json(&totals)?,
            }
        }
        Command::Commits(scope) => {
            let totals = commit_totals(&stats, token, &scope)
                .await
                .context("failed to compute commit languages")?;
            match config.format {
                OutputFormat::Table => render_commit_table(&totals),
                OutputFormat::Json => render_json(&totals)?,
            }
        }
    };

    println!("{}", output.trim_end());
    Ok(())
}

async fn repo_totals(
    stats: &LanguageStats,
    token: &str,
    scope: &ScopeArgs,
) -> Result<langtally::ByteTotals, langtally::StatsError> {
    match &scope.user {
        Some(user) => stats.repo_languages_by_username(token, user).await,
        None => {
            stats
                .repo_languages(token, scope.repo_options().as_ref())
                .await
        }
    }
}

async fn commit_totals(
    stats: &LanguageStats,
    token: &str,
    scope: &ScopeArgs,
) -> Result<langtally::CommitTotals, langtally::StatsError> {
    match &scope.user {
        Some(user) => stats.commit_languages_by_username(token, user).await,
        None => {
            stats
                .commit_languages(token, scope.repo_options().as_ref())
                .await
        }
    }
}
