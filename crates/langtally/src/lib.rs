// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! langtally library
//!
//! Computes per-language usage statistics for a GitHub account, either as
//! bytes summed over repositories or as characters added by the account's
//! own commits. This module exports the core functionality for the
//! `langtally` binary, integration tests and use as a library.

pub mod client;
pub mod commits;
pub mod config;
pub mod error;
pub mod fanout;
pub mod models;
pub mod pagination;
pub mod report;
pub mod repos;
pub mod stats;
pub mod totals;
pub mod validate;

pub use client::{ApiClient, ApiRequest, ApiResponse, HttpTransport, Transport};
pub use error::StatsError;
pub use pagination::{PageLink, parse_link_header};
pub use repos::{Affiliation, RepoOptions, Visibility};
pub use stats::{LanguageStats, StatsConfig};
pub use totals::{ByteTotals, CommitTotals, LanguageActivity};
