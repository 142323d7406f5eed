// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Paginated collection fetching
//!
//! GitHub list endpoints return at most `per_page` items and describe the
//! remaining pages in a `Link` header. A collection is fetched in two
//! phases: page 1 alone (to learn the extent), then the remaining pages
//! concurrently.

use reqwest::Url;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::client::{ApiClient, ApiRequest};
use crate::error::StatsError;
use crate::fanout::try_fan_out;
use crate::validate::validate_credential;

/// Items requested per page (the API maximum)
pub const PER_PAGE: u32 = 100;

/// Highest page number ever requested for one collection
pub const MAX_PAGES: u32 = 1_000;

/// Page numbers advertised by a `Link` header
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageLink {
    /// The `rel="next"` page
    pub next: Option<u32>,
    /// The `rel="last"` page
    pub last: Option<u32>,
}

/// Parse a `Link` header value
///
/// Entries without a readable `page` query parameter are ignored, so a
/// missing or unrelated header yields an empty [`PageLink`].
#[must_use]
pub fn parse_link_header(value: &str) -> PageLink {
    let mut link = PageLink::default();
    let mut rest = value;

    while let Some(open) = rest.find('<') {
        let after = &rest[open + 1..];
        let Some(close) = after.find('>') else {
            break;
        };
        let target = &after[..close];
        let tail = &after[close + 1..];
        // URLs may contain commas (e.g. `affiliation=owner,collaborator`),
        // so parameters run until the next `<` rather than the next comma.
        let params_end = tail.find('<').unwrap_or(tail.len());
        let params = &tail[..params_end];
        rest = &tail[params_end..];

        let page = page_number(target);
        for rel in rel_values(params) {
            match rel {
                "next" => link.next = page,
                "last" => link.last = page,
                _ => {}
            }
        }
    }

    link
}

fn rel_values(params: &str) -> impl Iterator<Item = &str> {
    params
        .split(';')
        .filter_map(|param| param.trim().strip_prefix("rel="))
        .flat_map(|value| {
            value
                .trim_matches(|c: char| c == '"' || c == ',' || c.is_whitespace())
                .split_whitespace()
        })
}

fn page_number(target: &str) -> Option<u32> {
    let url = Url::parse(target).ok()?;
    let page = url
        .query_pairs()
        .find(|(key, _)| key == "page")
        .and_then(|(_, value)| value.parse().ok());
    page
}

impl ApiClient {
    /// Fetch every item of a paginated collection, in page order
    ///
    /// # Errors
    ///
    /// Returns `StatsError::Validation` for an unusable credential (before
    /// any request), and the first error of any page request.
    pub async fn fetch_all<T>(&self, request: ApiRequest) -> Result<Vec<T>, StatsError>
    where
        T: DeserializeOwned + Send + 'static,
    {
        validate_credential(&request.credential)?;
        let request = request.query("per_page", PER_PAGE.to_string());

        // Phase 1: discover the extent
        let (mut items, link) = self.fetch_page::<T>(&request, None).await?;

        // Phase 2: fetch the remainder
        match (link.next, link.last) {
            (next, Some(last)) if last > 1 => {
                // Page 1 is already in hand
                let first = next.unwrap_or(2).max(2);
                if last > MAX_PAGES {
                    warn!(url = %request.url, last, max = MAX_PAGES, "truncating pagination");
                }
                let last = last.min(MAX_PAGES);
                if first > last {
                    warn!(url = %request.url, first, last, "next page lies beyond the last page");
                    return Ok(items);
                }
                debug!(url = %request.url, first, last, "fetching remaining pages");
                let client = self.clone();
                let pages = try_fan_out((first..=last).collect(), move |page| {
                    let client = client.clone();
                    let request = request.clone();
                    async move {
                        client
                            .fetch_page::<T>(&request, Some(page))
                            .await
                            .map(|(items, _)| items)
                    }
                })
                .await?;
                items.extend(pages.into_iter().flatten());
            }
            (Some(next), _) if next > 1 => {
                debug!(url = %request.url, next, "no last page advertised, following next links");
                let mut cursor = Some(next);
                while let Some(page) = cursor {
                    let (page_items, link) = self.fetch_page::<T>(&request, Some(page)).await?;
                    items.extend(page_items);
                    cursor = link.next.filter(|n| *n > page && *n <= MAX_PAGES);
                }
            }
            (next, last) => {
                debug!(url = %request.url, ?next, ?last, "single page");
            }
        }

        Ok(items)
    }

    async fn fetch_page<T: DeserializeOwned>(
        &self,
        request: &ApiRequest,
        page: Option<u32>,
    ) -> Result<(Vec<T>, PageLink), StatsError> {
        let request = match page {
            Some(page) => request.clone().query("page", page.to_string()),
            None => request.clone(),
        };
        let response = self.send(&request).await?;
        let link = response
            .link
            .as_deref()
            .map(parse_link_header)
            .unwrap_or_default();
        let items: Vec<T> = response.json(&request.url)?;
        debug!(url = %request.url, page = page.unwrap_or(1), items = items.len(), "fetched page");
        Ok((items, link))
    }
}
