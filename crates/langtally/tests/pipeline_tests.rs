// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! End-to-end tests of the four language operations over a scripted API
//!
//! These tests drive `LanguageStats` through repository listing,
//! pagination, language maps, commit attribution and commit details, and
//! check the request traffic the pipeline produces.


use langtally::client::{ApiClient, ApiRequest, ApiResponse};
use langtally::error::StatsError;
use langtally::pagination::MAX_PAGES;
use langtally::repos::{Affiliation, RepoOptions, Visibility};
use serde_json::{Value, json};

use fixtures::{
    API, ScriptedTransport, TOKEN, commit_detail_json, commit_summary_json, commit_url, file_json,
    repo_json, repo_url, stats_with,
};

// ============================================================================
// Helpers
// ============================================================================

fn user_repos() -> String {
    format!("{API}/user/repos")
}

fn route_identity(transport: &ScriptedTransport, login: &str) {
    transport.route(
        &format!("{API}/user"),
        ApiResponse::ok(json!({ "login": login, "id": 7 })),
    );
}

fn route_languages(transport: &ScriptedTransport, full_name: &str, languages: Value) {
    transport.route(
        &format!("{}/languages", repo_url(full_name)),
        ApiResponse::ok(languages),
    );
}

fn route_commits(transport: &ScriptedTransport, full_name: &str, commits: Vec<Value>) {
    transport.route(
        &format!("{}/commits", repo_url(full_name)),
        ApiResponse::ok(Value::Array(commits)),
    );
}

fn route_detail(transport: &ScriptedTransport, full_name: &str, sha: &str, files: Vec<Value>) {
    transport.route(
        &commit_url(full_name, sha),
        ApiResponse::ok(commit_detail_json(sha, files)),
    );
}

// ============================================================================
// Repository mode
// ============================================================================

#[tokio::test]
async fn test_repo_languages_sums_across_repositories() {
    let transport = ScriptedTransport::new();
    transport.route(
        &user_repos(),
        ApiResponse::ok(json!([repo_json("me/one"), repo_json("me/two")])),
    );
    route_languages(&transport, "me/one", json!({"Rust": 1000, "Shell": 20}));
    route_languages(&transport, "me/two", json!({"Rust": 500, "Jupyter Notebook": 7}));

    let stats = stats_with(transport.clone(), 10);
    let totals = stats
        .repo_languages(TOKEN, None)
        .await
        .expect("repo languages");

    assert_eq!(totals.get("Rust"), Some(1500));
    assert_eq!(totals.get("Shell"), Some(20));
    assert_eq!(totals.get("Jupyter Notebook"), Some(7));
    assert_eq!(totals.len(), 3);
    assert_eq!(transport.call_count(), 3);
}

#[tokio::test]
async fn test_repo_listing_sends_default_scope() {
    let transport = ScriptedTransport::new();
    transport.route(&user_repos(), ApiResponse::ok(json!([])));

    let stats = stats_with(transport.clone(), 10);
    let totals = stats
        .repo_languages(TOKEN, None)
        .await
        .expect("repo languages");
    assert!(totals.is_empty());

    let calls = transport.calls();
    assert_eq!(calls.len(), 1);
    let listing = &calls[0];
    assert_eq!(listing.credential, TOKEN);
    assert_eq!(listing.query_value("visibility"), Some("public"));
    assert_eq!(
        listing.query_value("affiliation"),
        Some("owner,collaborator,organization_member")
    );
    assert_eq!(listing.query_value("per_page"), Some("100"));
}

#[tokio::test]
async fn test_repo_listing_sends_explicit_scope() {
    let transport = ScriptedTransport::new();
    transport.route(&user_repos(), ApiResponse::ok(json!([])));

    let options = RepoOptions::default()
        .with_visibility(Visibility::All)
        .with_affiliation([Affiliation::Owner]);
    let stats = stats_with(transport.clone(), 10);
    stats
        .repo_languages(TOKEN, Some(&options))
        .await
        .expect("repo languages");

    let calls = transport.calls();
    assert_eq!(calls[0].query_value("visibility"), Some("all"));
    assert_eq!(calls[0].query_value("affiliation"), Some("owner"));
}

#[tokio::test]
async fn test_repo_languages_by_username_uses_user_endpoint() {
    let transport = ScriptedTransport::new();
    transport.route(
        &format!("{API}/users/octocat/repos"),
        ApiResponse::ok(json!([repo_json("octocat/hello")])),
    );
    route_languages(&transport, "octocat/hello", json!({"C": 42}));

    let stats = stats_with(transport.clone(), 10);
    let totals = stats
        .repo_languages_by_username(TOKEN, "octocat")
        .await
        .expect("by username");

    assert_eq!(totals.get("C"), Some(42));
    assert_eq!(transport.calls_to(&user_repos()), 0);
    let calls = transport.calls();
    let listing = &calls[0];
    assert_eq!(listing.query_value("visibility"), None);
    assert_eq!(listing.query_value("affiliation"), None);
}

#[tokio::test]
async fn test_remote_error_passes_through() {
    let transport = ScriptedTransport::new();
    transport.route(&user_repos(), ApiResponse::error(401, "Bad credentials"));

    let stats = stats_with(transport.clone(), 10);
    let err = stats
        .repo_languages(TOKEN, None)
        .await
        .expect_err("401 should reject");

    match err {
        StatsError::Remote { status, message } => {
            assert_eq!(status, 401);
            assert_eq!(message, "Bad credentials");
        }
        other => panic!("expected remote error, got {other:?}"),
    }
    assert_eq!(transport.call_count(), 1);
}

#[tokio::test]
async fn test_languages_failure_rejects_operation() {
    let transport = ScriptedTransport::new();
    transport.route(
        &user_repos(),
        ApiResponse::ok(json!([repo_json("me/one"), repo_json("me/gone")])),
    );
    route_languages(&transport, "me/one", json!({"Rust": 1}));

    let stats = stats_with(transport, 10);
    let err = stats
        .repo_languages(TOKEN, None)
        .await
        .expect_err("missing languages should reject");
    assert_eq!(err.status(), Some(404));
}

#[tokio::test]
async fn test_unexpected_body_is_decode_error() {
    let transport = ScriptedTransport::new();
    transport.route(&user_repos(), ApiResponse::ok(json!({"not": "a list"})));

    let stats = stats_with(transport, 10);
    let err = stats
        .repo_languages(TOKEN, None)
        .await
        .expect_err("object body should reject");
    assert!(matches!(err, StatsError::Decode { .. }));
}

// ============================================================================
// Validation before any request
// ============================================================================

#[tokio::test]
async fn test_empty_credential_makes_no_requests() {
    let transport = ScriptedTransport::new();
    let stats = stats_with(transport.clone(), 10);

    for credential in ["", "   "] {
        let results = [
            stats.repo_languages(credential, None).await.err(),
            stats
                .repo_languages_by_username(credential, "octocat")
                .await
                .err(),
        ];
        for err in results {
            assert!(err.is_some_and(|e| e.is_validation()));
        }
        let err = stats.commit_languages(credential, None).await.err();
        assert!(err.is_some_and(|e| e.is_validation()));
        let err = stats
            .commit_languages_by_username(credential, "octocat")
            .await
            .err();
        assert!(err.is_some_and(|e| e.is_validation()));
    }

    assert_eq!(transport.call_count(), 0);
}

#[tokio::test]
async fn test_bad_username_makes_no_requests() {
    let transport = ScriptedTransport::new();
    let stats = stats_with(transport.clone(), 10);

    let too_long = "a".repeat(40);
    for username in ["", "has space", "../etc", too_long.as_str()] {
        let err = stats
            .repo_languages_by_username(TOKEN, username)
            .await
            .expect_err("bad username");
        assert!(err.is_validation(), "{username:?} should fail validation");
    }
    assert_eq!(transport.call_count(), 0);
}

#[tokio::test]
async fn test_empty_affiliation_makes_no_requests() {
    let transport = ScriptedTransport::new();
    let stats = stats_with(transport.clone(), 10);
    let options = RepoOptions::default().with_affiliation(Vec::new());

    let err = stats
        .commit_languages(TOKEN, Some(&options))
        .await
        .expect_err("empty affiliation");
    assert!(err.is_validation());
    assert_eq!(transport.call_count(), 0);
}

// ============================================================================
// Pagination and the concurrency bound
// ============================================================================

async fn fetch_500(bound: usize) -> (Vec<u32>, std::sync::Arc<ScriptedTransport>) {
    let transport = ScriptedTransport::new();
    let items: Vec<Value> = (0..500u32).map(|i| json!(i)).collect();
    transport.route_paginated(&format!("{API}/items"), &items, 100);

    let client = ApiClient::new(transport.clone(), bound);
    let fetched: Vec<u32> = client
        .fetch_all(ApiRequest::new(format!("{API}/items"), TOKEN))
        .await
        .expect("fetch all pages");
    (fetched, transport)
}

#[tokio::test]
async fn test_pagination_complete_for_every_bound() {
    for bound in [1, 5, 50] {
        let (fetched, transport) = fetch_500(bound).await;
        similar_asserts::assert_eq!(fetched, (0..500u32).collect::<Vec<_>>());
        assert_eq!(transport.call_count(), 5, "bound {bound}");
        assert!(transport.max_in_flight() <= bound, "bound {bound}");
    }
}

#[tokio::test]
async fn test_bound_of_one_serializes_requests() {
    let (_, transport) = fetch_500(1).await;
    assert_eq!(transport.max_in_flight(), 1);
}

#[tokio::test]
async fn test_every_page_requested_once() {
    let (_, transport) = fetch_500(5).await;
    let mut pages: Vec<String> = transport
        .calls()
        .iter()
        .map(|r| r.query_value("page").unwrap_or("1").to_string())
        .collect();
    pages.sort();
    assert_eq!(pages, vec!["1", "2", "3", "4", "5"]);
    assert!(
        transport
            .calls()
            .iter()
            .all(|r| r.query_value("per_page") == Some("100"))
    );
}

#[tokio::test]
async fn test_next_without_last_is_followed() {
    let transport = ScriptedTransport::new();
    let url = format!("{API}/items");
    transport.route_page(
        &url,
        1,
        ApiResponse::ok(json!([1, 2])).with_link(format!("<{url}?page=2>; rel=\"next\"")),
    );
    transport.route_page(
        &url,
        2,
        ApiResponse::ok(json!([3])).with_link(format!("<{url}?page=3>; rel=\"next\"")),
    );
    transport.route_page(&url, 3, ApiResponse::ok(json!([4])));

    let client = ApiClient::new(transport.clone(), 4);
    let fetched: Vec<u32> = client
        .fetch_all(ApiRequest::new(url, TOKEN))
        .await
        .expect("follow next links");
    similar_asserts::assert_eq!(fetched, vec![1, 2, 3, 4]);
    assert_eq!(transport.call_count(), 3);
}

#[tokio::test]
async fn test_next_pointing_at_first_page_not_refetched() {
    let transport = ScriptedTransport::new();
    let url = format!("{API}/items");
    transport.route_page(
        &url,
        1,
        ApiResponse::ok(json!([1, 2])).with_link(format!(
            "<{url}?page=1>; rel=\"next\", <{url}?page=3>; rel=\"last\""
        )),
    );
    transport.route_page(&url, 2, ApiResponse::ok(json!([3])));
    transport.route_page(&url, 3, ApiResponse::ok(json!([4])));

    let client = ApiClient::new(transport.clone(), 4);
    let fetched: Vec<u32> = client
        .fetch_all(ApiRequest::new(url, TOKEN))
        .await
        .expect("fetch all pages");
    similar_asserts::assert_eq!(fetched, vec![1, 2, 3, 4]);
    assert_eq!(transport.call_count(), 3);
}

#[tokio::test]
async fn test_last_without_next_fetches_remaining_pages() {
    let transport = ScriptedTransport::new();
    let url = format!("{API}/items");
    transport.route_page(
        &url,
        1,
        ApiResponse::ok(json!([1])).with_link(format!("<{url}?page=2>; rel=\"last\"")),
    );
    transport.route_page(&url, 2, ApiResponse::ok(json!([2])));

    let client = ApiClient::new(transport.clone(), 4);
    let fetched: Vec<u32> = client
        .fetch_all(ApiRequest::new(url, TOKEN))
        .await
        .expect("fetch all pages");
    similar_asserts::assert_eq!(fetched, vec![1, 2]);
}

#[tokio::test]
async fn test_advertised_last_page_is_capped() {
    let transport = ScriptedTransport::new();
    let url = format!("{API}/items");
    transport.route_page(
        &url,
        1,
        ApiResponse::ok(json!([])).with_link(format!(
            "<{url}?page=2>; rel=\"next\", <{url}?page=4000000000>; rel=\"last\""
        )),
    );
    for page in 2..=MAX_PAGES {
        transport.route_page(&url, page, ApiResponse::ok(json!([])));
    }

    let client = ApiClient::new(transport.clone(), 50);
    let fetched: Vec<u32> = client
        .fetch_all(ApiRequest::new(url, TOKEN))
        .await
        .expect("pages beyond the cap are not requested");
    assert!(fetched.is_empty());
    assert_eq!(transport.call_count(), MAX_PAGES as usize);
}

#[tokio::test]
async fn test_nested_fan_out_shares_bound() {
    let transport = ScriptedTransport::new();
    let repos: Vec<Value> = (0..150)
        .map(|i| repo_json(&format!("me/repo{i}")))
        .collect();
    transport.route_paginated(&user_repos(), &repos, 100);
    for i in 0..150 {
        route_languages(&transport, &format!("me/repo{i}"), json!({"Rust": 2}));
    }

    let stats = stats_with(transport.clone(), 5);
    let totals = stats
        .repo_languages(TOKEN, None)
        .await
        .expect("repo languages");

    assert_eq!(totals.get("Rust"), Some(300));
    assert_eq!(transport.call_count(), 152);
    assert!(transport.max_in_flight() <= 5);
}

// ============================================================================
// Commit mode
// ============================================================================

#[tokio::test]
async fn test_commit_languages_counts_files_and_commits() {
    let transport = ScriptedTransport::new();
    route_identity(&transport, "alice");
    transport.route(&user_repos(), ApiResponse::ok(json!([repo_json("alice/app")])));
    route_commits(
        &transport,
        "alice/app",
        vec![commit_summary_json("alice/app", "c1", Some("alice"))],
    );
    route_detail(
        &transport,
        "alice/app",
        "c1",
        vec![
            file_json("src/a.rs", &["0123456789"]),
            file_json("src/b.rs", &["01234"]),
            file_json("tools/c.py", &["abc"]),
            file_json("README", &["ignored"]),
        ],
    );

    let stats = stats_with(transport.clone(), 10);
    let totals = stats
        .commit_languages(TOKEN, None)
        .await
        .expect("commit languages");

    let rust = totals.get("Rust").expect("Rust");
    assert_eq!((rust.bytes, rust.commits), (15, 1));
    let python = totals.get("Python").expect("Python");
    assert_eq!((python.bytes, python.commits), (3, 1));
    assert_eq!(totals.len(), 2);

    let listing = transport
        .calls()
        .into_iter()
        .find(|r| r.url.ends_with("/commits"))
        .expect("commit listing request");
    assert_eq!(listing.query_value("author"), Some("alice"));
}

#[tokio::test]
async fn test_commit_attribution_filters_other_authors() {
    let transport = ScriptedTransport::new();
    route_identity(&transport, "alice");
    transport.route(
        &user_repos(),
        ApiResponse::ok(json!([repo_json("team/one"), repo_json("team/two")])),
    );
    route_commits(
        &transport,
        "team/one",
        vec![
            commit_summary_json("team/one", "a1", Some("alice")),
            commit_summary_json("team/one", "b1", Some("bob")),
            commit_summary_json("team/one", "a2", Some("Alice")),
        ],
    );
    route_commits(
        &transport,
        "team/two",
        vec![
            commit_summary_json("team/two", "b2", Some("bob")),
            commit_summary_json("team/two", "a3", Some("alice")),
            commit_summary_json("team/two", "n1", None),
        ],
    );
    for (repo, sha) in [("team/one", "a1"), ("team/one", "a2"), ("team/two", "a3")] {
        route_detail(&transport, repo, sha, vec![file_json("lib.go", &["go"])]);
    }

    let stats = stats_with(transport.clone(), 10);
    let totals = stats
        .commit_languages(TOKEN, None)
        .await
        .expect("unrouted bob commits must not be fetched");

    let go = totals.get("Go").expect("Go");
    assert_eq!((go.bytes, go.commits), (6, 3));
    assert_eq!(transport.calls_to(&commit_url("team/one", "b1")), 0);
    assert_eq!(transport.calls_to(&commit_url("team/two", "n1")), 0);
}

#[tokio::test]
async fn test_failed_commit_listing_is_skipped() {
    let transport = ScriptedTransport::new();
    route_identity(&transport, "alice");
    transport.route(
        &user_repos(),
        ApiResponse::ok(json!([repo_json("alice/empty"), repo_json("alice/full")])),
    );
    transport.route(
        &format!("{}/commits", repo_url("alice/empty")),
        ApiResponse::error(409, "Git Repository is empty."),
    );
    route_commits(
        &transport,
        "alice/full",
        (1..=3)
            .map(|i| commit_summary_json("alice/full", &format!("c{i}"), Some("alice")))
            .collect(),
    );
    for i in 1..=3 {
        route_detail(
            &transport,
            "alice/full",
            &format!("c{i}"),
            vec![file_json("main.ts", &["let x = 1;"])],
        );
    }

    let stats = stats_with(transport, 10);
    let totals = stats
        .commit_languages(TOKEN, None)
        .await
        .expect("409 on one repository is tolerated");

    let ts = totals.get("TypeScript").expect("TypeScript");
    assert_eq!((ts.bytes, ts.commits), (30, 3));
}

#[tokio::test]
async fn test_commit_detail_failure_rejects_operation() {
    let transport = ScriptedTransport::new();
    route_identity(&transport, "alice");
    transport.route(&user_repos(), ApiResponse::ok(json!([repo_json("alice/app")])));
    route_commits(
        &transport,
        "alice/app",
        vec![commit_summary_json("alice/app", "c1", Some("alice"))],
    );
    transport.route(
        &commit_url("alice/app", "c1"),
        ApiResponse::error(500, "Server Error"),
    );

    let stats = stats_with(transport, 10);
    let err = stats
        .commit_languages(TOKEN, None)
        .await
        .expect_err("detail failure rejects");
    assert_eq!(err.status(), Some(500));
}

#[tokio::test]
async fn test_identity_failure_rejects_operation() {
    let transport = ScriptedTransport::new();
    transport.route(&format!("{API}/user"), ApiResponse::error(401, "Bad credentials"));

    let stats = stats_with(transport.clone(), 10);
    let err = stats
        .commit_languages(TOKEN, None)
        .await
        .expect_err("identity failure rejects");
    assert_eq!(err.status(), Some(401));
    assert_eq!(transport.call_count(), 1);
}

#[tokio::test]
async fn test_commit_languages_by_username_skips_identity_lookup() {
    let transport = ScriptedTransport::new();
    transport.route(
        &format!("{API}/users/octocat/repos"),
        ApiResponse::ok(json!([repo_json("octocat/hello")])),
    );
    route_commits(
        &transport,
        "octocat/hello",
        vec![commit_summary_json("octocat/hello", "c1", Some("octocat"))],
    );
    route_detail(
        &transport,
        "octocat/hello",
        "c1",
        vec![
            file_json("hello.c", &["int main;"]),
            json!({"filename": "logo.png", "status": "added"}),
            json!({"filename": "gen.c", "status": "added"}),
        ],
    );

    let stats = stats_with(transport.clone(), 10);
    let totals = stats
        .commit_languages_by_username(TOKEN, "octocat")
        .await
        .expect("by username");

    let c = totals.get("C").expect("C");
    assert_eq!((c.bytes, c.commits), (9, 1));
    assert_eq!(totals.len(), 1);
    assert_eq!(transport.calls_to(&format!("{API}/user")), 0);
}

#[tokio::test]
async fn test_no_repositories_gives_empty_commit_totals() {
    let transport = ScriptedTransport::new();
    route_identity(&transport, "alice");
    transport.route(&user_repos(), ApiResponse::ok(json!([])));

    let stats = stats_with(transport.clone(), 10);
    let totals = stats
        .commit_languages(TOKEN, None)
        .await
        .expect("commit languages");
    assert!(totals.is_empty());
    assert_eq!(transport.call_count(), 2);
}
