// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! GitHub REST API access
//!
//! Requests go through the [`Transport`] trait so the pipeline can run
//! against a scripted transport in tests. [`ApiClient`] wraps a transport
//! with the process-wide cap on in-flight requests.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use reqwest::header::{ACCEPT, LINK};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::Semaphore;
use tracing::debug;

use crate::error::StatsError;

/// Public GitHub API root
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Maximum number of requests in flight at once
pub const DEFAULT_CONCURRENCY: usize = 10;

const USER_AGENT: &str = concat!("langtally/", env!("CARGO_PKG_VERSION"));
const API_VERSION: &str = "2022-11-28";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// One authenticated GET request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    /// Absolute resource URL
    pub url: String,
    /// Access token sent as a bearer credential
    pub credential: String,
    /// Query parameters, in insertion order
    pub query: Vec<(String, String)>,
}

impl ApiRequest {
    /// Create a request for `url` without query parameters
    #[must_use]
    pub fn new(url: impl Into<String>, credential: &str) -> Self {
        Self {
            url: url.into(),
            credential: credential.to_string(),
            query: Vec::new(),
        }
    }

    /// Set a query parameter, replacing any earlier value for `key`
    #[must_use]
    pub fn query(mut self, key: &str, value: impl Into<String>) -> Self {
        let value = value.into();
        match self.query.iter_mut().find(|(k, _)| k == key) {
            Some(entry) => entry.1 = value,
            None => self.query.push((key.to_string(), value)),
        }
        self
    }

    /// Look up a query parameter
    #[must_use]
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// A response as seen by the pipeline
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    /// HTTP status code
    pub status: u16,
    /// Raw `Link` header, if present
    pub link: Option<String>,
    /// Decoded JSON body (`Null` when empty)
    pub body: Value,
}

impl ApiResponse {
    /// A 200 response with `body`
    #[must_use]
    pub fn ok(body: Value) -> Self {
        Self {
            status: 200,
            link: None,
            body,
        }
    }

    /// An error response in GitHub's `{"message": ...}` shape
    #[must_use]
    pub fn error(status: u16, message: &str) -> Self {
        Self {
            status,
            link: None,
            body: serde_json::json!({ "message": message }),
        }
    }

    /// Attach a `Link` header
    #[must_use]
    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    /// Whether the status is 2xx
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Turn a non-2xx response into `StatsError::Remote`
    ///
    /// # Errors
    ///
    /// Returns `StatsError::Remote` carrying the status and the body's
    /// `message` (or the status reason phrase when the body has none).
    pub fn error_for_status(self) -> Result<Self, StatsError> {
        if self.is_success() {
            return Ok(self);
        }
        let message = self
            .body
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string)
            .or_else(|| {
                StatusCode::from_u16(self.status)
                    .ok()
                    .and_then(|s| s.canonical_reason())
                    .map(str::to_string)
            })
            .unwrap_or_else(|| "Unknown error".to_string());
        Err(StatsError::Remote {
            status: self.status,
            message,
        })
    }

    /// Deserialize the body
    ///
    /// # Errors
    ///
    /// Returns `StatsError::Decode` if the body does not match `T`.
    pub fn json<T: DeserializeOwned>(self, url: &str) -> Result<T, StatsError> {
        serde_json::from_value(self.body).map_err(|source| StatsError::Decode {
            url: url.to_string(),
            source,
        })
    }
}

/// Performs GET requests against the API
#[async_trait]
pub trait Transport: Send + Sync {
    /// Issue `request` and return the raw response, whatever its status
    ///
    /// # Errors
    ///
    /// Returns `StatsError::Transport` if no response was received.
    async fn get(&self, request: &ApiRequest) -> Result<ApiResponse, StatsError>;
}

/// [`Transport`] backed by `reqwest`
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Build a transport with the standard GitHub headers and timeout
    ///
    /// # Errors
    ///
    /// Returns `StatsError::Transport` if the HTTP client cannot be built.
    pub fn new() -> Result<Self, StatsError> {
        Self::from_builder(reqwest::Client::builder())
    }

    /// Build a transport from a caller-configured `reqwest` builder
    ///
    /// The user agent and timeout are applied on top of `builder`.
    ///
    /// # Errors
    ///
    /// Returns `StatsError::Transport` if the HTTP client cannot be built.
    pub fn from_builder(builder: reqwest::ClientBuilder) -> Result<Self, StatsError> {
        let client = builder
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| StatsError::Transport(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, request: &ApiRequest) -> Result<ApiResponse, StatsError> {
        let response = self
            .client
            .get(&request.url)
            .query(&request.query)
            .header(ACCEPT, "application/vnd.github+json")
            .header("X-GitHub-Api-Version", API_VERSION)
            .bearer_auth(&request.credential)
            .send()
            .await
            .map_err(|e| StatsError::Transport(format!("GET {}: {e}", request.url)))?;

        let status = response.status().as_u16();
        let link = response
            .headers()
            .get(LINK)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let text = response
            .text()
            .await
            .map_err(|e| StatsError::Transport(format!("GET {}: {e}", request.url)))?;

        let body = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text).unwrap_or(Value::String(text))
        };

        Ok(ApiResponse { status, link, body })
    }
}

/// A transport shared by every task of an operation, gated by a semaphore
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    permits: Arc<Semaphore>,
    concurrency: usize,
}

impl ApiClient {
    /// Wrap `transport`, allowing at most `concurrency` requests in flight
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>, concurrency: usize) -> Self {
        let concurrency = concurrency.max(1);
        Self {
            transport,
            permits: Arc::new(Semaphore::new(concurrency)),
            concurrency,
        }
    }

    /// The in-flight request limit
    #[must_use]
    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Send `request`, failing on non-2xx responses
    ///
    /// # Errors
    ///
    /// Returns `StatsError::Remote` for error statuses and
    /// `StatsError::Transport` when no response arrives.
    pub async fn send(&self, request: &ApiRequest) -> Result<ApiResponse, StatsError> {
        let _permit = self
            .permits
            .acquire()
            .await
            .map_err(|e| StatsError::TaskFailed(e.to_string()))?;
        debug!(url = %request.url, query = ?request.query, "GET");
        self.transport.get(request).await?.error_for_status()
    }

    /// Send `request` and deserialize the body
    ///
    /// # Errors
    ///
    /// Propagates [`ApiClient::send`] errors and `StatsError::Decode`.
    pub async fn get_json<T: DeserializeOwned>(&self, request: &ApiRequest) -> Result<T, StatsError> {
        self.send(request).await?.json(&request.url)
    }
}
