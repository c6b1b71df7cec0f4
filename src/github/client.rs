//! GitHub REST API client
//!
//! This module provides a shared HTTP client with:
//! - Configurable timeout and User-Agent
//! - Bearer token authentication
//! - Exponential backoff retry on rate limiting and transport errors
//! - API error responses mapped to `FetchError::Api`

use crate::error::FetchError;
use reqwest::header::ACCEPT;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;

/// Default GitHub API base URL
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Default timeout for HTTP requests (30 seconds)
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default User-Agent header
const DEFAULT_USER_AGENT: &str = concat!("fetch-metadata/", env!("CARGO_PKG_VERSION"));

/// Media type requested from the API
const GITHUB_MEDIA_TYPE: &str = "application/vnd.github+json";

/// Maximum number of retry attempts
const MAX_RETRIES: u32 = 3;

/// Base delay for exponential backoff (in milliseconds)
const BASE_DELAY_MS: u64 = 100;

/// Error body returned by the GitHub API
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// GitHub API client with retry logic
#[derive(Clone)]
pub struct GithubClient {
    client: Client,
    api_url: String,
    token: String,
    max_retries: u32,
}

impl GithubClient {
    /// Create a new client for the public GitHub API
    pub fn new(token: impl Into<String>) -> Result<Self, FetchError> {
        Self::with_config(DEFAULT_API_URL, token, DEFAULT_TIMEOUT)
    }

    /// Create a new client for a custom API base URL (GitHub Enterprise, tests)
    pub fn with_api_url(api_url: impl Into<String>, token: impl Into<String>) -> Result<Self, FetchError> {
        Self::with_config(api_url, token, DEFAULT_TIMEOUT)
    }

    /// Create a new client with a custom base URL and timeout
    pub fn with_config(
        api_url: impl Into<String>,
        token: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(DEFAULT_USER_AGENT)
            .build()
            .map_err(|e| FetchError::generic(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_url: api_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
            max_retries: MAX_RETRIES,
        })
    }

    /// Set the maximum number of retries
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Get the API base URL
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Build the full URL for an API path
    fn build_url(&self, path: &str) -> String {
        format!("{}/{}", self.api_url, path.trim_start_matches('/'))
    }

    /// Perform an authenticated GET request with retry logic
    pub async fn get(&self, path: &str) -> Result<reqwest::Response, FetchError> {
        let url = self.build_url(path);
        let mut last_error = None;
        let mut delay = BASE_DELAY_MS;

        for attempt in 0..=self.max_retries {
            let request = self
                .client
                .get(&url)
                .bearer_auth(&self.token)
                .header(ACCEPT, GITHUB_MEDIA_TYPE);

            match request.send().await {
                Ok(response) => {
                    let status = response.status();

                    if status == StatusCode::TOO_MANY_REQUESTS && attempt < self.max_retries {
                        log::debug!("rate limited on {}, retrying in {}ms", url, delay);
                        tokio::time::sleep(Duration::from_millis(delay)).await;
                        delay *= 2;
                        continue;
                    }

                    if !status.is_success() {
                        return Err(Self::api_error(response).await);
                    }

                    return Ok(response);
                }
                Err(e) => {
                    last_error = Some(if e.is_timeout() {
                        FetchError::generic(format!("request to {} timed out", url))
                    } else {
                        FetchError::generic(e.to_string())
                    });

                    if attempt < self.max_retries {
                        log::debug!("request to {} failed, retrying in {}ms: {}", url, delay, e);
                        tokio::time::sleep(Duration::from_millis(delay)).await;
                        delay *= 2;
                    }
                }
            }
        }

        Err(last_error.unwrap_or_else(|| FetchError::generic("unknown error")))
    }

    /// Perform a GET request and parse the JSON response
    pub async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T, FetchError> {
        let response = self.get(path).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| FetchError::generic(format!("failed to parse JSON: {}", e)))
    }

    /// Convert an error response into an API error
    ///
    /// The message comes from the JSON body when present, otherwise from the
    /// status' canonical reason.
    async fn api_error(response: reqwest::Response) -> FetchError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ApiErrorBody>(&body)
            .map(|b| b.message)
            .unwrap_or_else(|_| status.canonical_reason().unwrap_or("Unknown error").to_string());

        FetchError::api(status.as_u16(), message)
    }
}
