use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

const GITHUB_API_BASE: &str = "https://api.github.com";

/// One outbound request per feed load, so keep it bounded.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Error, Debug)]
pub enum GitHubError {
    #[error("API request failed: {0}")]
    RequestFailed(String),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("User not found: {0}")]
    NotFound(String),

    #[error("Authentication required")]
    AuthRequired,

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    ParseError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GitHubError>;

pub struct GitHubClient {
    client: reqwest::Client,
    token: Option<String>,
    base_url: String,
}

impl GitHubClient {
    pub fn new(token: Option<String>) -> Self {
        Self::with_base_url(token, GITHUB_API_BASE.to_string())
    }

    /// For GitHub Enterprise installs (or a stub server in tests)
    pub fn with_base_url(token: Option<String>, base_url: String) -> Self {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::USER_AGENT,
            reqwest::header::HeaderValue::from_static("repofolio/0.1.0"),
        );
        headers.insert(
            reqwest::header::ACCEPT,
            reqwest::header::HeaderValue::from_static("application/vnd.github.v3+json"),
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            token,
            base_url,
        }
    }

    /// List a user's public repositories, most recently pushed first.
    ///
    /// Single request, no pagination beyond `per_page` - the feed only ever
    /// shows the top of the list. Deliberately no retry here either: a
    /// failed load falls back to a static panel, it does not hammer the API.
    pub async fn list_user_repos(&self, username: &str, per_page: u32) -> Result<Vec<GitHubRepo>> {
        let url = format!("{}/users/{}/repos", self.base_url, username);
        debug!("GET {} (per_page={})", url, per_page);

        let mut request = self
            .client
            .get(&url)
            .query(&[("per_page", per_page.to_string().as_str()), ("sort", "pushed")]);

        if let Some(ref token) = self.token {
            request = request.header("Authorization", format!("Bearer {}", token));
        }

        let response = request.send().await?;

        if response.status() == 404 {
            return Err(GitHubError::NotFound(username.to_string()));
        }

        if response.status() == 401 {
            return Err(GitHubError::AuthRequired);
        }

        // GitHub signals an exhausted unauthenticated quota with 403
        if response.status() == 403 || response.status() == 429 {
            return Err(GitHubError::RateLimitExceeded);
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(GitHubError::RequestFailed(format!(
                "Status {}: {}",
                status, body
            )));
        }

        let repos: Vec<GitHubRepo> = response.json().await?;
        Ok(repos)
    }
}

/// The slice of the `/users/:user/repos` payload the feed cares about.
/// Everything numeric or boolean defaults so a sparse payload still parses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubRepo {
    pub name: String,
    pub description: Option<String>,
    pub html_url: String,
    pub homepage: Option<String>,
    pub language: Option<String>,
    #[serde(default)]
    pub stargazers_count: u32,
    /// Repository size in kilobytes, as reported by the API.
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub fork: bool,
    #[serde(default)]
    pub pushed_at: Option<DateTime<Utc>>,
}
