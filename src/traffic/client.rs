//! GitHub traffic API client
//!
//! Minimal client for the repository traffic-views endpoint. One GET per
//! run, no retries: a failed fetch fails the run before anything is merged
//! or written.

use crate::Result;
use ohno::{IntoAppError, bail};
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use serde::Deserialize;

const LOG_TARGET: &str = "    client";

/// Base URL of the GitHub REST API.
pub const GITHUB_API_BASE: &str = "https://api.github.com";

/// A single day's views as returned by the traffic endpoint.
///
/// The endpoint covers at most the last 14 days and may omit days or be
/// empty entirely.
#[derive(Debug, Clone, Deserialize)]
pub struct TrafficView {
    /// UTC instant marking the day, ISO-8601 with a `Z` suffix.
    pub timestamp: String,

    /// Raw page views for the day.
    pub count: u64,

    /// Distinct visitors for the day.
    pub uniques: u64,
}

/// Envelope of the traffic-views response; only `views` matters.
#[derive(Debug, Deserialize)]
struct ViewsResponse {
    views: Vec<TrafficView>,
}

/// Traffic API client holding the authenticated HTTP client.
#[derive(Debug, Clone)]
pub struct Client {
    client: reqwest::Client,
    base_url: String,
}

impl Client {
    /// Create a new traffic API client authenticated with the given token.
    pub fn new(token: &str, base_url: impl Into<String>) -> Result<Self> {
        let mut auth_val = HeaderValue::from_str(&format!("Bearer {token}"))?;
        auth_val.set_sensitive(true);

        let mut headers = HeaderMap::new();
        let _ = headers.insert(AUTHORIZATION, auth_val);
        let _ = headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));

        Ok(Self {
            client: reqwest::Client::builder().user_agent("repo-traffic").default_headers(headers).build()?,
            base_url: base_url.into(),
        })
    }

    /// Get the base URL for this client.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the per-day view counts for a repository.
    ///
    /// Any non-2xx response is a permanent failure for this run.
    pub async fn fetch_views(&self, owner: &str, repo: &str) -> Result<Vec<TrafficView>> {
        let url = format!("{}/repos/{owner}/{repo}/traffic/views?per=day", self.base_url);
        log::debug!(target: LOG_TARGET, "GET {url}");

        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .into_app_err_with(|| format!("requesting traffic views for {owner}/{repo}"))?;

        let status = resp.status();
        if !status.is_success() {
            bail!("traffic views request for {owner}/{repo} failed with status {status}");
        }

        let body: ViewsResponse = resp
            .json()
            .await
            .into_app_err_with(|| format!("decoding traffic views response for {owner}/{repo}"))?;

        log::debug!(target: LOG_TARGET, "received {} day(s) of views for {owner}/{repo}", body.views.len());
        Ok(body.views)
    }
}
