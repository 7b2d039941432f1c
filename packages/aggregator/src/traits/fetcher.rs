//! Transport seam: plain HTTP GET returning a body or a typed error.
//!
//! Adapters never touch `reqwest` directly; they talk to a [`Fetcher`]
//! so tests can substitute canned responses (see `testing::MockFetcher`).

use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::{SourceError, SourceResult};

/// Browser-like User-Agent sent with every upstream request.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Capability to fetch one URL and return the response body.
///
/// Implementations return the body only for success statuses; a non-2xx
/// response surfaces as [`SourceError::Status`] so adapters can treat it
/// like any other per-request failure.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// GET the URL and return the response body on success.
    async fn get(&self, url: &str) -> SourceResult<String>;
}

/// `reqwest`-backed fetcher with a fixed timeout and browser User-Agent.
pub struct HttpFetcher {
    client: reqwest::Client,
    user_agent: String,
}

impl HttpFetcher {
    /// Create a fetcher with the default 15 second timeout.
    pub fn new() -> SourceResult<Self> {
        Self::with_timeout(Duration::from_secs(15))
    }

    /// Create a fetcher with a custom request timeout.
    pub fn with_timeout(timeout: Duration) -> SourceResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SourceError::Http(Box::new(e)))?;

        Ok(Self {
            client,
            user_agent: BROWSER_USER_AGENT.to_string(),
        })
    }

    /// Override the User-Agent header.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn get(&self, url: &str) -> SourceResult<String> {
        debug!(url = %url, "HTTP fetch starting");
        let response = self
            .client
            .get(url)
            .header("User-Agent", &self.user_agent)
            .send()
            .await
            .map_err(|e| {
                warn!(url = %url, error = %e, "HTTP request failed");
                if e.is_timeout() {
                    SourceError::Timeout {
                        url: url.to_string(),
                    }
                } else {
                    SourceError::Http(Box::new(e))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        response
            .text()
            .await
            .map_err(|e| SourceError::Http(Box::new(e)))
    }
}
