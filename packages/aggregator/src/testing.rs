//! Testing utilities including a mock transport.
//!
//! Useful for exercising adapters and the aggregator without making
//! real network calls.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::error::{SourceError, SourceResult};
use crate::traits::Fetcher;

type ErrorFactory = Box<dyn Fn() -> SourceError + Send + Sync>;

enum Canned {
    Body(String),
    Error(ErrorFactory),
}

/// Mock fetcher returning canned responses matched by URL substring.
///
/// Patterns are tried in registration order; the first whose pattern is
/// contained in the requested URL wins. Unmatched URLs get an HTTP 404
/// error. Every requested URL is recorded for assertions.
///
/// # Example
///
/// ```rust
/// use aggregator::testing::MockFetcher;
///
/// let fetcher = MockFetcher::new()
///     .with_body("start=0", r#"{"jobs": []}"#)
///     .with_error("start=25", || aggregator::SourceError::Timeout {
///         url: "page 2".to_string(),
///     });
/// ```
#[derive(Default)]
pub struct MockFetcher {
    responses: RwLock<Vec<(String, Canned)>>,
    requests: Arc<RwLock<Vec<String>>>,
}

impl MockFetcher {
    /// Create an empty mock fetcher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a body for URLs containing `pattern`.
    pub fn with_body(self, pattern: impl Into<String>, body: impl Into<String>) -> Self {
        self.responses
            .write()
            .unwrap()
            .push((pattern.into(), Canned::Body(body.into())));
        self
    }

    /// Register an error for URLs containing `pattern`.
    ///
    /// Takes a factory because [`SourceError`] carries non-clonable
    /// causes.
    pub fn with_error(
        self,
        pattern: impl Into<String>,
        make: impl Fn() -> SourceError + Send + Sync + 'static,
    ) -> Self {
        self.responses
            .write()
            .unwrap()
            .push((pattern.into(), Canned::Error(Box::new(make))));
        self
    }

    /// Number of requests issued so far.
    pub fn request_count(&self) -> usize {
        self.requests.read().unwrap().len()
    }

    /// URLs requested so far, in order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.read().unwrap().clone()
    }

    /// Forget recorded requests.
    pub fn reset_requests(&self) {
        self.requests.write().unwrap().clear();
    }
}

#[async_trait]
impl Fetcher for MockFetcher {
    async fn get(&self, url: &str) -> SourceResult<String> {
        self.requests.write().unwrap().push(url.to_string());

        let responses = self.responses.read().unwrap();
        for (pattern, canned) in responses.iter() {
            if url.contains(pattern.as_str()) {
                return match canned {
                    Canned::Body(body) => Ok(body.clone()),
                    Canned::Error(make) => Err(make()),
                };
            }
        }

        Err(SourceError::Status {
            status: 404,
            url: url.to_string(),
        })
    }
}
