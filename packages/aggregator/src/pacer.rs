//! Fixed-delay pacing between outbound requests.
//!
//! Upstreams here have no published rate limits; the delays are fixed
//! sequential stalls sized per call site to stay within informally
//! observed acceptable request rates. Deliberately not a token bucket
//! and not adaptive — one request in flight at a time per adapter.

use async_trait::async_trait;
use std::time::Duration;

/// Which call site is about to issue the next request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaceContext {
    /// Between individual cards on an HTML listing page (detail fetches)
    BetweenCards,
    /// Between listing pages of a paginated HTML source
    BetweenPages,
    /// After finishing an API source, before the next source
    AfterApiSource,
    /// After finishing an HTML source, before the next source
    AfterHtmlSource,
}

/// Scoped delay applied before the next outbound request.
///
/// Injectable so tests can substitute [`NoopPacer`] without altering
/// adapter logic.
#[async_trait]
pub trait Pacer: Send + Sync {
    /// Stall for the duration appropriate to this call site.
    async fn pause(&self, context: PaceContext);
}

/// Pacer with fixed per-context sleep durations.
pub struct FixedDelayPacer {
    card: Duration,
    page: Duration,
    api_source: Duration,
    html_source: Duration,
}

impl FixedDelayPacer {
    /// Default delays: 1s between cards, 2s between pages, 1s after an
    /// API source, 2s after an HTML source (HTML upstreams need more
    /// headroom).
    pub fn new() -> Self {
        Self {
            card: Duration::from_secs(1),
            page: Duration::from_secs(2),
            api_source: Duration::from_secs(1),
            html_source: Duration::from_secs(2),
        }
    }

    /// Scale every delay, mainly for shortening them in integration-style
    /// tests that still want ordering-relevant pauses.
    pub fn scaled(self, factor: f64) -> Self {
        let scale = |d: Duration| d.mul_f64(factor);
        Self {
            card: scale(self.card),
            page: scale(self.page),
            api_source: scale(self.api_source),
            html_source: scale(self.html_source),
        }
    }

    fn duration_for(&self, context: PaceContext) -> Duration {
        match context {
            PaceContext::BetweenCards => self.card,
            PaceContext::BetweenPages => self.page,
            PaceContext::AfterApiSource => self.api_source,
            PaceContext::AfterHtmlSource => self.html_source,
        }
    }
}

impl Default for FixedDelayPacer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Pacer for FixedDelayPacer {
    async fn pause(&self, context: PaceContext) {
        let duration = self.duration_for(context);
        if !duration.is_zero() {
            tokio::time::sleep(duration).await;
        }
    }
}

/// Pacer that never sleeps, for tests.
pub struct NoopPacer;

#[async_trait]
impl Pacer for NoopPacer {
    async fn pause(&self, _context: PaceContext) {}
}
