//! JobSource trait: the per-source fetch-and-normalize capability.

use async_trait::async_trait;

use crate::error::{SourceError, SourceResult};
use crate::types::{JobRecord, SourceId};

/// What one adapter call produced.
///
/// Per-unit failures never abort a call: records that normalized cleanly
/// are kept, units with a describable failure land in `errors`, and HTML
/// cards missing a required field are counted in `skipped`. The record
/// count is always ≤ the requested limit.
#[derive(Debug, Default)]
pub struct FetchOutcome {
    /// Successfully normalized records, in upstream order
    pub records: Vec<JobRecord>,

    /// Per-unit failures that were contained within the call
    pub errors: Vec<SourceError>,

    /// Cards dropped for missing required fields (not counted as errors)
    pub skipped: usize,
}

impl FetchOutcome {
    /// Create an empty outcome.
    pub fn new() -> Self {
        Self::default()
    }
}

/// One job source: fetch postings for a category or search term.
///
/// Implementations differ in strategy (single API request, paginated HTML
/// with detail enrichment, client-side bulk filtering) but share the same
/// contract: `Err` only for a fully-failed call — a top-level or
/// first-request failure with nothing retrievable. Everything smaller
/// degrades inside the returned [`FetchOutcome`].
#[async_trait]
pub trait JobSource: Send + Sync {
    /// Identifier stamped onto every record this source produces.
    fn id(&self) -> SourceId;

    /// Fetch up to `limit` postings for the category or search term.
    ///
    /// A `limit` of zero returns an empty outcome without touching the
    /// network. Fewer than `limit` records may be returned when the
    /// upstream is exhausted.
    async fn fetch_jobs(&self, query: &str, limit: usize) -> SourceResult<FetchOutcome>;
}
