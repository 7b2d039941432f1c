//! Run configuration and results for the source × category matrix.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::record::JobRecord;

/// Identifier of a job source adapter.
///
/// The canonical iteration order (see [`SourceId::CANONICAL`]) puts API
/// sources before HTML sources to front-load fast, reliable results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceId {
    /// Remotive category-filtered listing API
    Remotive,
    /// Remotive free-text search API (fallback for terms with no category)
    RemotiveSearch,
    /// Arbeitnow bulk job-board API, filtered client-side
    Arbeitnow,
    /// LinkedIn public guest job search (HTML, paginated)
    Linkedin,
}

impl SourceId {
    /// Canonical aggregation order: API sources before HTML sources.
    pub const CANONICAL: [SourceId; 4] = [
        SourceId::Remotive,
        SourceId::RemotiveSearch,
        SourceId::Arbeitnow,
        SourceId::Linkedin,
    ];

    /// Stable string form, used as the record `source` field.
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceId::Remotive => "remotive",
            SourceId::RemotiveSearch => "remotive_search",
            SourceId::Arbeitnow => "arbeitnow",
            SourceId::Linkedin => "linkedin",
        }
    }

    /// Whether this source scrapes rendered HTML rather than a JSON API.
    pub fn is_html(&self) -> bool {
        matches!(self, SourceId::Linkedin)
    }
}

impl std::fmt::Display for SourceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Description of one aggregation run.
#[derive(Debug, Clone)]
pub struct RunRequest {
    /// Enabled sources; adapters not listed here are skipped
    pub sources: Vec<SourceId>,

    /// Categories or free-text search terms, in iteration order
    pub categories: Vec<String>,

    /// Maximum records per source per category
    pub limit_per_source: usize,
}

impl RunRequest {
    /// Create a request for the given categories with the default
    /// source set and a limit of 10 per source per category.
    pub fn new(categories: Vec<String>) -> Self {
        Self {
            sources: vec![SourceId::Remotive, SourceId::Linkedin, SourceId::Arbeitnow],
            categories,
            limit_per_source: 10,
        }
    }

    /// Set the enabled sources.
    pub fn with_sources(mut self, sources: Vec<SourceId>) -> Self {
        self.sources = sources;
        self
    }

    /// Set the per-source-per-category limit.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit_per_source = limit;
        self
    }
}

/// Outcome of one aggregation run.
///
/// Records appear in insertion order: source-then-category iteration
/// order, never sorted.
#[derive(Debug, Clone)]
pub struct RunResult {
    /// All records collected across the matrix
    pub records: Vec<JobRecord>,

    /// Source-level failure events (fully-failed adapter calls)
    pub failed_sources: usize,

    /// When the matrix finished
    pub completed_at: DateTime<Utc>,
}

impl RunResult {
    /// Number of records collected.
    pub fn total(&self) -> usize {
        self.records.len()
    }

    /// Whether every adapter call completed without a top-level failure.
    pub fn is_success(&self) -> bool {
        self.failed_sources == 0
    }
}
