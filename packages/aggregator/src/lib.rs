//! Multi-Source Job Posting Aggregation Library
//!
//! Collects job postings from heterogeneous upstreams (JSON APIs and
//! HTML-rendered listing pages), normalizes them into one common record
//! shape, and persists per-record text artifacts plus a consolidated
//! metadata index.
//!
//! # Design
//!
//! - One adapter per source behind the [`JobSource`] trait; strategies
//!   range from a single API request to paginated HTML card extraction
//!   with best-effort detail-page enrichment.
//! - Partial-failure isolation: a failing record, card, page, or whole
//!   source never aborts the rest of the run.
//! - Fixed-delay pacing between requests, injectable for tests.
//! - Sequential execution only: one request in flight per adapter keeps
//!   the fixed-delay politeness contract honest.
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use aggregator::{
//!     Aggregator, ArbeitnowSource, FileSink, FixedDelayPacer, HttpFetcher,
//!     LinkedinSource, RemotiveSource, RunRequest,
//! };
//!
//! let fetcher = Arc::new(HttpFetcher::new()?);
//! let pacer = Arc::new(FixedDelayPacer::new());
//! let aggregator = Aggregator::new(
//!     vec![
//!         Arc::new(RemotiveSource::new(fetcher.clone())),
//!         Arc::new(ArbeitnowSource::new(fetcher.clone())),
//!         Arc::new(LinkedinSource::new(fetcher, pacer.clone())),
//!     ],
//!     pacer,
//! );
//!
//! let result = aggregator.run(&RunRequest::new(vec!["rust".into()])).await;
//! FileSink::new("data/raw/jobs")?.persist(&result)?;
//! ```
//!
//! # Modules
//!
//! - [`traits`] - Core trait abstractions (Fetcher, JobSource)
//! - [`types`] - Normalized record and run types
//! - [`sources`] - Adapter implementations per upstream
//! - [`pipeline`] - The aggregator driving the source × category matrix
//! - [`pacer`] - Fixed-delay rate limiting
//! - [`sink`] - Artifact and index persistence
//! - [`html`] - Lightweight HTML field extraction
//! - [`testing`] - Mock transport for tests

pub mod error;
pub mod html;
pub mod pacer;
pub mod pipeline;
pub mod sink;
pub mod sources;
pub mod testing;
pub mod traits;
pub mod types;

// Re-export core types at crate root
pub use error::{PersistError, PersistResult, SourceError, SourceResult};
pub use pacer::{FixedDelayPacer, NoopPacer, PaceContext, Pacer};
pub use pipeline::Aggregator;
pub use sink::FileSink;
pub use sources::{ArbeitnowSource, LinkedinSource, RemotiveSearchSource, RemotiveSource};
pub use traits::{FetchOutcome, Fetcher, HttpFetcher, JobSource};
pub use types::{JobRecord, RunRequest, RunResult, SourceId};
