//! Core trait abstractions: the transport seam and the source capability.

pub mod fetcher;
pub mod source;

pub use fetcher::{Fetcher, HttpFetcher, BROWSER_USER_AGENT};
pub use source::{FetchOutcome, JobSource};
