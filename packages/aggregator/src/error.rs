//! Typed errors for the aggregation library.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to provide
//! strongly-typed, composable error handling.

use thiserror::Error;

/// Errors that can occur while fetching from an upstream source.
///
/// These never propagate past an adapter boundary as-is: adapters catch
/// them at the smallest enclosing scope (single request, single card,
/// single record) and degrade to skipping that unit. The only exception
/// is a fully-failed adapter call, which surfaces one of these as the
/// call's error and is contained by the aggregator.
#[derive(Debug, Error)]
pub enum SourceError {
    /// HTTP request failed at the transport level
    #[error("HTTP error: {0}")]
    Http(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Upstream answered with a non-success status
    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    /// Request exceeded the fixed timeout
    #[error("timeout fetching: {url}")]
    Timeout { url: String },

    /// Malformed JSON body
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Expected structure absent from an HTML body
    #[error("HTML structure missing: {reason}")]
    Html { reason: String },

    /// A required field was absent from an individual record or card
    #[error("missing required field: {field}")]
    MissingField { field: String },

    /// Endpoint URL could not be constructed
    #[error("invalid URL: {url}")]
    InvalidUrl { url: String },
}

/// Errors that can occur while persisting a run's output.
///
/// Persistence failures are fatal to a run: there is no meaningful way
/// to continue when the output destination itself is broken.
#[derive(Debug, Error)]
pub enum PersistError {
    /// Artifact or index write failed
    #[error("write failed: {0}")]
    Io(#[from] std::io::Error),

    /// Index document could not be serialized
    #[error("index serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Result type alias for source fetch operations.
pub type SourceResult<T> = std::result::Result<T, SourceError>;

/// Result type alias for persistence operations.
pub type PersistResult<T> = std::result::Result<T, PersistError>;
