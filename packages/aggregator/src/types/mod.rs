//! Domain data types.

pub mod record;
pub mod run;

pub use record::{JobRecord, DEFAULT_LOCATION, NOT_AVAILABLE};
pub use run::{RunRequest, RunResult, SourceId};
