//! Source adapter implementations, one per upstream job board.

pub mod arbeitnow;
pub mod linkedin;
pub mod remotive;

pub use arbeitnow::ArbeitnowSource;
pub use linkedin::LinkedinSource;
pub use remotive::{RemotiveSearchSource, RemotiveSource};
