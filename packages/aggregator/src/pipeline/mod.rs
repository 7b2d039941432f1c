//! Aggregation pipeline driving the source × category matrix.

pub mod aggregate;

pub use aggregate::Aggregator;
