//! Triangulation scoring and verdict aggregation
//!
//! Both halves of this crate are deterministic and model-free: the
//! triangulation scorer measures cross-boundary agreement for one claim,
//! and the aggregation engine rolls per-claim verdicts into an overall
//! assessment. Identical inputs always produce bit-identical outputs.

#![warn(missing_docs)]

pub mod aggregate;
pub mod config;
pub mod triangulation;

pub use aggregate::Aggregator;
pub use config::{AggregationConfig, TriangulationConfig};
pub use triangulation::TriangulationScorer;
