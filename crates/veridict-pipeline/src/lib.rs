//! Veridict verification pipeline
//!
//! Ties the whole system together: claims pass the Admissibility Gate, run
//! the debate protocol under bounded concurrency and a shared model-call
//! budget, get triangulated and tier-classified, and roll up into one
//! versioned report. Results preserve input order regardless of task
//! completion order.

#![warn(missing_docs)]

pub mod config;
pub mod pipeline;
pub mod report;

pub use config::PipelineConfig;
pub use pipeline::{ClaimDossier, PipelineError, VerificationPipeline};
pub use report::{ClaimWarning, SkippedClaim, VerificationReport, REPORT_SCHEMA_VERSION};
