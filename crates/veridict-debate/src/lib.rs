//! Veridict debate engine
//!
//! The five-state protocol that turns (claim, evidence grouped by boundary)
//! into a validated, confidence-calibrated verdict:
//!
//! ```text
//! ADVOCATE -> (SELF_CONSISTENCY || CHALLENGE) -> RECONCILE -> VALIDATE -> DONE
//! ```
//!
//! Each state is a typed-context-in, typed-result-or-failure-out function.
//! The generative model is an unreliable dependency: every raw response is
//! validated at the boundary, non-conforming responses are retried with
//! backoff and a temperature bump, and exhaustion degrades to conservative
//! neutral defaults. A claim is never aborted; everything that went wrong
//! on the way rides along as structured warnings.

#![warn(missing_docs)]

pub mod budget;
pub mod config;
pub mod direction;
pub mod engine;
pub mod error;
pub mod parser;
pub mod prompt;
pub mod types;

pub use budget::{CancelFlag, RunBudget};
pub use config::{DebateConfig, SpreadPolicy};
pub use engine::DebateEngine;
pub use error::{DebateError, DebateWarning};
pub use types::{
    AdvocateVerdict, Challenge, ChallengePoint, DebateOutcome, DebateStage, DebateVerdict,
    ReconciledVerdict,
};
