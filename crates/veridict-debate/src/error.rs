//! Error and warning types for the debate engine
//!
//! Hard errors are rare by design: the engine absorbs almost everything
//! into the result as warnings and returns a best-effort verdict for every
//! admissible claim.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use veridict_domain::traits::ModelFailure;

use crate::types::DebateStage;

/// Errors the debate engine can surface to its caller
#[derive(Error, Debug)]
pub enum DebateError {
    /// Configuration rejected at engine construction
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Outcome of a single model call attempt, before degradation
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum StepError {
    /// The shared run budget is exhausted
    Budget,
    /// The call failed in one of the closed-set ways
    Model(ModelFailure),
}

/// Structured warnings accumulated while producing a verdict
///
/// These are diagnostics, not errors: each corresponds to a taxonomy entry
/// that is absorbed into the result rather than failing the claim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DebateWarning {
    /// The challenge cited no evidence and was discarded before reconcile
    BaselessChallenge,

    /// Citations to unknown evidence identifiers were stripped
    GroundingMismatch {
        /// The unresolvable citations, as the model wrote them
        stripped: Vec<String>,
    },

    /// The verdict's sign disagreed with the evidence majority and was
    /// auto-corrected
    DirectionMismatch {
        /// Truth percentage before correction
        original_truth: f64,
        /// Truth percentage after correction
        corrected_truth: f64,
    },

    /// The run budget ran out; an optional stage was skipped
    BudgetExhausted {
        /// The stage that was skipped
        stage: DebateStage,
    },

    /// A stage exhausted its retries and fell back to neutral defaults
    DegradedStage {
        /// The stage that degraded
        stage: DebateStage,
        /// The final failure
        failure: ModelFailure,
    },

    /// The semantic direction check could not run; claimed directions stand
    DirectionCheckSkipped {
        /// Why the check was skipped
        reason: String,
    },
}
