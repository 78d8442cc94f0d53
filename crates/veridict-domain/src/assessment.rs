//! Overall assessment - the weighted roll-up of per-claim verdicts
//!
//! A derived value with no independent lifecycle: recomputed from the
//! current verdict set, valid only as of that computation. Deliberately
//! carries no timestamp or run identifier so identical inputs reproduce a
//! bit-identical record.

use serde::{Deserialize, Serialize};

/// Weighted roll-up of a `ClaimVerdict` set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverallAssessment {
    /// Weight-averaged truth percentage across all claims, [0, 100]
    pub overall_truth_percentage: f64,

    /// Sum of per-claim weights that went into the average
    pub total_weight: f64,

    /// Claims included in the roll-up
    pub claim_count: usize,

    /// Claims flagged contested by triangulation or challenge
    pub contested_claims: usize,
}

impl OverallAssessment {
    /// Assessment over an empty verdict set
    pub fn empty() -> Self {
        Self {
            overall_truth_percentage: 0.0,
            total_weight: 0.0,
            claim_count: 0,
            contested_claims: 0,
        }
    }
}
