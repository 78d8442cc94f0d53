//! The versioned verification report
//!
//! The report is the run's single output artifact. It carries every
//! verdict (audit included), the overall assessment, per-claim warnings,
//! and which claim ids made the rendered cut. The schema version bumps on
//! any breaking shape change.

use serde::{Deserialize, Serialize};
use veridict_debate::DebateWarning;
use veridict_domain::{ClaimId, ClaimVerdict, OverallAssessment};

/// Current report schema version
pub const REPORT_SCHEMA_VERSION: u32 = 1;

/// A warning attributed to the claim it arose from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimWarning {
    /// Claim the warning belongs to
    pub claim_id: ClaimId,

    /// The warning itself
    pub warning: DebateWarning,
}

/// A claim the pipeline did not produce a verdict for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedClaim {
    /// Claim that was skipped
    pub claim_id: ClaimId,

    /// Why it was skipped (inadmissible or cancelled)
    pub reason: String,
}

/// The complete output of one verification run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationReport {
    /// Schema version of this report shape
    pub schema_version: u32,

    /// Every verdict produced, in input claim order
    pub verdicts: Vec<ClaimVerdict>,

    /// Weighted roll-up across all verdicts
    pub assessment: OverallAssessment,

    /// Claim ids that clear the rendering bar (central claims always do)
    pub report_claim_ids: Vec<ClaimId>,

    /// Warnings accumulated per claim, in input claim order
    pub warnings: Vec<ClaimWarning>,

    /// Claims no verdict was produced for
    pub skipped: Vec<SkippedClaim>,
}

impl VerificationReport {
    /// Look up the verdict for a claim
    pub fn verdict_for(&self, claim_id: ClaimId) -> Option<&ClaimVerdict> {
        self.verdicts.iter().find(|v| v.claim_id == claim_id)
    }

    /// Verdicts that clear the rendering bar, in input claim order
    pub fn reported_verdicts(&self) -> impl Iterator<Item = &ClaimVerdict> {
        self.verdicts
            .iter()
            .filter(|v| self.report_claim_ids.contains(&v.claim_id))
    }

    /// Warnings attributed to one claim
    pub fn warnings_for(&self, claim_id: ClaimId) -> impl Iterator<Item = &DebateWarning> {
        self.warnings
            .iter()
            .filter(move |w| w.claim_id == claim_id)
            .map(|w| &w.warning)
    }
}
