//! Typed inter-state contexts and the engine's output record
//!
//! Each protocol state hands the next one a typed struct, never raw model
//! text. Everything in here is already past the validation boundary.

use serde::{Deserialize, Serialize};
use veridict_domain::{
    BoundaryFinding, ClaimId, ConsistencySpread, ContestationMeta, DirectionAudit, EvidenceId,
    VerdictBand,
};

use crate::error::DebateWarning;

/// The five protocol states, named for logging and warning attribution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DebateStage {
    /// Initial evidence-grounded verdict
    Advocate,
    /// Stability check via resampling
    SelfConsistency,
    /// Adversarial counter-argument
    Challenge,
    /// Weighing the challenge against the advocate position
    Reconcile,
    /// Grounding and direction validation
    Validate,
}

impl DebateStage {
    /// Get the stage name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            DebateStage::Advocate => "advocate",
            DebateStage::SelfConsistency => "self_consistency",
            DebateStage::Challenge => "challenge",
            DebateStage::Reconcile => "reconcile",
            DebateStage::Validate => "validate",
        }
    }
}

/// Validated output of the advocate state
#[derive(Debug, Clone, PartialEq)]
pub struct AdvocateVerdict {
    /// Truth percentage in [0, 100]
    pub truth_percentage: f64,

    /// Confidence in [0, 100]
    pub confidence: f64,

    /// The advocate's stated reasoning
    pub reasoning: String,

    /// Per-boundary quantitative findings
    pub boundary_findings: Vec<BoundaryFinding>,

    /// Evidence cited as supporting
    pub supporting_evidence: Vec<EvidenceId>,

    /// Evidence cited as opposing
    pub opposing_evidence: Vec<EvidenceId>,
}

/// One objection raised by the challenger
#[derive(Debug, Clone, PartialEq)]
pub struct ChallengePoint {
    /// The objection text
    pub objection: String,

    /// Evidence the objection rests on; empty means ungrounded
    pub cited_evidence: Vec<EvidenceId>,
}

/// Validated output of the challenge state
#[derive(Debug, Clone, PartialEq)]
pub struct Challenge {
    /// The challenger's objections
    pub points: Vec<ChallengePoint>,

    /// Whether the challenge engages the supporting evidence
    pub addresses_support: bool,

    /// Whether the challenge argues from absence of evidence
    pub addresses_absence: bool,
}

impl Challenge {
    /// A challenge citing no evidence anywhere carries no standing and is
    /// discarded before reconciliation
    pub fn is_baseless(&self) -> bool {
        self.points.iter().all(|p| p.cited_evidence.is_empty())
    }

    /// All evidence ids cited across the challenge, in citation order,
    /// deduplicated
    pub fn cited_evidence(&self) -> Vec<EvidenceId> {
        let mut seen = Vec::new();
        for point in &self.points {
            for id in &point.cited_evidence {
                if !seen.contains(id) {
                    seen.push(*id);
                }
            }
        }
        seen
    }
}

/// Validated output of the reconcile state
#[derive(Debug, Clone, PartialEq)]
pub struct ReconciledVerdict {
    /// Truth percentage after weighing the challenge
    pub truth_percentage: f64,

    /// Confidence after weighing the challenge (pre spread adjustment)
    pub confidence: f64,

    /// The reconciler's stated reasoning
    pub reasoning: String,

    /// Responses given to individual challenge points
    pub responses: Vec<String>,

    /// Challenge points left unanswered
    pub unaddressed_objections: usize,
}

/// The debate engine's result for one claim, before triangulation and tier
/// classification are attached downstream
#[derive(Debug, Clone, PartialEq)]
pub struct DebateVerdict {
    /// Claim this verdict covers
    pub claim_id: ClaimId,

    /// Truth percentage in [0, 100]
    pub truth_percentage: f64,

    /// Confidence in [0, 100], spread- and objection-adjusted
    pub confidence: f64,

    /// Verdict band, possibly forced to insufficient-confidence
    pub band: VerdictBand,

    /// Per-boundary quantitative findings
    pub boundary_findings: Vec<BoundaryFinding>,

    /// Evidence ids supporting the verdict
    pub supporting_evidence: Vec<EvidenceId>,

    /// Evidence ids opposing the verdict
    pub opposing_evidence: Vec<EvidenceId>,

    /// Contestation metadata from the challenge exchange
    pub contestation: ContestationMeta,

    /// Self-consistency outcome
    pub spread: ConsistencySpread,

    /// Present when the direction check substituted the numeric verdict
    pub direction_audit: Option<DirectionAudit>,

    /// Final reasoning narrative
    pub reasoning: String,

    /// Whether optional steps were skipped under budget pressure
    pub reduced_confidence: bool,

    /// Everything that went wrong on the way, in occurrence order
    pub warnings: Vec<DebateWarning>,
}

/// What the engine hands back for one claim
///
/// A claim is never aborted by model misbehavior; `NotEvaluated` exists only
/// for cooperative cancellation between states.
#[derive(Debug, Clone, PartialEq)]
pub enum DebateOutcome {
    /// The protocol ran to completion (possibly degraded)
    Verdict(Box<DebateVerdict>),

    /// Cancellation was observed before the protocol finished
    NotEvaluated {
        /// Claim that was not evaluated
        claim_id: ClaimId,
        /// Why the claim was skipped
        reason: String,
    },
}

impl DebateOutcome {
    /// The verdict, if the protocol completed
    pub fn verdict(&self) -> Option<&DebateVerdict> {
        match self {
            DebateOutcome::Verdict(v) => Some(v),
            DebateOutcome::NotEvaluated { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use veridict_domain::EvidenceId;

    #[test]
    fn test_challenge_baseless_when_no_point_cites() {
        let challenge = Challenge {
            points: vec![
                ChallengePoint {
                    objection: "weak sourcing".to_string(),
                    cited_evidence: vec![],
                },
                ChallengePoint {
                    objection: "overlooks counterexamples".to_string(),
                    cited_evidence: vec![],
                },
            ],
            addresses_support: true,
            addresses_absence: false,
        };
        assert!(challenge.is_baseless());
    }

    #[test]
    fn test_challenge_with_one_citation_has_standing() {
        let id = EvidenceId::new();
        let challenge = Challenge {
            points: vec![
                ChallengePoint {
                    objection: "ungrounded".to_string(),
                    cited_evidence: vec![],
                },
                ChallengePoint {
                    objection: "grounded".to_string(),
                    cited_evidence: vec![id],
                },
            ],
            addresses_support: false,
            addresses_absence: true,
        };
        assert!(!challenge.is_baseless());
        assert_eq!(challenge.cited_evidence(), vec![id]);
    }

    #[test]
    fn test_cited_evidence_dedupes_across_points() {
        let a = EvidenceId::new();
        let b = EvidenceId::new();
        let challenge = Challenge {
            points: vec![
                ChallengePoint {
                    objection: "one".to_string(),
                    cited_evidence: vec![a, b],
                },
                ChallengePoint {
                    objection: "two".to_string(),
                    cited_evidence: vec![b, a],
                },
            ],
            addresses_support: true,
            addresses_absence: false,
        };
        assert_eq!(challenge.cited_evidence(), vec![a, b]);
    }
}
