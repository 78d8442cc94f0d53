//! Verdicts: bands, findings, and the per-claim result record
//!
//! A `ClaimVerdict` is produced once per claim by the debate engine and is
//! regenerated wholesale on re-run, never mutated in place.

use crate::evidence::DominantDirection;
use crate::id::{BoundaryId, ClaimId, EvidenceId};
use crate::tier::ConfidenceTier;
use serde::{Deserialize, Serialize};

/// Clamp a percentage-scaled value into [0.0, 100.0]
pub fn clamp_pct(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 100.0)
}

/// Verdict band on the fixed seven-point scale
///
/// The band is a pure function of the truth percentage via fixed thresholds.
/// `InsufficientConfidence` is the one exception: it is forced when the
/// self-consistency spread exceeds the configured limit, regardless of the
/// numeric mean.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerdictBand {
    /// 86-100
    True,
    /// 72-85
    MostlyTrue,
    /// 58-71
    LeansTrue,
    /// 43-57
    Mixed,
    /// 29-42
    LeansFalse,
    /// 15-28
    MostlyFalse,
    /// 0-14
    False,
    /// Forced when resampling disagreement is too wide to publish a band
    InsufficientConfidence,
}

impl VerdictBand {
    /// Map a truth percentage to its band (pure threshold function)
    pub fn from_truth(truth_percentage: f64) -> Self {
        let t = clamp_pct(truth_percentage);
        if t >= 86.0 {
            VerdictBand::True
        } else if t >= 72.0 {
            VerdictBand::MostlyTrue
        } else if t >= 58.0 {
            VerdictBand::LeansTrue
        } else if t >= 43.0 {
            VerdictBand::Mixed
        } else if t >= 29.0 {
            VerdictBand::LeansFalse
        } else if t >= 15.0 {
            VerdictBand::MostlyFalse
        } else {
            VerdictBand::False
        }
    }

    /// Get the band name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            VerdictBand::True => "true",
            VerdictBand::MostlyTrue => "mostly_true",
            VerdictBand::LeansTrue => "leans_true",
            VerdictBand::Mixed => "mixed",
            VerdictBand::LeansFalse => "leans_false",
            VerdictBand::MostlyFalse => "mostly_false",
            VerdictBand::False => "false",
            VerdictBand::InsufficientConfidence => "insufficient_confidence",
        }
    }
}

/// Direction a numeric verdict implies
///
/// Used by the direction check: the verdict's sign must agree with the
/// evidence-implied majority direction.
pub fn implied_direction(truth_percentage: f64) -> DominantDirection {
    let t = clamp_pct(truth_percentage);
    if t > 57.0 {
        DominantDirection::Supports
    } else if t < 43.0 {
        DominantDirection::Contradicts
    } else {
        DominantDirection::Mixed
    }
}

/// Quantitative per-boundary finding from the advocate
///
/// Deliberately carries no narrative field: output size stays bounded no
/// matter how many boundaries a claim has.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundaryFinding {
    /// Boundary this finding covers
    pub boundary_id: BoundaryId,

    /// Truth percentage judged within this boundary alone
    pub truth_percentage: f64,

    /// Confidence within this boundary alone
    pub confidence: f64,

    /// Dominant direction of the boundary's evidence
    pub dominant_direction: DominantDirection,

    /// Evidence items considered
    pub evidence_count: usize,
}

/// Outcome of the self-consistency resampling step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsistencySpread {
    /// max - min across all truth-percentage samples
    pub spread: f64,

    /// Whether resampling actually ran; `false` in reproducibility mode,
    /// never conflated with a measured stable result
    pub assessed: bool,

    /// The truth-percentage samples (primary advocate run included)
    pub samples: Vec<f64>,
}

impl ConsistencySpread {
    /// The record for a skipped assessment (reproducibility mode or budget
    /// exhaustion)
    pub fn skipped() -> Self {
        Self {
            spread: 0.0,
            assessed: false,
            samples: Vec::new(),
        }
    }

    /// Compute spread from truth-percentage samples
    pub fn from_samples(samples: Vec<f64>) -> Self {
        let spread = match (
            samples.iter().cloned().fold(f64::INFINITY, f64::min),
            samples.iter().cloned().fold(f64::NEG_INFINITY, f64::max),
        ) {
            (min, max) if min.is_finite() && max.is_finite() => max - min,
            _ => 0.0,
        };
        Self {
            spread,
            assessed: true,
            samples,
        }
    }
}

/// Metadata about adversarial contestation of a verdict
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContestationMeta {
    /// Whether a surviving (evidence-cited) challenge contested the verdict
    pub contested: bool,

    /// Challenge points the reconciler did not address
    pub unaddressed_objections: usize,

    /// Evidence ids the surviving challenge cited
    pub cited_evidence: Vec<EvidenceId>,

    /// Whether the challenge engaged the evidentiary support for the verdict
    pub addresses_support: bool,

    /// Whether the challenge argued from absence of expected evidence
    pub addresses_absence: bool,
}

impl ContestationMeta {
    /// Metadata for a claim whose verdict went unchallenged
    pub fn uncontested() -> Self {
        Self {
            contested: false,
            unaddressed_objections: 0,
            cited_evidence: Vec::new(),
            addresses_support: false,
            addresses_absence: false,
        }
    }
}

/// Cross-boundary agreement classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriangulationClass {
    /// Three or more boundaries agree with no dissent
    Strong,
    /// A majority agrees over dissent
    Moderate,
    /// A single boundary carries the claim
    Weak,
    /// Even split between directions
    Conflicted,
}

impl TriangulationClass {
    /// Get the class name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            TriangulationClass::Strong => "strong",
            TriangulationClass::Moderate => "moderate",
            TriangulationClass::Weak => "weak",
            TriangulationClass::Conflicted => "conflicted",
        }
    }
}

/// Triangulation result attached to a verdict
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TriangulationFactor {
    /// Agreement classification
    pub class: TriangulationClass,

    /// Aggregation weight factor applied for this class (from configuration)
    pub adjustment: f64,

    /// Set for `Conflicted`: contested, no numeric adjustment
    pub contested: bool,
}

/// Audit record kept when the Direction Validator substitutes a verdict
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectionAudit {
    /// Truth percentage before correction
    pub original_truth: f64,

    /// Truth percentage recomputed from validated counts
    pub corrected_truth: f64,

    /// Validated supporting count
    pub supports: usize,

    /// Validated contradicting count
    pub contradicts: usize,

    /// Validated neutral count
    pub neutral: usize,
}

/// The calibrated verdict for one claim
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimVerdict {
    /// Claim this verdict covers
    pub claim_id: ClaimId,

    /// Truth percentage in [0, 100]
    pub truth_percentage: f64,

    /// Confidence in [0, 100]
    pub confidence: f64,

    /// Verdict band
    pub band: VerdictBand,

    /// Per-boundary quantitative findings
    pub boundary_findings: Vec<BoundaryFinding>,

    /// Evidence ids supporting the verdict (disjoint from opposing)
    pub supporting_evidence: Vec<EvidenceId>,

    /// Evidence ids opposing the verdict
    pub opposing_evidence: Vec<EvidenceId>,

    /// Cross-boundary triangulation factor
    pub triangulation: TriangulationFactor,

    /// Contestation metadata from the challenge/reconcile exchange
    pub contestation: ContestationMeta,

    /// Self-consistency resampling outcome
    pub spread: ConsistencySpread,

    /// Publication confidence tier
    pub tier: ConfidenceTier,

    /// Present when the Direction Validator substituted the numeric verdict
    pub direction_audit: Option<DirectionAudit>,

    /// Whether optional debate steps were skipped (budget exhaustion)
    pub reduced_confidence: bool,
}

impl ClaimVerdict {
    /// Check the structural invariants every verdict must satisfy
    pub fn check_invariants(&self) -> Result<(), String> {
        if !(0.0..=100.0).contains(&self.truth_percentage) {
            return Err(format!(
                "truth_percentage {} outside [0, 100]",
                self.truth_percentage
            ));
        }
        if !(0.0..=100.0).contains(&self.confidence) {
            return Err(format!("confidence {} outside [0, 100]", self.confidence));
        }
        for id in &self.supporting_evidence {
            if self.opposing_evidence.contains(id) {
                return Err(format!(
                    "evidence {} appears as both supporting and opposing",
                    id
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_thresholds() {
        assert_eq!(VerdictBand::from_truth(100.0), VerdictBand::True);
        assert_eq!(VerdictBand::from_truth(86.0), VerdictBand::True);
        assert_eq!(VerdictBand::from_truth(85.0), VerdictBand::MostlyTrue);
        assert_eq!(VerdictBand::from_truth(72.0), VerdictBand::MostlyTrue);
        assert_eq!(VerdictBand::from_truth(71.0), VerdictBand::LeansTrue);
        assert_eq!(VerdictBand::from_truth(58.0), VerdictBand::LeansTrue);
        assert_eq!(VerdictBand::from_truth(57.0), VerdictBand::Mixed);
        assert_eq!(VerdictBand::from_truth(43.0), VerdictBand::Mixed);
        assert_eq!(VerdictBand::from_truth(42.0), VerdictBand::LeansFalse);
        assert_eq!(VerdictBand::from_truth(29.0), VerdictBand::LeansFalse);
        assert_eq!(VerdictBand::from_truth(28.0), VerdictBand::MostlyFalse);
        assert_eq!(VerdictBand::from_truth(15.0), VerdictBand::MostlyFalse);
        assert_eq!(VerdictBand::from_truth(14.0), VerdictBand::False);
        assert_eq!(VerdictBand::from_truth(0.0), VerdictBand::False);
    }

    #[test]
    fn test_band_clamps_out_of_range_input() {
        assert_eq!(VerdictBand::from_truth(250.0), VerdictBand::True);
        assert_eq!(VerdictBand::from_truth(-10.0), VerdictBand::False);
    }

    #[test]
    fn test_implied_direction() {
        assert_eq!(implied_direction(80.0), DominantDirection::Supports);
        assert_eq!(implied_direction(20.0), DominantDirection::Contradicts);
        assert_eq!(implied_direction(50.0), DominantDirection::Mixed);
    }

    #[test]
    fn test_spread_from_samples() {
        let s = ConsistencySpread::from_samples(vec![72.0, 48.0, 67.0]);
        assert!(s.assessed);
        assert_eq!(s.spread, 24.0);
    }

    #[test]
    fn test_spread_skipped_is_not_assessed() {
        let s = ConsistencySpread::skipped();
        assert_eq!(s.spread, 0.0);
        assert!(!s.assessed);
    }

    fn sound_verdict() -> ClaimVerdict {
        ClaimVerdict {
            claim_id: ClaimId::new(),
            truth_percentage: 80.0,
            confidence: 70.0,
            band: VerdictBand::MostlyTrue,
            boundary_findings: Vec::new(),
            supporting_evidence: vec![EvidenceId::new()],
            opposing_evidence: vec![EvidenceId::new()],
            triangulation: TriangulationFactor {
                class: TriangulationClass::Moderate,
                adjustment: 1.05,
                contested: false,
            },
            contestation: ContestationMeta::uncontested(),
            spread: ConsistencySpread::skipped(),
            tier: ConfidenceTier::Medium,
            direction_audit: None,
            reduced_confidence: false,
        }
    }

    #[test]
    fn test_check_invariants_accepts_sound_verdict() {
        assert_eq!(sound_verdict().check_invariants(), Ok(()));
    }

    #[test]
    fn test_check_invariants_rejects_out_of_range_truth() {
        let mut verdict = sound_verdict();
        verdict.truth_percentage = 120.0;
        assert!(verdict.check_invariants().is_err());
    }

    #[test]
    fn test_check_invariants_rejects_overlapping_evidence() {
        let mut verdict = sound_verdict();
        verdict.opposing_evidence = verdict.supporting_evidence.clone();
        assert!(verdict.check_invariants().is_err());
    }

    #[test]
    fn test_clamp_pct() {
        assert_eq!(clamp_pct(-3.0), 0.0);
        assert_eq!(clamp_pct(104.0), 100.0);
        assert_eq!(clamp_pct(55.5), 55.5);
        assert_eq!(clamp_pct(f64::NAN), 0.0);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: every finite truth value maps to exactly one of the
        /// seven numeric bands, never the forced insufficient state
        #[test]
        fn test_band_total_over_numeric_range(t in -50.0f64..150.0) {
            let band = VerdictBand::from_truth(t);
            prop_assert_ne!(band, VerdictBand::InsufficientConfidence);
        }

        /// Property: band mapping is monotone in truth percentage
        #[test]
        fn test_band_monotone(a in 0.0f64..=100.0, b in 0.0f64..=100.0) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            let order = |band: VerdictBand| match band {
                VerdictBand::False => 0,
                VerdictBand::MostlyFalse => 1,
                VerdictBand::LeansFalse => 2,
                VerdictBand::Mixed => 3,
                VerdictBand::LeansTrue => 4,
                VerdictBand::MostlyTrue => 5,
                VerdictBand::True => 6,
                VerdictBand::InsufficientConfidence => unreachable!(),
            };
            prop_assert!(order(VerdictBand::from_truth(lo)) <= order(VerdictBand::from_truth(hi)));
        }

        /// Property: clamp always lands in [0, 100]
        #[test]
        fn test_clamp_range(v in proptest::num::f64::ANY) {
            let c = clamp_pct(v);
            prop_assert!((0.0..=100.0).contains(&c));
        }
    }
}
