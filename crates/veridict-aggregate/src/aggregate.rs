//! Aggregation engine - weighted roll-up of per-claim verdicts
//!
//! Pure function of (verdicts, config): no hidden state, no randomness, no
//! clock reads. Identical inputs yield bit-identical assessments.

use crate::config::AggregationConfig;
use veridict_domain::{AtomicClaim, CentralityTier, ClaimVerdict, HarmTier, OverallAssessment};

/// Combines per-claim verdicts into an overall assessment
pub struct Aggregator {
    config: AggregationConfig,
}

impl Aggregator {
    /// Create an aggregator with the given weight multipliers
    pub fn new(config: AggregationConfig) -> Self {
        Self { config }
    }

    /// Create an aggregator with default multipliers
    pub fn default_config() -> Self {
        Self::new(AggregationConfig::default())
    }

    /// Weight one claim's verdict contributes to the overall assessment
    ///
    /// weight = centrality x harm x (confidence/100) x contestation x
    /// triangulation adjustment, floored for central claims so they never
    /// drop out of the roll-up.
    pub fn claim_weight(&self, claim: &AtomicClaim, verdict: &ClaimVerdict) -> f64 {
        let centrality = match claim.centrality {
            CentralityTier::Central => self.config.central_weight,
            CentralityTier::Supporting => self.config.supporting_weight,
            CentralityTier::Peripheral => self.config.peripheral_weight,
        };
        let harm = match claim.harm {
            HarmTier::High => self.config.harm_high_weight,
            HarmTier::Moderate => self.config.harm_moderate_weight,
            HarmTier::Low => self.config.harm_low_weight,
        };
        let contested = verdict.contestation.contested || verdict.triangulation.contested;
        let contestation = if contested {
            self.config.contested_weight
        } else {
            1.0
        };

        let weight = centrality
            * harm
            * (verdict.confidence / 100.0)
            * contestation
            * verdict.triangulation.adjustment;

        if claim.centrality.is_central() {
            weight.max(self.config.central_floor_weight)
        } else {
            weight
        }
    }

    /// Roll up verdicts into the overall assessment
    ///
    /// Input order is part of the input: callers pass claims in their
    /// upstream order, and the summation follows it.
    pub fn assess(&self, items: &[(&AtomicClaim, &ClaimVerdict)]) -> OverallAssessment {
        if items.is_empty() {
            return OverallAssessment::empty();
        }

        let mut weighted_truth = 0.0;
        let mut total_weight = 0.0;
        let mut contested_claims = 0;

        for (claim, verdict) in items {
            let weight = self.claim_weight(claim, verdict);
            weighted_truth += weight * verdict.truth_percentage;
            total_weight += weight;
            if verdict.contestation.contested || verdict.triangulation.contested {
                contested_claims += 1;
            }
        }

        let overall_truth_percentage = if total_weight > 0.0 {
            weighted_truth / total_weight
        } else {
            0.0
        };

        OverallAssessment {
            overall_truth_percentage,
            total_weight,
            claim_count: items.len(),
            contested_claims,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use veridict_domain::{
        ClaimCategory, ClaimId, ConfidenceTier, ConsistencySpread, ContestationMeta, Direction,
        TriangulationClass, TriangulationFactor, VerdictBand,
    };

    fn claim(centrality: CentralityTier, harm: HarmTier) -> AtomicClaim {
        AtomicClaim {
            id: ClaimId::new(),
            statement: "claim".to_string(),
            category: ClaimCategory::Factual,
            centrality,
            harm,
            thesis_direction: Direction::Supports,
            admissible: true,
        }
    }

    fn verdict(claim_id: ClaimId, truth: f64, confidence: f64) -> ClaimVerdict {
        ClaimVerdict {
            claim_id,
            truth_percentage: truth,
            confidence,
            band: VerdictBand::from_truth(truth),
            boundary_findings: Vec::new(),
            supporting_evidence: Vec::new(),
            opposing_evidence: Vec::new(),
            triangulation: TriangulationFactor {
                class: TriangulationClass::Moderate,
                adjustment: 1.0,
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
    fn test_empty_set() {
        let aggregator = Aggregator::default_config();
        assert_eq!(aggregator.assess(&[]), OverallAssessment::empty());
    }

    #[test]
    fn test_weight_average() {
        let aggregator = Aggregator::default_config();
        let c1 = claim(CentralityTier::Central, HarmTier::Low);
        let c2 = claim(CentralityTier::Central, HarmTier::Low);
        let v1 = verdict(c1.id, 100.0, 80.0);
        let v2 = verdict(c2.id, 0.0, 80.0);

        // Equal weights: the average sits in the middle
        let assessment = aggregator.assess(&[(&c1, &v1), (&c2, &v2)]);
        assert!((assessment.overall_truth_percentage - 50.0).abs() < 1e-9);
        assert_eq!(assessment.claim_count, 2);
    }

    #[test]
    fn test_centrality_outweighs_peripheral() {
        let aggregator = Aggregator::default_config();
        let central = claim(CentralityTier::Central, HarmTier::Low);
        let peripheral = claim(CentralityTier::Peripheral, HarmTier::Low);
        let v_central = verdict(central.id, 90.0, 80.0);
        let v_peripheral = verdict(peripheral.id, 10.0, 80.0);

        let assessment =
            aggregator.assess(&[(&central, &v_central), (&peripheral, &v_peripheral)]);
        assert!(assessment.overall_truth_percentage > 60.0);
    }

    #[test]
    fn test_central_floor_weight() {
        let aggregator = Aggregator::default_config();
        let central = claim(CentralityTier::Central, HarmTier::Low);
        // Zero confidence would zero out the product without the floor
        let v = verdict(central.id, 70.0, 0.0);
        let weight = aggregator.claim_weight(&central, &v);
        assert_eq!(weight, AggregationConfig::default().central_floor_weight);

        // Non-central claims have no floor
        let peripheral = claim(CentralityTier::Peripheral, HarmTier::Low);
        let v = verdict(peripheral.id, 70.0, 0.0);
        assert_eq!(aggregator.claim_weight(&peripheral, &v), 0.0);
    }

    #[test]
    fn test_contested_reduces_weight() {
        let aggregator = Aggregator::default_config();
        let c = claim(CentralityTier::Supporting, HarmTier::Low);
        let clean = verdict(c.id, 70.0, 80.0);
        let mut contested = clean.clone();
        contested.contestation.contested = true;

        assert!(aggregator.claim_weight(&c, &contested) < aggregator.claim_weight(&c, &clean));
    }

    #[test]
    fn test_harm_weight_applies() {
        let aggregator = Aggregator::default_config();
        let low = claim(CentralityTier::Supporting, HarmTier::Low);
        let high = claim(CentralityTier::Supporting, HarmTier::High);
        let v = verdict(low.id, 70.0, 80.0);

        assert!(aggregator.claim_weight(&high, &v) > aggregator.claim_weight(&low, &v));
    }

    #[test]
    fn test_triangulation_adjustment_applies() {
        let aggregator = Aggregator::default_config();
        let c = claim(CentralityTier::Supporting, HarmTier::Low);
        let base = verdict(c.id, 70.0, 80.0);
        let mut boosted = base.clone();
        boosted.triangulation.adjustment = 1.15;

        assert!(aggregator.claim_weight(&c, &boosted) > aggregator.claim_weight(&c, &base));
    }

    #[test]
    fn test_idempotent_bit_identical() {
        let aggregator = Aggregator::default_config();
        let c1 = claim(CentralityTier::Central, HarmTier::High);
        let c2 = claim(CentralityTier::Supporting, HarmTier::Moderate);
        let c3 = claim(CentralityTier::Peripheral, HarmTier::Low);
        let v1 = verdict(c1.id, 87.3, 91.2);
        let v2 = verdict(c2.id, 33.3, 64.8);
        let v3 = verdict(c3.id, 55.1, 12.9);

        let items = [(&c1, &v1), (&c2, &v2), (&c3, &v3)];
        let a = aggregator.assess(&items);
        let b = aggregator.assess(&items);
        assert_eq!(
            a.overall_truth_percentage.to_bits(),
            b.overall_truth_percentage.to_bits()
        );
        assert_eq!(a.total_weight.to_bits(), b.total_weight.to_bits());
        assert_eq!(a, b);
    }

    #[test]
    fn test_every_multiplier_field_is_consulted() {
        // Configuration-without-effect audit: changing any field must change
        // some observable weight
        let c_central = claim(CentralityTier::Central, HarmTier::Low);
        let c_supporting = claim(CentralityTier::Supporting, HarmTier::Moderate);
        let c_peripheral = claim(CentralityTier::Peripheral, HarmTier::High);
        let v_plain = verdict(c_supporting.id, 70.0, 80.0);
        let mut v_contested = v_plain.clone();
        v_contested.contestation.contested = true;
        let v_zero_conf = verdict(c_central.id, 70.0, 0.0);

        let base = AggregationConfig::default();
        let cases: Vec<(AggregationConfig, &AtomicClaim, &ClaimVerdict)> = vec![
            (AggregationConfig { central_weight: base.central_weight * 2.0, ..base }, &c_central, &v_plain),
            (AggregationConfig { supporting_weight: base.supporting_weight * 2.0, ..base }, &c_supporting, &v_plain),
            (AggregationConfig { peripheral_weight: base.peripheral_weight * 2.0, ..base }, &c_peripheral, &v_plain),
            (AggregationConfig { harm_high_weight: base.harm_high_weight * 2.0, ..base }, &c_peripheral, &v_plain),
            (AggregationConfig { harm_moderate_weight: base.harm_moderate_weight * 2.0, ..base }, &c_supporting, &v_plain),
            (AggregationConfig { harm_low_weight: base.harm_low_weight * 2.0, ..base }, &c_central, &v_plain),
            (AggregationConfig { contested_weight: base.contested_weight / 2.0, ..base }, &c_supporting, &v_contested),
            (AggregationConfig { central_floor_weight: base.central_floor_weight * 2.0, ..base }, &c_central, &v_zero_conf),
        ];

        let baseline = Aggregator::new(base);
        for (changed, claim, verdict) in cases {
            let changed = Aggregator::new(changed);
            assert_ne!(
                baseline.claim_weight(claim, verdict),
                changed.claim_weight(claim, verdict),
                "a configuration field had no observable effect"
            );
        }
    }
}
