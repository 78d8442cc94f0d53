//! Triangulation scorer - cross-boundary evidentiary agreement
//!
//! Purely deterministic, no external calls; computed once per claim before
//! aggregation.

use crate::config::TriangulationConfig;
use std::collections::BTreeMap;
use tracing::debug;
use veridict_domain::{
    ClaimBoundary, Direction, DominantDirection, EvidenceItem, TriangulationClass,
    TriangulationFactor,
};

/// Scores cross-boundary agreement for one claim
pub struct TriangulationScorer {
    config: TriangulationConfig,
}

impl TriangulationScorer {
    /// Create a scorer with the given adjustment magnitudes
    pub fn new(config: TriangulationConfig) -> Self {
        Self { config }
    }

    /// Create a scorer with default adjustments
    pub fn default_config() -> Self {
        Self::new(TriangulationConfig::default())
    }

    /// Dominant direction of one boundary's evidence
    ///
    /// Votes are weighted by source reliability and deduplicated so that
    /// multiple extracts from one document count once (the highest-weighted
    /// extract speaks for its document). Neutral extracts carry no vote.
    pub fn boundary_direction(boundary: &ClaimBoundary) -> DominantDirection {
        // BTreeMap keeps summation order stable, so repeated runs are
        // bit-identical
        let mut per_document: BTreeMap<String, &EvidenceItem> = BTreeMap::new();
        for item in &boundary.evidence {
            let key = item.source.document_key();
            let replace = match per_document.get(&key) {
                Some(existing) => {
                    item.reliability.score_or_default() > existing.reliability.score_or_default()
                }
                None => true,
            };
            if replace {
                per_document.insert(key, item);
            }
        }

        let mut support_weight = 0.0;
        let mut contradict_weight = 0.0;
        for item in per_document.values() {
            let weight = item.reliability.score_or_default();
            match item.claimed_direction {
                Direction::Supports => support_weight += weight,
                Direction::Contradicts => contradict_weight += weight,
                Direction::Neutral => {}
            }
        }

        if support_weight > contradict_weight {
            DominantDirection::Supports
        } else if contradict_weight > support_weight {
            DominantDirection::Contradicts
        } else {
            DominantDirection::Mixed
        }
    }

    /// Score cross-boundary agreement for a claim's boundaries
    pub fn score(&self, boundaries: &[ClaimBoundary]) -> TriangulationFactor {
        let directions: Vec<DominantDirection> = boundaries
            .iter()
            .filter(|b| !b.evidence.is_empty())
            .map(Self::boundary_direction)
            .collect();

        let supports = directions
            .iter()
            .filter(|d| **d == DominantDirection::Supports)
            .count();
        let contradicts = directions
            .iter()
            .filter(|d| **d == DominantDirection::Contradicts)
            .count();

        let class = Self::classify(directions.len(), supports, contradicts);
        debug!(
            boundaries = directions.len(),
            supports,
            contradicts,
            class = class.as_str(),
            "triangulation scored"
        );

        let adjustment = match class {
            TriangulationClass::Strong => self.config.strong_adjustment,
            TriangulationClass::Moderate => self.config.moderate_adjustment,
            TriangulationClass::Weak => self.config.weak_adjustment,
            TriangulationClass::Conflicted => 1.0,
        };

        TriangulationFactor {
            class,
            adjustment,
            contested: class == TriangulationClass::Conflicted,
        }
    }

    fn classify(boundaries: usize, supports: usize, contradicts: usize) -> TriangulationClass {
        if boundaries <= 1 {
            return TriangulationClass::Weak;
        }
        if supports == contradicts {
            // Even split; also covers every-boundary-mixed
            return TriangulationClass::Conflicted;
        }
        let majority = supports.max(contradicts);
        let minority = supports.min(contradicts);
        if majority >= 3 && minority == 0 {
            TriangulationClass::Strong
        } else {
            TriangulationClass::Moderate
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use veridict_domain::{
        BoundaryId, EvidenceId, ProbativeValue, SourceRef, SourceReliability,
    };

    fn evidence(domain: &str, title: &str, direction: Direction, score: f64) -> EvidenceItem {
        EvidenceItem {
            id: EvidenceId::new(),
            statement: "statement".to_string(),
            source: SourceRef {
                domain: domain.to_string(),
                title: title.to_string(),
            },
            claimed_direction: direction,
            reliability: SourceReliability::Scored {
                score,
                confidence: 0.8,
                consensus_achieved: true,
            },
            probative_value: ProbativeValue::High,
        }
    }

    fn boundary(items: Vec<EvidenceItem>) -> ClaimBoundary {
        ClaimBoundary {
            id: BoundaryId::new(),
            name: "b".to_string(),
            methodology: "m".to_string(),
            evidence: items,
        }
    }

    fn directed_boundary(direction: Direction) -> ClaimBoundary {
        boundary(vec![evidence("src.org", "doc", direction, 0.8)])
    }

    #[test]
    fn test_strong_three_boundaries_agree() {
        let scorer = TriangulationScorer::default_config();
        let boundaries = vec![
            directed_boundary(Direction::Supports),
            directed_boundary(Direction::Supports),
            directed_boundary(Direction::Supports),
        ];
        let factor = scorer.score(&boundaries);
        assert_eq!(factor.class, TriangulationClass::Strong);
        assert_eq!(factor.adjustment, TriangulationConfig::default().strong_adjustment);
        assert!(!factor.contested);
    }

    #[test]
    fn test_moderate_majority_with_dissent() {
        let scorer = TriangulationScorer::default_config();
        let boundaries = vec![
            directed_boundary(Direction::Supports),
            directed_boundary(Direction::Supports),
            directed_boundary(Direction::Contradicts),
        ];
        let factor = scorer.score(&boundaries);
        assert_eq!(factor.class, TriangulationClass::Moderate);
        assert!(factor.adjustment > 1.0);
    }

    #[test]
    fn test_weak_single_boundary() {
        let scorer = TriangulationScorer::default_config();
        let factor = scorer.score(&[directed_boundary(Direction::Supports)]);
        assert_eq!(factor.class, TriangulationClass::Weak);
        assert!(factor.adjustment < 1.0);
    }

    #[test]
    fn test_conflicted_even_split() {
        let scorer = TriangulationScorer::default_config();
        let boundaries = vec![
            directed_boundary(Direction::Supports),
            directed_boundary(Direction::Contradicts),
        ];
        let factor = scorer.score(&boundaries);
        assert_eq!(factor.class, TriangulationClass::Conflicted);
        assert_eq!(factor.adjustment, 1.0);
        assert!(factor.contested);
    }

    #[test]
    fn test_empty_boundaries_do_not_count() {
        let scorer = TriangulationScorer::default_config();
        let boundaries = vec![
            directed_boundary(Direction::Supports),
            boundary(vec![]),
            boundary(vec![]),
        ];
        let factor = scorer.score(&boundaries);
        assert_eq!(factor.class, TriangulationClass::Weak);
    }

    #[test]
    fn test_dedup_one_document_counts_once() {
        // Three extracts from the same document supporting, one independent
        // document contradicting with higher weight than any single vote
        let b = boundary(vec![
            evidence("a.org", "doc1", Direction::Supports, 0.6),
            evidence("a.org", "doc1", Direction::Supports, 0.6),
            evidence("a.org", "doc1", Direction::Supports, 0.6),
            evidence("b.org", "doc2", Direction::Contradicts, 0.9),
        ]);
        assert_eq!(
            TriangulationScorer::boundary_direction(&b),
            DominantDirection::Contradicts
        );
    }

    #[test]
    fn test_reliability_weights_votes() {
        let b = boundary(vec![
            evidence("a.org", "doc1", Direction::Supports, 0.9),
            evidence("b.org", "doc2", Direction::Contradicts, 0.3),
        ]);
        assert_eq!(
            TriangulationScorer::boundary_direction(&b),
            DominantDirection::Supports
        );
    }

    #[test]
    fn test_all_neutral_boundary_is_mixed() {
        let b = boundary(vec![
            evidence("a.org", "doc1", Direction::Neutral, 0.9),
            evidence("b.org", "doc2", Direction::Neutral, 0.9),
        ]);
        assert_eq!(
            TriangulationScorer::boundary_direction(&b),
            DominantDirection::Mixed
        );
    }

    #[test]
    fn test_four_boundaries_strong_needs_no_dissent() {
        let scorer = TriangulationScorer::default_config();
        let boundaries = vec![
            directed_boundary(Direction::Supports),
            directed_boundary(Direction::Supports),
            directed_boundary(Direction::Supports),
            directed_boundary(Direction::Contradicts),
        ];
        let factor = scorer.score(&boundaries);
        assert_eq!(factor.class, TriangulationClass::Moderate);
    }
}
