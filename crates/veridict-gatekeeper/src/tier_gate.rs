//! Confidence-tier classification for finished verdicts

use crate::config::TierConfig;
use std::collections::HashSet;
use tracing::debug;
use veridict_domain::{AtomicClaim, ClaimBoundary, ConfidenceTier, Direction};

/// Evidence summary the tier thresholds are checked against
#[derive(Debug, Clone, PartialEq)]
pub struct EvidenceProfile {
    /// Distinct source domains across all boundaries
    pub unique_sources: usize,

    /// Mean source-reliability score (Unknown counts as the neutral prior)
    pub mean_quality: f64,

    /// Fraction of non-neutral evidence agreeing with the majority
    /// direction; 0.0 when no evidence takes a direction
    pub directional_agreement: f64,
}

impl EvidenceProfile {
    /// Build a profile from a claim's evidence boundaries
    pub fn from_boundaries(boundaries: &[ClaimBoundary]) -> Self {
        let mut domains = HashSet::new();
        let mut quality_sum = 0.0;
        let mut evidence_count = 0usize;
        let mut supports = 0usize;
        let mut contradicts = 0usize;

        for boundary in boundaries {
            for item in &boundary.evidence {
                domains.insert(item.source.domain.clone());
                quality_sum += item.reliability.score_or_default();
                evidence_count += 1;
                match item.claimed_direction {
                    Direction::Supports => supports += 1,
                    Direction::Contradicts => contradicts += 1,
                    Direction::Neutral => {}
                }
            }
        }

        let mean_quality = if evidence_count > 0 {
            quality_sum / evidence_count as f64
        } else {
            0.0
        };

        let directed = supports + contradicts;
        let directional_agreement = if directed > 0 {
            supports.max(contradicts) as f64 / directed as f64
        } else {
            0.0
        };

        Self {
            unique_sources: domains.len(),
            mean_quality,
            directional_agreement,
        }
    }
}

/// Classifies each verdict's publication confidence
pub struct ConfidenceTierGate {
    config: TierConfig,
}

impl ConfidenceTierGate {
    /// Create a gate with the given thresholds
    pub fn new(config: TierConfig) -> Self {
        Self { config }
    }

    /// Create a gate with default thresholds
    pub fn default_config() -> Self {
        Self::new(TierConfig::default())
    }

    /// Classify a verdict from its evidence profile
    pub fn classify(&self, profile: &EvidenceProfile) -> ConfidenceTier {
        let c = &self.config;

        if profile.unique_sources < c.medium_min_sources {
            return ConfidenceTier::Insufficient;
        }

        if profile.unique_sources >= c.high_min_sources
            && profile.mean_quality >= c.high_min_quality
            && profile.directional_agreement >= c.high_min_agreement
        {
            return ConfidenceTier::High;
        }

        if profile.mean_quality >= c.medium_min_quality
            && profile.directional_agreement >= c.medium_min_agreement
        {
            return ConfidenceTier::Medium;
        }

        ConfidenceTier::Low
    }

    /// Whether a claim's verdict appears in the rendered report
    ///
    /// Central claims are always included regardless of tier. Non-central
    /// claims below the configured minimum are suppressed from the report
    /// but retained in the underlying result for audit.
    pub fn include_in_report(&self, claim: &AtomicClaim, tier: ConfidenceTier) -> bool {
        if claim.centrality.is_central() {
            return true;
        }
        let included = tier >= self.config.report_min_tier;
        if !included {
            debug!(
                claim_id = %claim.id,
                tier = tier.as_str(),
                "suppressing non-central claim from rendered report"
            );
        }
        included
    }
}
