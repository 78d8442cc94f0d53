//! Direction validation arithmetic
//!
//! Pure helpers behind the validation state: tally validated per-evidence
//! directions, find the evidence majority, and recompute a truth percentage
//! from reliability-weighted counts when the numeric verdict's sign
//! disagrees with the evidence.

use std::collections::HashMap;

use veridict_domain::{ClaimBoundary, Direction, DominantDirection, EvidenceId};

/// Tally of validated evidence directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DirectionCounts {
    /// Evidence validated as supporting
    pub supports: usize,
    /// Evidence validated as contradicting
    pub contradicts: usize,
    /// Evidence validated as neutral
    pub neutral: usize,
}

impl DirectionCounts {
    /// Tally validated (evidence, direction) pairs
    pub fn tally(pairs: &[(EvidenceId, Direction)]) -> Self {
        let mut counts = Self::default();
        for (_, direction) in pairs {
            match direction {
                Direction::Supports => counts.supports += 1,
                Direction::Contradicts => counts.contradicts += 1,
                Direction::Neutral => counts.neutral += 1,
            }
        }
        counts
    }

    /// Majority direction of the tally; neutral evidence never breaks ties
    pub fn majority(&self) -> DominantDirection {
        if self.supports > self.contradicts {
            DominantDirection::Supports
        } else if self.contradicts > self.supports {
            DominantDirection::Contradicts
        } else {
            DominantDirection::Mixed
        }
    }
}

/// Whether a verdict's implied direction contradicts the evidence majority
///
/// Only an outright sign flip counts; `Mixed` on either side is compatible
/// with anything.
pub fn directions_conflict(implied: DominantDirection, majority: DominantDirection) -> bool {
    matches!(
        (implied, majority),
        (DominantDirection::Supports, DominantDirection::Contradicts)
            | (DominantDirection::Contradicts, DominantDirection::Supports)
    )
}

/// Recompute a truth percentage from validated directions
///
/// Reliability-weighted share of supporting weight over directed weight,
/// scaled to [0, 100]. Neutral evidence contributes nothing; no directed
/// evidence at all yields the neutral midpoint.
pub fn recompute_truth(
    boundaries: &[ClaimBoundary],
    pairs: &[(EvidenceId, Direction)],
) -> f64 {
    let mut reliability: HashMap<EvidenceId, f64> = HashMap::new();
    for boundary in boundaries {
        for item in &boundary.evidence {
            reliability.insert(item.id, item.reliability.score_or_default());
        }
    }

    let mut support_weight = 0.0;
    let mut contradict_weight = 0.0;
    for (id, direction) in pairs {
        let weight = match reliability.get(id) {
            Some(w) => *w,
            None => continue,
        };
        match direction {
            Direction::Supports => support_weight += weight,
            Direction::Contradicts => contradict_weight += weight,
            Direction::Neutral => {}
        }
    }

    let directed = support_weight + contradict_weight;
    if directed <= 0.0 {
        return 50.0;
    }
    support_weight / directed * 100.0
}

/// Split validated pairs into supporting and opposing evidence lists
pub fn partition(pairs: &[(EvidenceId, Direction)]) -> (Vec<EvidenceId>, Vec<EvidenceId>) {
    let mut supporting = Vec::new();
    let mut opposing = Vec::new();
    for (id, direction) in pairs {
        match direction {
            Direction::Supports => supporting.push(*id),
            Direction::Contradicts => opposing.push(*id),
            Direction::Neutral => {}
        }
    }
    (supporting, opposing)
}
