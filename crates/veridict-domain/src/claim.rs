//! Atomic claims - the unit of verification
//!
//! Claims are produced by upstream extraction and are read-only here:
//! the debate engine never rewrites a claim, it only attaches verdicts.

use crate::id::ClaimId;
use crate::evidence::Direction;
use serde::{Deserialize, Serialize};

/// Category of an atomic claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClaimCategory {
    /// Empirically checkable statement
    Factual,
    /// Judgment or opinion presented as assessable
    Evaluative,
    /// Statement about how something was or should be done
    Procedural,
}

impl ClaimCategory {
    /// Get the category name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            ClaimCategory::Factual => "factual",
            ClaimCategory::Evaluative => "evaluative",
            ClaimCategory::Procedural => "procedural",
        }
    }
}

/// How load-bearing a claim is for the input's overall thesis
///
/// Central claims get special treatment throughout the pipeline: they always
/// pass the Admissibility Gate, always appear in the rendered report, and
/// receive a non-zero floor weight during aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CentralityTier {
    /// The thesis stands or falls with this claim
    Central,
    /// Materially supports the thesis
    Supporting,
    /// Incidental detail
    Peripheral,
}

impl CentralityTier {
    /// Whether this is the central tier
    pub fn is_central(&self) -> bool {
        matches!(self, CentralityTier::Central)
    }

    /// Get the tier name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            CentralityTier::Central => "central",
            CentralityTier::Supporting => "supporting",
            CentralityTier::Peripheral => "peripheral",
        }
    }
}

/// Potential for real-world harm if the claim is believed and wrong
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HarmTier {
    /// Health, safety, financial, or civic harm potential
    High,
    /// Reputational or material harm potential
    Moderate,
    /// Little harm potential
    Low,
}

impl HarmTier {
    /// Get the tier name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            HarmTier::High => "high",
            HarmTier::Moderate => "moderate",
            HarmTier::Low => "low",
        }
    }
}

/// An atomic, independently verifiable claim
///
/// Immutable once extracted; the pipeline only reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtomicClaim {
    /// Unique identifier
    pub id: ClaimId,

    /// The claim statement text
    pub statement: String,

    /// Category (factual/evaluative/procedural)
    pub category: ClaimCategory,

    /// Centrality to the input's thesis
    pub centrality: CentralityTier,

    /// Harm potential tier
    pub harm: HarmTier,

    /// Direction the input's thesis needs this claim to lean
    pub thesis_direction: Direction,

    /// Admissibility flag set by upstream extraction
    pub admissible: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centrality_is_central() {
        assert!(CentralityTier::Central.is_central());
        assert!(!CentralityTier::Supporting.is_central());
        assert!(!CentralityTier::Peripheral.is_central());
    }

    #[test]
    fn test_category_names() {
        assert_eq!(ClaimCategory::Factual.as_str(), "factual");
        assert_eq!(ClaimCategory::Evaluative.as_str(), "evaluative");
        assert_eq!(ClaimCategory::Procedural.as_str(), "procedural");
    }
}
