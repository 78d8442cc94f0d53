//! Publication-confidence tiers for verdicts
//!
//! Assigned by the Confidence-Tier Gate after the debate. Ordering matters:
//! report inclusion for non-central claims requires at least `Medium`.

use serde::{Deserialize, Serialize};

/// Publication confidence tier for a verdict
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceTier {
    /// Fewer than two unique sources
    Insufficient,
    /// Two or more sources but below the medium thresholds
    Low,
    /// Solid sourcing and agreement
    Medium,
    /// Strong sourcing, quality, and directional agreement
    High,
}

impl ConfidenceTier {
    /// Get the tier name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfidenceTier::High => "high",
            ConfidenceTier::Medium => "medium",
            ConfidenceTier::Low => "low",
            ConfidenceTier::Insufficient => "insufficient",
        }
    }

    /// Parse a tier from a string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "high" => Some(ConfidenceTier::High),
            "medium" => Some(ConfidenceTier::Medium),
            "low" => Some(ConfidenceTier::Low),
            "insufficient" => Some(ConfidenceTier::Insufficient),
            _ => None,
        }
    }
}

impl std::str::FromStr for ConfidenceTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid confidence tier: {}", s))
    }
}
