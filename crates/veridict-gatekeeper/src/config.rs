//! Confidence-tier gate configuration
//!
//! Every field here gates a branch in the classifier; fields that stop
//! gating a decision get deleted, not kept around.

use serde::{Deserialize, Serialize};
use veridict_domain::ConfidenceTier;

/// Thresholds for publication-confidence tiering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierConfig {
    /// Minimum unique sources for HIGH
    pub high_min_sources: usize,

    /// Minimum mean evidence quality for HIGH
    pub high_min_quality: f64,

    /// Minimum directional agreement for HIGH (fraction, 0.0-1.0)
    pub high_min_agreement: f64,

    /// Minimum unique sources for MEDIUM; below this the verdict is
    /// INSUFFICIENT
    pub medium_min_sources: usize,

    /// Minimum mean evidence quality for MEDIUM
    pub medium_min_quality: f64,

    /// Minimum directional agreement for MEDIUM
    pub medium_min_agreement: f64,

    /// Minimum tier a non-central claim needs to appear in the rendered
    /// report; central claims are always included
    pub report_min_tier: ConfidenceTier,
}

impl Default for TierConfig {
    fn default() -> Self {
        Self {
            high_min_sources: 3,
            high_min_quality: 0.7,
            high_min_agreement: 0.8,
            medium_min_sources: 2,
            medium_min_quality: 0.6,
            medium_min_agreement: 0.6,
            report_min_tier: ConfidenceTier::Medium,
        }
    }
}

impl TierConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.medium_min_sources == 0 {
            return Err("medium_min_sources must be at least 1".to_string());
        }
        if self.high_min_sources < self.medium_min_sources {
            return Err("high_min_sources cannot be below medium_min_sources".to_string());
        }
        for (name, value) in [
            ("high_min_quality", self.high_min_quality),
            ("high_min_agreement", self.high_min_agreement),
            ("medium_min_quality", self.medium_min_quality),
            ("medium_min_agreement", self.medium_min_agreement),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(format!("{} must be in [0.0, 1.0]", name));
            }
        }
        if self.high_min_quality < self.medium_min_quality {
            return Err("high_min_quality cannot be below medium_min_quality".to_string());
        }
        Ok(())
    }

    /// Load configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }
}
