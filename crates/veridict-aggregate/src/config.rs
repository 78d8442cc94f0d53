//! Configuration for triangulation and aggregation
//!
//! All adjustment magnitudes and weight multipliers live here, never inline
//! in the scoring code.

use serde::{Deserialize, Serialize};

/// Weight-factor adjustments per triangulation class
///
/// Applied as multiplicative factors on the claim's aggregation weight:
/// above 1.0 rewards cross-boundary agreement, below 1.0 penalizes
/// single-boundary claims. `Conflicted` always applies exactly 1.0 (the
/// contested flag carries the signal instead).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TriangulationConfig {
    /// Factor when three or more boundaries agree with no dissent
    pub strong_adjustment: f64,

    /// Factor when a majority agrees over dissent
    pub moderate_adjustment: f64,

    /// Factor when a single boundary carries the claim
    pub weak_adjustment: f64,
}

impl Default for TriangulationConfig {
    fn default() -> Self {
        Self {
            strong_adjustment: 1.15,
            moderate_adjustment: 1.05,
            weak_adjustment: 0.85,
        }
    }
}

impl TriangulationConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.weak_adjustment <= 0.0 {
            return Err("weak_adjustment must be positive".to_string());
        }
        if self.weak_adjustment > 1.0 {
            return Err("weak_adjustment must not exceed 1.0".to_string());
        }
        if self.moderate_adjustment < 1.0 {
            return Err("moderate_adjustment must be at least 1.0".to_string());
        }
        if self.strong_adjustment < self.moderate_adjustment {
            return Err("strong_adjustment cannot be below moderate_adjustment".to_string());
        }
        Ok(())
    }
}

/// Weight multipliers for the overall assessment
///
/// Per-claim weight = centrality x harm x (confidence/100) x contestation x
/// triangulation adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AggregationConfig {
    /// Multiplier for central claims
    pub central_weight: f64,

    /// Multiplier for supporting claims
    pub supporting_weight: f64,

    /// Multiplier for peripheral claims
    pub peripheral_weight: f64,

    /// Multiplier for high harm potential
    pub harm_high_weight: f64,

    /// Multiplier for moderate harm potential
    pub harm_moderate_weight: f64,

    /// Multiplier for low harm potential
    pub harm_low_weight: f64,

    /// Multiplier applied when a verdict is contested (challenge survived
    /// or triangulation conflicted); uncontested claims get 1.0
    pub contested_weight: f64,

    /// Floor weight guaranteed to central claims irrespective of confidence
    pub central_floor_weight: f64,
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            central_weight: 1.0,
            supporting_weight: 0.6,
            peripheral_weight: 0.3,
            harm_high_weight: 1.5,
            harm_moderate_weight: 1.2,
            harm_low_weight: 1.0,
            contested_weight: 0.8,
            central_floor_weight: 0.1,
        }
    }
}

impl AggregationConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        for (name, value) in [
            ("central_weight", self.central_weight),
            ("supporting_weight", self.supporting_weight),
            ("peripheral_weight", self.peripheral_weight),
            ("harm_high_weight", self.harm_high_weight),
            ("harm_moderate_weight", self.harm_moderate_weight),
            ("harm_low_weight", self.harm_low_weight),
            ("contested_weight", self.contested_weight),
        ] {
            if value <= 0.0 {
                return Err(format!("{} must be positive", name));
            }
        }
        if self.central_floor_weight <= 0.0 {
            return Err("central_floor_weight must be positive (central claims never drop out)"
                .to_string());
        }
        if self.contested_weight > 1.0 {
            return Err("contested_weight must not exceed 1.0".to_string());
        }
        Ok(())
    }

    /// Load configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }
}
