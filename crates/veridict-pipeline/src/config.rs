//! Pipeline configuration
//!
//! One root struct, TOML-loadable, with every stage's configuration nested
//! under its own table. Defaults match the per-stage defaults.

use serde::{Deserialize, Serialize};
use veridict_aggregate::{AggregationConfig, TriangulationConfig};
use veridict_debate::DebateConfig;
use veridict_gatekeeper::TierConfig;

/// Configuration for the full verification pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Maximum claims debated concurrently
    pub max_concurrent_claims: usize,

    /// Model-call budget shared by every claim in one run; attempts count,
    /// not successes
    pub max_model_calls: u64,

    /// Debate engine configuration
    pub debate: DebateConfig,

    /// Triangulation adjustment magnitudes
    pub triangulation: TriangulationConfig,

    /// Aggregation weight multipliers
    pub aggregation: AggregationConfig,

    /// Confidence-tier thresholds
    pub tiers: TierConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_concurrent_claims: 4,
            max_model_calls: 256,
            debate: DebateConfig::default(),
            triangulation: TriangulationConfig::default(),
            aggregation: AggregationConfig::default(),
            tiers: TierConfig::default(),
        }
    }
}

impl PipelineConfig {
    /// Preset for reproducible runs: pinned sampling, no resampling
    pub fn reproducible() -> Self {
        Self {
            debate: DebateConfig::reproducible(),
            ..Default::default()
        }
    }

    /// Validate the configuration, including every nested stage
    pub fn validate(&self) -> Result<(), String> {
        if self.max_concurrent_claims == 0 {
            return Err("max_concurrent_claims must be at least 1".to_string());
        }
        if self.max_model_calls == 0 {
            return Err("max_model_calls must be at least 1".to_string());
        }
        self.debate.validate()?;
        self.triangulation.validate()?;
        self.aggregation.validate()?;
        self.tiers.validate()
    }

    /// Load configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &std::path::Path) -> Result<Self, String> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
        Self::from_toml(&contents)
    }
}
