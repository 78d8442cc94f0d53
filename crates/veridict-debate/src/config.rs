//! Configuration for the debate engine

use serde::{Deserialize, Serialize};
use std::time::Duration;
use veridict_domain::ConsistencySpread;

/// Spread-to-confidence policy for the self-consistency step
///
/// Thresholds partition the spread axis into four regimes: no change,
/// slight reduction, significant reduction, and forced
/// insufficient-confidence. Reductions are in confidence points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpreadPolicy {
    /// Spread up to this value leaves confidence unchanged
    pub no_change_max: f64,

    /// Spread up to this value applies the slight reduction
    pub slight_max: f64,

    /// Spread up to this value applies the significant reduction; above it
    /// the verdict band is forced to insufficient-confidence
    pub significant_max: f64,

    /// Confidence points removed in the slight regime
    pub slight_reduction: f64,

    /// Confidence points removed in the significant and forced regimes
    pub significant_reduction: f64,
}

impl Default for SpreadPolicy {
    fn default() -> Self {
        Self {
            no_change_max: 5.0,
            slight_max: 12.0,
            significant_max: 20.0,
            slight_reduction: 5.0,
            significant_reduction: 15.0,
        }
    }
}

impl SpreadPolicy {
    /// Apply the policy to a confidence value
    ///
    /// Returns the adjusted confidence and whether the verdict band must be
    /// forced to insufficient-confidence. An unassessed spread (skipped
    /// resampling) never adjusts anything.
    pub fn apply(&self, confidence: f64, spread: &ConsistencySpread) -> (f64, bool) {
        if !spread.assessed || spread.spread <= self.no_change_max {
            return (confidence, false);
        }
        if spread.spread <= self.slight_max {
            return ((confidence - self.slight_reduction).max(0.0), false);
        }
        if spread.spread <= self.significant_max {
            return ((confidence - self.significant_reduction).max(0.0), false);
        }
        ((confidence - self.significant_reduction).max(0.0), true)
    }

    /// Validate threshold ordering and reduction monotonicity
    pub fn validate(&self) -> Result<(), String> {
        if self.no_change_max < 0.0 {
            return Err("no_change_max must be non-negative".to_string());
        }
        if self.slight_max <= self.no_change_max {
            return Err("slight_max must exceed no_change_max".to_string());
        }
        if self.significant_max <= self.slight_max {
            return Err("significant_max must exceed slight_max".to_string());
        }
        if self.slight_reduction < 0.0 || self.significant_reduction < self.slight_reduction {
            return Err(
                "reductions must be non-negative and significant >= slight".to_string()
            );
        }
        Ok(())
    }
}

/// Configuration for the debate engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebateConfig {
    /// Additional advocate re-runs for self-consistency (N; N+1 samples
    /// total including the primary run)
    pub self_consistency_samples: usize,

    /// Lower bound of the resampling temperature range
    pub temperature_min: f64,

    /// Upper bound of the resampling temperature range
    pub temperature_max: f64,

    /// Temperature for the primary advocate, challenge, reconcile, and
    /// direction calls
    pub base_temperature: f64,

    /// Attempts per state before degrading to neutral defaults
    pub max_attempts: u32,

    /// Base backoff between retry attempts (doubled per attempt)
    pub backoff_base_ms: u64,

    /// Temperature added per retry attempt to shake a stuck model
    pub retry_temperature_increment: f64,

    /// Timeout for a single model call (seconds)
    pub step_timeout_secs: u64,

    /// Reproducibility mode: sampling pinned to a fixed seed and zero
    /// temperature, self-consistency skipped (recorded as not assessed)
    pub reproducible: bool,

    /// Seed used when reproducibility mode is on
    pub reproducibility_seed: u64,

    /// Confidence points removed per unaddressed evidence-cited objection
    pub unaddressed_objection_penalty: f64,

    /// Spread-to-confidence policy
    pub spread_policy: SpreadPolicy,
}

impl Default for DebateConfig {
    fn default() -> Self {
        Self {
            self_consistency_samples: 2,
            temperature_min: 0.5,
            temperature_max: 0.9,
            base_temperature: 0.3,
            max_attempts: 3,
            backoff_base_ms: 250,
            retry_temperature_increment: 0.1,
            step_timeout_secs: 90,
            reproducible: false,
            reproducibility_seed: 42,
            unaddressed_objection_penalty: 10.0,
            spread_policy: SpreadPolicy::default(),
        }
    }
}

impl DebateConfig {
    /// Preset for reproducible runs: pinned sampling, no resampling
    pub fn reproducible() -> Self {
        Self {
            reproducible: true,
            ..Default::default()
        }
    }

    /// Timeout for a single model call
    pub fn step_timeout(&self) -> Duration {
        Duration::from_secs(self.step_timeout_secs)
    }

    /// Temperatures for the self-consistency re-runs, evenly spaced across
    /// the configured range (deterministic, no RNG)
    pub fn sample_temperatures(&self) -> Vec<f64> {
        let n = self.self_consistency_samples;
        match n {
            0 => Vec::new(),
            1 => vec![(self.temperature_min + self.temperature_max) / 2.0],
            _ => (0..n)
                .map(|i| {
                    self.temperature_min
                        + (self.temperature_max - self.temperature_min) * i as f64
                            / (n as f64 - 1.0)
                })
                .collect(),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_attempts == 0 {
            return Err("max_attempts must be at least 1".to_string());
        }
        if self.step_timeout_secs == 0 {
            return Err("step_timeout_secs must be greater than 0".to_string());
        }
        if !(0.0..=2.0).contains(&self.temperature_min)
            || !(0.0..=2.0).contains(&self.temperature_max)
            || !(0.0..=2.0).contains(&self.base_temperature)
        {
            return Err("temperatures must be in [0.0, 2.0]".to_string());
        }
        if self.temperature_min > self.temperature_max {
            return Err("temperature_min cannot exceed temperature_max".to_string());
        }
        if self.retry_temperature_increment < 0.0 {
            return Err("retry_temperature_increment must be non-negative".to_string());
        }
        if self.unaddressed_objection_penalty < 0.0 {
            return Err("unaddressed_objection_penalty must be non-negative".to_string());
        }
        self.spread_policy.validate()
    }

    /// Load configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(DebateConfig::default().validate().is_ok());
        assert!(DebateConfig::reproducible().validate().is_ok());
    }

    #[test]
    fn test_sample_temperatures_span_range() {
        let config = DebateConfig {
            self_consistency_samples: 3,
            temperature_min: 0.5,
            temperature_max: 0.9,
            ..Default::default()
        };
        let temps = config.sample_temperatures();
        assert_eq!(temps.len(), 3);
        assert_eq!(temps[0], 0.5);
        assert!((temps[1] - 0.7).abs() < 1e-9);
        assert_eq!(temps[2], 0.9);
    }

    #[test]
    fn test_single_sample_uses_midpoint() {
        let config = DebateConfig {
            self_consistency_samples: 1,
            temperature_min: 0.4,
            temperature_max: 0.8,
            ..Default::default()
        };
        let temps = config.sample_temperatures();
        assert_eq!(temps.len(), 1);
        assert!((temps[0] - 0.6).abs() < 1e-9);
    }

    #[test]
    fn test_spread_policy_regimes() {
        let policy = SpreadPolicy::default();
        let spread = |s: f64| ConsistencySpread {
            spread: s,
            assessed: true,
            samples: vec![],
        };

        assert_eq!(policy.apply(80.0, &spread(5.0)), (80.0, false));
        assert_eq!(policy.apply(80.0, &spread(8.0)), (75.0, false));
        assert_eq!(policy.apply(80.0, &spread(18.0)), (65.0, false));
        assert_eq!(policy.apply(80.0, &spread(24.0)), (65.0, true));
    }

    #[test]
    fn test_spread_policy_skipped_spread_is_noop() {
        let policy = SpreadPolicy::default();
        assert_eq!(
            policy.apply(80.0, &ConsistencySpread::skipped()),
            (80.0, false)
        );
    }

    #[test]
    fn test_spread_policy_clamps_at_zero() {
        let policy = SpreadPolicy::default();
        let spread = ConsistencySpread {
            spread: 18.0,
            assessed: true,
            samples: vec![],
        };
        assert_eq!(policy.apply(10.0, &spread), (0.0, false));
    }

    #[test]
    fn test_spread_policy_monotone() {
        // Larger spread never yields higher confidence
        let policy = SpreadPolicy::default();
        let base = 80.0;
        let mut last = f64::INFINITY;
        for s in 0..40 {
            let spread = ConsistencySpread {
                spread: s as f64,
                assessed: true,
                samples: vec![],
            };
            let (adjusted, _) = policy.apply(base, &spread);
            assert!(adjusted <= last, "confidence rose as spread grew");
            last = adjusted;
        }
    }

    #[test]
    fn test_invalid_threshold_order_rejected() {
        let policy = SpreadPolicy {
            slight_max: 4.0,
            ..Default::default()
        };
        assert!(policy.validate().is_err());
    }

    #[test]
    fn test_from_toml() {
        let config = DebateConfig::from_toml(
            r#"
            self_consistency_samples = 3
            temperature_min = 0.4
            temperature_max = 1.0
            base_temperature = 0.2
            max_attempts = 2
            backoff_base_ms = 100
            retry_temperature_increment = 0.05
            step_timeout_secs = 60
            reproducible = false
            reproducibility_seed = 7
            unaddressed_objection_penalty = 12.0

            [spread_policy]
            no_change_max = 5.0
            slight_max = 12.0
            significant_max = 20.0
            slight_reduction = 5.0
            significant_reduction = 15.0
            "#,
        )
        .unwrap();
        assert_eq!(config.self_consistency_samples, 3);
        assert_eq!(config.reproducibility_seed, 7);
        assert!(config.validate().is_ok());
    }
}
