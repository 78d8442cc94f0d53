//! Trait definitions for external capabilities
//!
//! These traits define the boundary between the verification logic and
//! infrastructure. Provider implementations live in `veridict-llm`; the
//! debate engine validates every raw response at this boundary and never
//! trusts model output further downstream.

use serde::{Deserialize, Serialize};

/// Sampling parameters for one generative call
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SamplingOptions {
    /// Sampling temperature; the debate protocol varies this per state
    pub temperature: f64,

    /// Seed pinned in reproducibility mode
    pub seed: Option<u64>,
}

impl SamplingOptions {
    /// Options for a normal generation at the given temperature
    pub fn at_temperature(temperature: f64) -> Self {
        Self {
            temperature,
            seed: None,
        }
    }

    /// Options for reproducibility mode: randomness pinned low and seeded
    pub fn pinned(seed: u64) -> Self {
        Self {
            temperature: 0.0,
            seed: Some(seed),
        }
    }
}

/// The generative model capability
///
/// Implementations return raw text; the caller owns schema validation.
/// Providers are free to retry transport-level failures internally, but a
/// response that fails schema validation is the caller's problem (and is
/// what the debate engine's own retry loop covers).
pub trait VerdictModel {
    /// Error type for model operations
    type Error;

    /// Run one completion with the given sampling options
    fn complete(&self, prompt: &str, sampling: &SamplingOptions) -> Result<String, Self::Error>;
}

/// Closed failure set for a generative call, as seen past the validation
/// boundary
///
/// Everything a provider or parser can do wrong collapses into one of these
/// three; the engine never assumes success and never aborts a claim on any
/// of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelFailure {
    /// The response did not conform to the required output shape
    SchemaMismatch {
        /// What failed to parse or validate
        detail: String,
    },
    /// The call did not complete in time
    Timeout,
    /// The model declined to answer
    Refusal {
        /// The refusal text, for diagnostics
        detail: String,
    },
}

impl std::fmt::Display for ModelFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelFailure::SchemaMismatch { detail } => write!(f, "schema mismatch: {}", detail),
            ModelFailure::Timeout => write!(f, "timeout"),
            ModelFailure::Refusal { detail } => write!(f, "refusal: {}", detail),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pinned_options() {
        let opts = SamplingOptions::pinned(7);
        assert_eq!(opts.temperature, 0.0);
        assert_eq!(opts.seed, Some(7));
    }

    #[test]
    fn test_failure_display() {
        let f = ModelFailure::SchemaMismatch {
            detail: "missing field".to_string(),
        };
        assert!(f.to_string().contains("missing field"));
    }
}
