//! Admissibility gate - filters claims before any expensive work

use tracing::debug;
use veridict_domain::{AtomicClaim, ClaimId};

/// Result of the admissibility check
#[derive(Debug, Clone, PartialEq)]
pub struct Admissibility {
    /// Claim that was checked
    pub claim_id: ClaimId,

    /// Whether the claim may enter the debate
    pub passed: bool,

    /// Why the claim was rejected, when it was
    pub failure_reason: Option<String>,
}

/// The gate claims pass before the debate engine sees them
///
/// A claim passes if it is central, or if its statement is non-empty after
/// trimming. Central claims always pass. This gate intentionally carries no
/// configuration: a threshold that gates nothing must not exist.
#[derive(Debug, Clone, Copy, Default)]
pub struct AdmissibilityGate;

impl AdmissibilityGate {
    /// Create the gate
    pub fn new() -> Self {
        Self
    }

    /// Check one claim
    pub fn check(&self, claim: &AtomicClaim) -> Admissibility {
        if claim.centrality.is_central() {
            return Admissibility {
                claim_id: claim.id,
                passed: true,
                failure_reason: None,
            };
        }

        if claim.statement.trim().is_empty() {
            debug!(claim_id = %claim.id, "claim rejected: empty statement");
            return Admissibility {
                claim_id: claim.id,
                passed: false,
                failure_reason: Some("statement is empty after trimming".to_string()),
            };
        }

        // The upstream flag is advisory; a non-empty statement still passes
        if !claim.admissible {
            debug!(claim_id = %claim.id, "upstream marked claim inadmissible; passing anyway");
        }

        Admissibility {
            claim_id: claim.id,
            passed: true,
            failure_reason: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use veridict_domain::{CentralityTier, ClaimCategory, Direction, HarmTier};

    fn claim(statement: &str, centrality: CentralityTier, admissible: bool) -> AtomicClaim {
        AtomicClaim {
            id: ClaimId::new(),
            statement: statement.to_string(),
            category: ClaimCategory::Factual,
            centrality,
            harm: HarmTier::Low,
            thesis_direction: Direction::Supports,
            admissible,
        }
    }

    #[test]
    fn test_normal_claim_passes() {
        let gate = AdmissibilityGate::new();
        let result = gate.check(&claim("The vote happened in March", CentralityTier::Supporting, true));
        assert!(result.passed);
        assert!(result.failure_reason.is_none());
    }

    #[test]
    fn test_empty_statement_rejected() {
        let gate = AdmissibilityGate::new();
        let result = gate.check(&claim("   \n\t ", CentralityTier::Peripheral, true));
        assert!(!result.passed);
        assert!(result.failure_reason.unwrap().contains("empty"));
    }

    #[test]
    fn test_central_claim_always_passes() {
        let gate = AdmissibilityGate::new();
        // Even with an empty statement and an upstream inadmissible mark
        let result = gate.check(&claim("", CentralityTier::Central, false));
        assert!(result.passed);
    }

    #[test]
    fn test_upstream_flag_does_not_gate() {
        // Only centrality and the trimmed statement gate the decision
        let gate = AdmissibilityGate::new();
        let result = gate.check(&claim("Plausible text", CentralityTier::Supporting, false));
        assert!(result.passed);
    }
}
