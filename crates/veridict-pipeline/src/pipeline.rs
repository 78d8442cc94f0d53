//! Pipeline orchestration
//!
//! Fan-out over claims with a semaphore bounding concurrency, a shared
//! atomic model-call budget, and cooperative cancellation. Task completion
//! order never leaks into the output: verdicts, warnings, and the
//! aggregation all follow input claim order.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};
use veridict_aggregate::{Aggregator, TriangulationScorer};
use veridict_debate::{
    CancelFlag, DebateEngine, DebateError, DebateOutcome, RunBudget,
};
use veridict_domain::traits::VerdictModel;
use veridict_domain::{AtomicClaim, ClaimBoundary, ClaimVerdict};
use veridict_gatekeeper::{AdmissibilityGate, ConfidenceTierGate, EvidenceProfile};

use crate::config::PipelineConfig;
use crate::report::{ClaimWarning, SkippedClaim, VerificationReport, REPORT_SCHEMA_VERSION};

/// One claim with its evidence, ready for verification
#[derive(Debug, Clone, PartialEq)]
pub struct ClaimDossier {
    /// The claim to verify
    pub claim: AtomicClaim,

    /// Evidence grouped by analytical boundary
    pub boundaries: Vec<ClaimBoundary>,
}

/// Errors the pipeline can surface to its caller
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Configuration rejected at construction
    #[error("Configuration error: {0}")]
    Config(String),

    /// The debate engine rejected its configuration
    #[error(transparent)]
    Debate(#[from] DebateError),
}

/// The full claim-verification pipeline
pub struct VerificationPipeline<M> {
    engine: Arc<DebateEngine<M>>,
    budget: Arc<RunBudget>,
    admissibility: AdmissibilityGate,
    scorer: TriangulationScorer,
    tier_gate: ConfidenceTierGate,
    aggregator: Aggregator,
    max_concurrent_claims: usize,
}

impl<M> VerificationPipeline<M>
where
    M: VerdictModel + Send + Sync + 'static,
    M::Error: std::fmt::Display,
{
    /// Create a pipeline; rejects invalid configuration
    pub fn new(model: Arc<M>, config: PipelineConfig) -> Result<Self, PipelineError> {
        config.validate().map_err(PipelineError::Config)?;
        let budget = Arc::new(RunBudget::new(config.max_model_calls));
        let engine = Arc::new(DebateEngine::new(
            model,
            config.debate.clone(),
            Arc::clone(&budget),
        )?);
        Ok(Self {
            engine,
            budget,
            admissibility: AdmissibilityGate::new(),
            scorer: TriangulationScorer::new(config.triangulation),
            tier_gate: ConfidenceTierGate::new(config.tiers.clone()),
            aggregator: Aggregator::new(config.aggregation),
            max_concurrent_claims: config.max_concurrent_claims,
        })
    }

    /// The shared model-call budget, for inspection after a run
    pub fn budget(&self) -> &RunBudget {
        &self.budget
    }

    /// Verify a batch of claims and produce the report
    ///
    /// Debates run concurrently up to the configured bound; everything
    /// downstream of the debate is deterministic and runs on this task in
    /// input order.
    pub async fn run(
        &self,
        dossiers: &[ClaimDossier],
        cancel: Arc<CancelFlag>,
    ) -> VerificationReport {
        let mut skipped: Vec<SkippedClaim> = Vec::new();
        let mut admissible: Vec<&ClaimDossier> = Vec::new();

        for dossier in dossiers {
            let result = self.admissibility.check(&dossier.claim);
            if result.passed {
                admissible.push(dossier);
            } else {
                let reason = result
                    .failure_reason
                    .unwrap_or_else(|| "inadmissible".to_string());
                debug!(claim_id = %dossier.claim.id, reason = %reason, "claim gated out");
                skipped.push(SkippedClaim {
                    claim_id: dossier.claim.id,
                    reason,
                });
            }
        }

        info!(
            total = dossiers.len(),
            admissible = admissible.len(),
            "starting verification run"
        );

        let semaphore = Arc::new(Semaphore::new(self.max_concurrent_claims));
        let mut join_set = JoinSet::new();
        for (idx, dossier) in admissible.iter().enumerate() {
            let engine = Arc::clone(&self.engine);
            let semaphore = Arc::clone(&semaphore);
            let cancel = Arc::clone(&cancel);
            let dossier = (*dossier).clone();
            join_set.spawn(async move {
                let _permit = match semaphore.acquire_owned().await {
                    Ok(permit) => permit,
                    Err(_) => {
                        return (
                            idx,
                            DebateOutcome::NotEvaluated {
                                claim_id: dossier.claim.id,
                                reason: "pipeline shut down".to_string(),
                            },
                        )
                    }
                };
                let outcome = engine
                    .run(&dossier.claim, &dossier.boundaries, &cancel)
                    .await;
                (idx, outcome)
            });
        }

        let mut outcomes: Vec<Option<DebateOutcome>> = vec![None; admissible.len()];
        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok((idx, outcome)) => outcomes[idx] = Some(outcome),
                Err(e) => warn!(error = %e, "debate task failed to join"),
            }
        }

        let mut verdicts: Vec<ClaimVerdict> = Vec::new();
        let mut claims_with_verdicts: Vec<&AtomicClaim> = Vec::new();
        let mut warnings: Vec<ClaimWarning> = Vec::new();
        let mut report_claim_ids = Vec::new();

        for (dossier, outcome) in admissible.iter().zip(outcomes) {
            let claim = &dossier.claim;
            let Some(outcome) = outcome else {
                skipped.push(SkippedClaim {
                    claim_id: claim.id,
                    reason: "debate task panicked".to_string(),
                });
                continue;
            };
            match outcome {
                DebateOutcome::NotEvaluated { claim_id, reason } => {
                    skipped.push(SkippedClaim { claim_id, reason });
                }
                DebateOutcome::Verdict(debate) => {
                    let triangulation = self.scorer.score(&dossier.boundaries);
                    let profile = EvidenceProfile::from_boundaries(&dossier.boundaries);
                    let tier = self.tier_gate.classify(&profile);

                    for warning in debate.warnings {
                        warnings.push(ClaimWarning {
                            claim_id: claim.id,
                            warning,
                        });
                    }
                    if self.tier_gate.include_in_report(claim, tier) {
                        report_claim_ids.push(claim.id);
                    }

                    let verdict = ClaimVerdict {
                        claim_id: debate.claim_id,
                        truth_percentage: debate.truth_percentage,
                        confidence: debate.confidence,
                        band: debate.band,
                        boundary_findings: debate.boundary_findings,
                        supporting_evidence: debate.supporting_evidence,
                        opposing_evidence: debate.opposing_evidence,
                        triangulation,
                        contestation: debate.contestation,
                        spread: debate.spread,
                        tier,
                        direction_audit: debate.direction_audit,
                        reduced_confidence: debate.reduced_confidence,
                    };
                    if let Err(violation) = verdict.check_invariants() {
                        warn!(
                            claim_id = %verdict.claim_id,
                            violation = %violation,
                            "verdict violates structural invariants"
                        );
                    }
                    verdicts.push(verdict);
                    claims_with_verdicts.push(claim);
                }
            }
        }

        let items: Vec<(&AtomicClaim, &ClaimVerdict)> = claims_with_verdicts
            .iter()
            .copied()
            .zip(verdicts.iter())
            .collect();
        let assessment = self.aggregator.assess(&items);

        info!(
            verdicts = verdicts.len(),
            skipped = skipped.len(),
            model_calls = self.budget.used(),
            overall_truth = assessment.overall_truth_percentage,
            "verification run complete"
        );

        VerificationReport {
            schema_version: REPORT_SCHEMA_VERSION,
            verdicts,
            assessment,
            report_claim_ids,
            warnings,
            skipped,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use veridict_domain::{CentralityTier, ClaimCategory, ClaimId, Direction, HarmTier};

    #[test]
    fn test_invalid_config_rejected() {
        use veridict_llm::MockProvider;
        let config = PipelineConfig {
            max_model_calls: 0,
            ..Default::default()
        };
        let result = VerificationPipeline::new(Arc::new(MockProvider::default()), config);
        assert!(matches!(result, Err(PipelineError::Config(_))));
    }

    #[tokio::test]
    async fn test_inadmissible_claim_is_skipped_without_model_calls() {
        use veridict_llm::MockProvider;
        let provider = MockProvider::default();
        let pipeline =
            VerificationPipeline::new(Arc::new(provider.clone()), PipelineConfig::default())
                .unwrap();

        let dossier = ClaimDossier {
            claim: AtomicClaim {
                id: ClaimId::new(),
                statement: "   ".to_string(),
                category: ClaimCategory::Factual,
                centrality: CentralityTier::Peripheral,
                harm: HarmTier::Low,
                thesis_direction: Direction::Supports,
                admissible: true,
            },
            boundaries: Vec::new(),
        };

        let report = pipeline.run(&[dossier], Arc::new(CancelFlag::new())).await;
        assert!(report.verdicts.is_empty());
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(provider.call_count(), 0);
        assert_eq!(report.assessment.claim_count, 0);
    }
}
