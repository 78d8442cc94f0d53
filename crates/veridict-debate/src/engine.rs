//! The five-state debate protocol
//!
//! ADVOCATE -> (SELF_CONSISTENCY || CHALLENGE) -> RECONCILE -> VALIDATE
//!
//! The engine drives the protocol for one claim at a time. Model calls are
//! charged to the shared run budget before they are made, retried with
//! backoff and a temperature bump when the response does not validate, and
//! degraded to conservative neutral defaults when retries run out. A claim
//! never aborts on model misbehavior; only cooperative cancellation between
//! states stops it short.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};
use veridict_domain::traits::{ModelFailure, SamplingOptions, VerdictModel};
use veridict_domain::{
    clamp_pct, implied_direction, AtomicClaim, BoundaryFinding, ClaimBoundary, ConsistencySpread,
    ContestationMeta, Direction, DirectionAudit, DominantDirection, EvidenceId, VerdictBand,
};

use crate::budget::{CancelFlag, RunBudget};
use crate::config::DebateConfig;
use crate::direction::{directions_conflict, partition, recompute_truth, DirectionCounts};
use crate::error::{DebateError, DebateWarning, StepError};
use crate::parser::{
    parse_advocate, parse_challenge, parse_directions, parse_reconcile, EvidenceIndex,
};
use crate::prompt::PromptBuilder;
use crate::types::{
    AdvocateVerdict, Challenge, DebateOutcome, DebateStage, DebateVerdict, ReconciledVerdict,
};

/// Neutral truth value substituted when a state degrades
const NEUTRAL_TRUTH: f64 = 50.0;

/// Confidence assigned to degraded output
const DEGRADED_CONFIDENCE: f64 = 25.0;

/// Drives the debate protocol for one claim at a time
///
/// Cheap to share: clone the `Arc`s, not the engine. The budget is shared
/// across every claim in a run; the engine itself holds no per-claim state.
pub struct DebateEngine<M> {
    model: Arc<M>,
    config: DebateConfig,
    budget: Arc<RunBudget>,
}

impl<M> DebateEngine<M>
where
    M: VerdictModel + Send + Sync + 'static,
    M::Error: std::fmt::Display,
{
    /// Create an engine; rejects invalid configuration
    pub fn new(
        model: Arc<M>,
        config: DebateConfig,
        budget: Arc<RunBudget>,
    ) -> Result<Self, DebateError> {
        config.validate().map_err(DebateError::Config)?;
        Ok(Self {
            model,
            config,
            budget,
        })
    }

    /// Run the full protocol for one claim
    pub async fn run(
        &self,
        claim: &AtomicClaim,
        boundaries: &[ClaimBoundary],
        cancel: &CancelFlag,
    ) -> DebateOutcome {
        let claim_id = claim.id;
        if cancel.is_cancelled() {
            return DebateOutcome::NotEvaluated {
                claim_id,
                reason: "cancelled before evaluation".to_string(),
            };
        }

        let index = EvidenceIndex::from_boundaries(boundaries);
        let prompts = PromptBuilder::new(claim, boundaries);
        let mut warnings: Vec<DebateWarning> = Vec::new();
        let mut reduced_confidence = false;

        // ADVOCATE
        let advocate_prompt = prompts.advocate();
        let advocate = match self
            .call_with_retry(&advocate_prompt, self.config.base_temperature, |r| {
                parse_advocate(r, &index)
            })
            .await
        {
            Ok((verdict, unknown)) => {
                if !unknown.is_empty() {
                    warnings.push(DebateWarning::GroundingMismatch { stripped: unknown });
                }
                verdict
            }
            Err(StepError::Budget) => {
                warnings.push(DebateWarning::BudgetExhausted {
                    stage: DebateStage::Advocate,
                });
                reduced_confidence = true;
                degraded_advocate(boundaries)
            }
            Err(StepError::Model(failure)) => {
                warn!(claim_id = %claim_id, failure = %failure, "advocate degraded");
                warnings.push(DebateWarning::DegradedStage {
                    stage: DebateStage::Advocate,
                    failure,
                });
                degraded_advocate(boundaries)
            }
        };

        if cancel.is_cancelled() {
            return DebateOutcome::NotEvaluated {
                claim_id,
                reason: "cancelled after advocate".to_string(),
            };
        }

        // SELF_CONSISTENCY and CHALLENGE run concurrently; both are
        // optional and absorb their own failures.
        let (sc, ch) = tokio::join!(
            self.self_consistency(&advocate_prompt, advocate.truth_percentage, &index),
            self.challenge(&prompts, &advocate, &index),
        );
        let (spread, sc_warnings, sc_reduced) = sc;
        let (challenge, ch_warnings, ch_reduced) = ch;
        warnings.extend(sc_warnings);
        warnings.extend(ch_warnings);
        reduced_confidence = reduced_confidence || sc_reduced || ch_reduced;

        if cancel.is_cancelled() {
            return DebateOutcome::NotEvaluated {
                claim_id,
                reason: "cancelled before reconcile".to_string(),
            };
        }

        // RECONCILE
        let (reconciled, contestation) = match &challenge {
            Some(ch) => {
                let (reconciled, rw, rr) = self.reconcile(&prompts, &advocate, ch).await;
                warnings.extend(rw);
                reduced_confidence = reduced_confidence || rr;
                let contestation = ContestationMeta {
                    contested: true,
                    unaddressed_objections: reconciled.unaddressed_objections,
                    cited_evidence: ch.cited_evidence(),
                    addresses_support: ch.addresses_support,
                    addresses_absence: ch.addresses_absence,
                };
                (reconciled, contestation)
            }
            None => (
                carry_over(&advocate),
                ContestationMeta::uncontested(),
            ),
        };

        let penalty = contestation.unaddressed_objections as f64
            * self.config.unaddressed_objection_penalty;
        let confidence = (reconciled.confidence - penalty).max(0.0);
        let (confidence, force_insufficient) =
            self.config.spread_policy.apply(confidence, &spread);

        let mut truth = reconciled.truth_percentage;
        let mut supporting = advocate.supporting_evidence.clone();
        let mut opposing = advocate.opposing_evidence.clone();

        if cancel.is_cancelled() {
            return DebateOutcome::NotEvaluated {
                claim_id,
                reason: "cancelled before validation".to_string(),
            };
        }

        // VALIDATE
        let (pairs, dw, dr) = self.direction_pairs(&prompts, boundaries, &index).await;
        warnings.extend(dw);
        reduced_confidence = reduced_confidence || dr;

        let counts = DirectionCounts::tally(&pairs);
        let majority = counts.majority();
        let mut direction_audit = None;
        if directions_conflict(implied_direction(truth), majority) {
            let corrected = recompute_truth(boundaries, &pairs);
            warnings.push(DebateWarning::DirectionMismatch {
                original_truth: truth,
                corrected_truth: corrected,
            });
            direction_audit = Some(DirectionAudit {
                original_truth: truth,
                corrected_truth: corrected,
                supports: counts.supports,
                contradicts: counts.contradicts,
                neutral: counts.neutral,
            });
            truth = corrected;
            let (validated_support, validated_oppose) = partition(&pairs);
            supporting = validated_support;
            opposing = validated_oppose;
        }

        let band = if force_insufficient {
            VerdictBand::InsufficientConfidence
        } else {
            VerdictBand::from_truth(truth)
        };

        debug!(
            claim_id = %claim_id,
            truth = truth,
            confidence = confidence,
            band = band.as_str(),
            warnings = warnings.len(),
            "debate complete"
        );

        DebateOutcome::Verdict(Box::new(DebateVerdict {
            claim_id,
            truth_percentage: clamp_pct(truth),
            confidence: clamp_pct(confidence),
            band,
            boundary_findings: advocate.boundary_findings,
            supporting_evidence: supporting,
            opposing_evidence: opposing,
            contestation,
            spread,
            direction_audit,
            reasoning: reconciled.reasoning,
            reduced_confidence,
            warnings,
        }))
    }

    /// Resample the advocate prompt at spaced temperatures and measure the
    /// spread of truth percentages
    async fn self_consistency(
        &self,
        advocate_prompt: &str,
        primary_truth: f64,
        index: &EvidenceIndex,
    ) -> (ConsistencySpread, Vec<DebateWarning>, bool) {
        if self.config.reproducible || self.config.self_consistency_samples == 0 {
            return (ConsistencySpread::skipped(), Vec::new(), false);
        }

        let mut warnings = Vec::new();
        let mut reduced = false;
        let mut samples = vec![primary_truth];
        for temperature in self.config.sample_temperatures() {
            // One attempt per sample; a failed resample is just a missing
            // data point, not worth a retry loop.
            match self.call_model(advocate_prompt.to_string(), temperature).await {
                Ok(response) => {
                    if let Ok((sample, _)) = parse_advocate(&response, index) {
                        samples.push(sample.truth_percentage);
                    }
                }
                Err(StepError::Budget) => {
                    warnings.push(DebateWarning::BudgetExhausted {
                        stage: DebateStage::SelfConsistency,
                    });
                    reduced = true;
                    if samples.len() == 1 {
                        // Nothing was resampled; record the step as skipped
                        // rather than a trivially stable single sample.
                        return (ConsistencySpread::skipped(), warnings, reduced);
                    }
                    break;
                }
                Err(StepError::Model(failure)) => {
                    debug!(failure = %failure, "self-consistency sample lost");
                }
            }
        }

        (ConsistencySpread::from_samples(samples), warnings, reduced)
    }

    /// Run the challenger; a baseless or failed challenge yields `None`
    async fn challenge(
        &self,
        prompts: &PromptBuilder<'_>,
        advocate: &AdvocateVerdict,
        index: &EvidenceIndex,
    ) -> (Option<Challenge>, Vec<DebateWarning>, bool) {
        let prompt = prompts.challenge(advocate);
        let mut warnings = Vec::new();
        match self
            .call_with_retry(&prompt, self.config.base_temperature, |r| {
                parse_challenge(r, index)
            })
            .await
        {
            Ok((challenge, unknown)) => {
                if !unknown.is_empty() {
                    warnings.push(DebateWarning::GroundingMismatch { stripped: unknown });
                }
                if challenge.is_baseless() || challenge.points.is_empty() {
                    info!(points = challenge.points.len(), "challenge cited no evidence; discarded");
                    warnings.push(DebateWarning::BaselessChallenge);
                    (None, warnings, false)
                } else {
                    (Some(challenge), warnings, false)
                }
            }
            Err(StepError::Budget) => {
                warnings.push(DebateWarning::BudgetExhausted {
                    stage: DebateStage::Challenge,
                });
                (None, warnings, true)
            }
            Err(StepError::Model(failure)) => {
                warnings.push(DebateWarning::DegradedStage {
                    stage: DebateStage::Challenge,
                    failure,
                });
                (None, warnings, false)
            }
        }
    }

    /// Weigh a surviving challenge; failure leaves every objection standing
    async fn reconcile(
        &self,
        prompts: &PromptBuilder<'_>,
        advocate: &AdvocateVerdict,
        challenge: &Challenge,
    ) -> (ReconciledVerdict, Vec<DebateWarning>, bool) {
        let prompt = prompts.reconcile(advocate, challenge);
        let points = challenge.points.len();
        match self
            .call_with_retry(&prompt, self.config.base_temperature, |r| {
                parse_reconcile(r, points)
            })
            .await
        {
            Ok(reconciled) => (reconciled, Vec::new(), false),
            Err(StepError::Budget) => (
                unreconciled(advocate, points),
                vec![DebateWarning::BudgetExhausted {
                    stage: DebateStage::Reconcile,
                }],
                true,
            ),
            Err(StepError::Model(failure)) => (
                unreconciled(advocate, points),
                vec![DebateWarning::DegradedStage {
                    stage: DebateStage::Reconcile,
                    failure,
                }],
                false,
            ),
        }
    }

    /// Obtain validated per-evidence directions, falling back to the
    /// directions claimed at extraction time when the audit cannot run
    async fn direction_pairs(
        &self,
        prompts: &PromptBuilder<'_>,
        boundaries: &[ClaimBoundary],
        index: &EvidenceIndex,
    ) -> (Vec<(EvidenceId, Direction)>, Vec<DebateWarning>, bool) {
        let prompt = prompts.direction();
        match self
            .call_with_retry(&prompt, self.config.base_temperature, |r| {
                parse_directions(r, index)
            })
            .await
        {
            Ok((pairs, unknown)) => {
                let mut warnings = Vec::new();
                if !unknown.is_empty() {
                    warnings.push(DebateWarning::GroundingMismatch { stripped: unknown });
                }
                (pairs, warnings, false)
            }
            Err(StepError::Budget) => (
                claimed_pairs(boundaries),
                vec![DebateWarning::DirectionCheckSkipped {
                    reason: "model call budget exhausted".to_string(),
                }],
                true,
            ),
            Err(StepError::Model(failure)) => (
                claimed_pairs(boundaries),
                vec![DebateWarning::DirectionCheckSkipped {
                    reason: failure.to_string(),
                }],
                false,
            ),
        }
    }

    /// One model call: budget charge, blocking-pool dispatch, deadline
    async fn call_model(&self, prompt: String, temperature: f64) -> Result<String, StepError> {
        if !self.budget.try_charge() {
            return Err(StepError::Budget);
        }

        let sampling = if self.config.reproducible {
            SamplingOptions::pinned(self.config.reproducibility_seed)
        } else {
            SamplingOptions::at_temperature(temperature)
        };

        let model = Arc::clone(&self.model);
        let handle = tokio::task::spawn_blocking(move || {
            model
                .complete(&prompt, &sampling)
                .map_err(|e| e.to_string())
        });

        match tokio::time::timeout(self.config.step_timeout(), handle).await {
            Err(_) => Err(StepError::Model(ModelFailure::Timeout)),
            Ok(Err(join_err)) => {
                warn!(error = %join_err, "model task failed");
                Err(StepError::Model(ModelFailure::Timeout))
            }
            Ok(Ok(Err(provider_err))) => {
                // Transport-level failures count as timeouts in the closed
                // failure set.
                warn!(error = %provider_err, "model call failed");
                Err(StepError::Model(ModelFailure::Timeout))
            }
            Ok(Ok(Ok(text))) => Ok(text),
        }
    }

    /// Retry loop around one protocol state: backoff doubles per attempt
    /// and the temperature creeps up to shake a stuck model
    async fn call_with_retry<T, F>(
        &self,
        prompt: &str,
        base_temperature: f64,
        parse: F,
    ) -> Result<T, StepError>
    where
        F: Fn(&str) -> Result<T, ModelFailure>,
    {
        let mut last = ModelFailure::Timeout;
        for attempt in 0..self.config.max_attempts {
            let temperature =
                base_temperature + attempt as f64 * self.config.retry_temperature_increment;
            match self.call_model(prompt.to_string(), temperature).await {
                Ok(response) => match parse(&response) {
                    Ok(value) => return Ok(value),
                    Err(failure) => {
                        debug!(attempt = attempt + 1, failure = %failure, "response rejected");
                        last = failure;
                    }
                },
                Err(StepError::Budget) => return Err(StepError::Budget),
                Err(StepError::Model(failure)) => {
                    debug!(attempt = attempt + 1, failure = %failure, "model call failed");
                    last = failure;
                }
            }
            if attempt + 1 < self.config.max_attempts {
                let backoff = self.config.backoff_base_ms.saturating_mul(1 << attempt);
                tokio::time::sleep(Duration::from_millis(backoff)).await;
            }
        }
        Err(StepError::Model(last))
    }
}

/// Carry the advocate verdict forward when no challenge survived
fn carry_over(advocate: &AdvocateVerdict) -> ReconciledVerdict {
    ReconciledVerdict {
        truth_percentage: advocate.truth_percentage,
        confidence: advocate.confidence,
        reasoning: advocate.reasoning.clone(),
        responses: Vec::new(),
        unaddressed_objections: 0,
    }
}

/// Carry the advocate verdict forward with every objection left standing
fn unreconciled(advocate: &AdvocateVerdict, points: usize) -> ReconciledVerdict {
    ReconciledVerdict {
        truth_percentage: advocate.truth_percentage,
        confidence: advocate.confidence,
        reasoning: advocate.reasoning.clone(),
        responses: Vec::new(),
        unaddressed_objections: points,
    }
}

/// Neutral advocate verdict built from claimed directions alone
fn degraded_advocate(boundaries: &[ClaimBoundary]) -> AdvocateVerdict {
    let mut supporting = Vec::new();
    let mut opposing = Vec::new();
    let mut findings = Vec::new();

    for boundary in boundaries {
        let mut supports = 0usize;
        let mut contradicts = 0usize;
        for item in &boundary.evidence {
            match item.claimed_direction {
                Direction::Supports => {
                    supports += 1;
                    supporting.push(item.id);
                }
                Direction::Contradicts => {
                    contradicts += 1;
                    opposing.push(item.id);
                }
                Direction::Neutral => {}
            }
        }
        let dominant = if supports > contradicts {
            DominantDirection::Supports
        } else if contradicts > supports {
            DominantDirection::Contradicts
        } else {
            DominantDirection::Mixed
        };
        findings.push(BoundaryFinding {
            boundary_id: boundary.id,
            truth_percentage: NEUTRAL_TRUTH,
            confidence: DEGRADED_CONFIDENCE,
            dominant_direction: dominant,
            evidence_count: boundary.evidence.len(),
        });
    }

    AdvocateVerdict {
        truth_percentage: NEUTRAL_TRUTH,
        confidence: DEGRADED_CONFIDENCE,
        reasoning: "degraded: model output unavailable".to_string(),
        boundary_findings: findings,
        supporting_evidence: supporting,
        opposing_evidence: opposing,
    }
}

/// Directions claimed at extraction time, used when the audit cannot run
fn claimed_pairs(boundaries: &[ClaimBoundary]) -> Vec<(EvidenceId, Direction)> {
    boundaries
        .iter()
        .flat_map(|b| b.evidence.iter().map(|e| (e.id, e.claimed_direction)))
        .collect()
}
