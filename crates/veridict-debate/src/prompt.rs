//! LLM prompt engineering for the debate protocol
//!
//! Every prompt opens with a `ROLE:` marker so scripted test providers can
//! key responses per state, and closes with the JSON shape the parser
//! enforces.

use veridict_domain::{AtomicClaim, ClaimBoundary};

use crate::types::{AdvocateVerdict, Challenge};

/// Builds the per-state prompts for one claim
pub struct PromptBuilder<'a> {
    claim: &'a AtomicClaim,
    boundaries: &'a [ClaimBoundary],
}

impl<'a> PromptBuilder<'a> {
    /// Create a prompt builder for one claim and its evidence
    pub fn new(claim: &'a AtomicClaim, boundaries: &'a [ClaimBoundary]) -> Self {
        Self { claim, boundaries }
    }

    /// Build the advocate prompt (also reused verbatim for resampling)
    pub fn advocate(&self) -> String {
        let mut prompt = String::new();
        prompt.push_str("ROLE: ADVOCATE\n\n");
        prompt.push_str(ADVOCATE_INSTRUCTIONS);
        prompt.push_str("\n\n");
        self.push_claim(&mut prompt);
        self.push_evidence(&mut prompt);
        prompt.push_str(ADVOCATE_FORMAT);
        prompt
    }

    /// Build the challenge prompt against an advocate verdict
    pub fn challenge(&self, advocate: &AdvocateVerdict) -> String {
        let mut prompt = String::new();
        prompt.push_str("ROLE: CHALLENGER\n\n");
        prompt.push_str(CHALLENGE_INSTRUCTIONS);
        prompt.push_str("\n\n");
        self.push_claim(&mut prompt);
        self.push_evidence(&mut prompt);
        prompt.push_str(&format!(
            "Verdict under challenge:\ntruth_percentage: {:.1}\nconfidence: {:.1}\nreasoning: {}\n\n",
            advocate.truth_percentage, advocate.confidence, advocate.reasoning
        ));
        prompt.push_str(CHALLENGE_FORMAT);
        prompt
    }

    /// Build the reconcile prompt weighing a surviving challenge
    pub fn reconcile(&self, advocate: &AdvocateVerdict, challenge: &Challenge) -> String {
        let mut prompt = String::new();
        prompt.push_str("ROLE: RECONCILER\n\n");
        prompt.push_str(RECONCILE_INSTRUCTIONS);
        prompt.push_str("\n\n");
        self.push_claim(&mut prompt);
        self.push_evidence(&mut prompt);
        prompt.push_str(&format!(
            "Advocate verdict:\ntruth_percentage: {:.1}\nconfidence: {:.1}\nreasoning: {}\n\n",
            advocate.truth_percentage, advocate.confidence, advocate.reasoning
        ));
        prompt.push_str("Challenge points:\n");
        for (i, point) in challenge.points.iter().enumerate() {
            let cited: Vec<String> = point
                .cited_evidence
                .iter()
                .map(|id| id.to_string())
                .collect();
            prompt.push_str(&format!(
                "{}. {} [cites: {}]\n",
                i + 1,
                point.objection,
                cited.join(", ")
            ));
        }
        prompt.push('\n');
        prompt.push_str(RECONCILE_FORMAT);
        prompt
    }

    /// Build the direction-audit prompt for the validation state
    pub fn direction(&self) -> String {
        let mut prompt = String::new();
        prompt.push_str("ROLE: DIRECTION AUDITOR\n\n");
        prompt.push_str(DIRECTION_INSTRUCTIONS);
        prompt.push_str("\n\n");
        self.push_claim(&mut prompt);
        self.push_evidence(&mut prompt);
        prompt.push_str(DIRECTION_FORMAT);
        prompt
    }

    fn push_claim(&self, prompt: &mut String) {
        prompt.push_str(&format!("Claim: {}\n", self.claim.statement));
        prompt.push_str(&format!("Claim id: {}\n\n", self.claim.id));
    }

    fn push_evidence(&self, prompt: &mut String) {
        prompt.push_str("Evidence by boundary:\n");
        for boundary in self.boundaries {
            prompt.push_str(&format!(
                "Boundary {} ({}): {}\n",
                boundary.id, boundary.name, boundary.methodology
            ));
            for item in &boundary.evidence {
                prompt.push_str(&format!(
                    "  [{}] ({}, claimed: {}) {}\n",
                    item.id,
                    item.source.domain,
                    item.claimed_direction.as_str(),
                    item.statement
                ));
            }
        }
        prompt.push('\n');
    }
}

const ADVOCATE_INSTRUCTIONS: &str = r#"Judge the truth of the claim from the evidence below and nothing else.
Weigh each boundary of evidence on its own, then give an overall verdict.
Cite evidence by the bracketed id exactly as printed. An evidence id may
appear as supporting or opposing, never both."#;

const ADVOCATE_FORMAT: &str = r#"Output format (JSON only, no additional text):
{
  "truth_percentage": 0-100,
  "confidence": 0-100,
  "reasoning": "short narrative",
  "boundary_findings": [
    {
      "boundary_id": "uuid",
      "truth_percentage": 0-100,
      "confidence": 0-100,
      "dominant_direction": "supports|contradicts|mixed",
      "evidence_count": 0
    }
  ],
  "supporting_evidence": ["uuid"],
  "opposing_evidence": ["uuid"]
}"#;

const CHALLENGE_INSTRUCTIONS: &str = r#"Argue against the verdict below as strongly as the evidence allows.
Every objection must cite evidence ids, or argue from a specific absence
of evidence. Objections citing nothing carry no standing."#;

const CHALLENGE_FORMAT: &str = r#"Output format (JSON only, no additional text):
{
  "points": [
    {"objection": "text", "cited_evidence": ["uuid"]}
  ],
  "addresses_support": true,
  "addresses_absence": false
}"#;

const RECONCILE_INSTRUCTIONS: &str = r#"Weigh the challenge against the advocate verdict. Answer each challenge
point, conceding where the objection holds and rebutting where it does
not, then restate the verdict."#;

const RECONCILE_FORMAT: &str = r#"Output format (JSON only, no additional text):
{
  "truth_percentage": 0-100,
  "confidence": 0-100,
  "reasoning": "short narrative",
  "responses": ["answer to point 1", "answer to point 2"]
}"#;

const DIRECTION_INSTRUCTIONS: &str = r#"For each evidence item, state whether it supports, contradicts, or is
neutral toward the claim. Judge from the statement text, not the claimed
direction printed beside it."#;

const DIRECTION_FORMAT: &str = r#"Output format (JSON only, no additional text):
{
  "directions": [
    {"evidence_id": "uuid", "direction": "supports|contradicts|neutral"}
  ]
}"#;
