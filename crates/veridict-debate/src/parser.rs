//! Response validation boundary
//!
//! Raw model text enters here and typed state outputs leave. Parsing is
//! lenient at the entry level (markdown fences stripped, surrounding prose
//! ignored, malformed entries skipped) and strict at the value level
//! (percentages clamped, citations resolved against the claim's actual
//! evidence, duplicates collapsed). Anything that cannot be salvaged into
//! the required shape is a `SchemaMismatch`.

use std::collections::HashMap;

use serde::Deserialize;
use veridict_domain::traits::ModelFailure;
use veridict_domain::{
    clamp_pct, BoundaryFinding, BoundaryId, ClaimBoundary, Direction, DominantDirection,
    EvidenceId,
};

use crate::types::{AdvocateVerdict, Challenge, ChallengePoint, ReconciledVerdict};

/// Lookup from id strings (as printed into prompts) to real identifiers
///
/// Citations that do not resolve here are stripped and reported, never
/// carried forward.
pub struct EvidenceIndex {
    evidence: HashMap<String, EvidenceId>,
    boundaries: HashMap<String, BoundaryId>,
}

impl EvidenceIndex {
    /// Build the index from a claim's boundaries
    pub fn from_boundaries(boundaries: &[ClaimBoundary]) -> Self {
        let mut evidence = HashMap::new();
        let mut boundary_ids = HashMap::new();
        for boundary in boundaries {
            boundary_ids.insert(boundary.id.to_string(), boundary.id);
            for item in &boundary.evidence {
                evidence.insert(item.id.to_string(), item.id);
            }
        }
        Self {
            evidence,
            boundaries: boundary_ids,
        }
    }

    /// Resolve a cited evidence id string
    pub fn resolve_evidence(&self, raw: &str) -> Option<EvidenceId> {
        self.evidence.get(raw.trim()).copied()
    }

    /// Resolve a cited boundary id string
    pub fn resolve_boundary(&self, raw: &str) -> Option<BoundaryId> {
        self.boundaries.get(raw.trim()).copied()
    }
}

/// Extract the JSON payload from a raw response
///
/// Handles markdown code fences and surrounding prose; falls back to the
/// outermost brace pair.
pub fn extract_json(response: &str) -> Option<&str> {
    let trimmed = response.trim();

    if let Some(fence_start) = trimmed.find("```") {
        let after = &trimmed[fence_start + 3..];
        let after = after.strip_prefix("json").unwrap_or(after);
        if let Some(fence_end) = after.find("```") {
            let inner = after[..fence_end].trim();
            if !inner.is_empty() {
                return Some(inner);
            }
        }
    }

    let start = trimmed.find('{')?;
    let end = trimmed.rfind('}')?;
    if end > start {
        Some(&trimmed[start..=end])
    } else {
        None
    }
}

/// Detect a refusal in a raw response
///
/// Returns the refusal text when the model declined instead of answering.
pub fn detect_refusal(response: &str) -> Option<String> {
    let lower = response.to_lowercase();
    const MARKERS: [&str; 4] = ["i cannot", "i can't", "i won't", "as an ai"];
    if response.contains('{') {
        return None;
    }
    if MARKERS.iter().any(|m| lower.contains(m)) {
        Some(response.trim().chars().take(200).collect())
    } else {
        None
    }
}

fn payload(response: &str) -> Result<&str, ModelFailure> {
    if let Some(refusal) = detect_refusal(response) {
        return Err(ModelFailure::Refusal { detail: refusal });
    }
    extract_json(response).ok_or_else(|| ModelFailure::SchemaMismatch {
        detail: "no JSON object in response".to_string(),
    })
}

fn schema_err(e: serde_json::Error) -> ModelFailure {
    ModelFailure::SchemaMismatch {
        detail: e.to_string(),
    }
}

#[derive(Deserialize)]
struct WireBoundaryFinding {
    boundary_id: String,
    truth_percentage: f64,
    confidence: f64,
    dominant_direction: String,
    #[serde(default)]
    evidence_count: usize,
}

#[derive(Deserialize)]
struct WireAdvocate {
    truth_percentage: f64,
    confidence: f64,
    #[serde(default)]
    reasoning: String,
    #[serde(default)]
    boundary_findings: Vec<WireBoundaryFinding>,
    #[serde(default)]
    supporting_evidence: Vec<String>,
    #[serde(default)]
    opposing_evidence: Vec<String>,
}

fn parse_dominant(raw: &str) -> Option<DominantDirection> {
    match raw.to_lowercase().as_str() {
        "supports" | "support" => Some(DominantDirection::Supports),
        "contradicts" | "contradict" => Some(DominantDirection::Contradicts),
        "mixed" | "neutral" => Some(DominantDirection::Mixed),
        _ => None,
    }
}

fn resolve_citations(
    raw_ids: &[String],
    index: &EvidenceIndex,
    seen: &mut Vec<EvidenceId>,
    unknown: &mut Vec<String>,
) -> Vec<EvidenceId> {
    let mut resolved = Vec::new();
    for raw in raw_ids {
        match index.resolve_evidence(raw) {
            Some(id) => {
                if !seen.contains(&id) {
                    seen.push(id);
                    resolved.push(id);
                }
            }
            None => unknown.push(raw.clone()),
        }
    }
    resolved
}

/// Parse an advocate (or resample) response
///
/// Returns the verdict plus any citations that did not resolve. An evidence
/// id cited on both sides keeps its first appearance only, so the
/// supporting/opposing sets stay disjoint.
pub fn parse_advocate(
    response: &str,
    index: &EvidenceIndex,
) -> Result<(AdvocateVerdict, Vec<String>), ModelFailure> {
    let wire: WireAdvocate = serde_json::from_str(payload(response)?).map_err(schema_err)?;

    let mut unknown = Vec::new();
    let mut seen = Vec::new();
    let supporting = resolve_citations(&wire.supporting_evidence, index, &mut seen, &mut unknown);
    let opposing = resolve_citations(&wire.opposing_evidence, index, &mut seen, &mut unknown);

    let mut findings = Vec::new();
    for wf in wire.boundary_findings {
        let Some(boundary_id) = index.resolve_boundary(&wf.boundary_id) else {
            unknown.push(wf.boundary_id);
            continue;
        };
        let Some(dominant) = parse_dominant(&wf.dominant_direction) else {
            continue;
        };
        findings.push(BoundaryFinding {
            boundary_id,
            truth_percentage: clamp_pct(wf.truth_percentage),
            confidence: clamp_pct(wf.confidence),
            dominant_direction: dominant,
            evidence_count: wf.evidence_count,
        });
    }

    Ok((
        AdvocateVerdict {
            truth_percentage: clamp_pct(wire.truth_percentage),
            confidence: clamp_pct(wire.confidence),
            reasoning: wire.reasoning,
            boundary_findings: findings,
            supporting_evidence: supporting,
            opposing_evidence: opposing,
        },
        unknown,
    ))
}

#[derive(Deserialize)]
struct WireChallengePoint {
    objection: String,
    #[serde(default)]
    cited_evidence: Vec<String>,
}

#[derive(Deserialize)]
struct WireChallenge {
    #[serde(default)]
    points: Vec<WireChallengePoint>,
    #[serde(default)]
    addresses_support: bool,
    #[serde(default)]
    addresses_absence: bool,
}

/// Parse a challenge response
///
/// Unresolvable citations are stripped per point and reported; a point whose
/// citations all strip becomes ungrounded but is kept (baselessness is
/// judged over the whole challenge).
pub fn parse_challenge(
    response: &str,
    index: &EvidenceIndex,
) -> Result<(Challenge, Vec<String>), ModelFailure> {
    let wire: WireChallenge = serde_json::from_str(payload(response)?).map_err(schema_err)?;

    let mut unknown = Vec::new();
    let points = wire
        .points
        .into_iter()
        .filter(|p| !p.objection.trim().is_empty())
        .map(|p| {
            let mut cited = Vec::new();
            for raw in &p.cited_evidence {
                match index.resolve_evidence(raw) {
                    Some(id) => {
                        if !cited.contains(&id) {
                            cited.push(id);
                        }
                    }
                    None => unknown.push(raw.clone()),
                }
            }
            ChallengePoint {
                objection: p.objection,
                cited_evidence: cited,
            }
        })
        .collect();

    Ok((
        Challenge {
            points,
            addresses_support: wire.addresses_support,
            addresses_absence: wire.addresses_absence,
        },
        unknown,
    ))
}

#[derive(Deserialize)]
struct WireReconcile {
    truth_percentage: f64,
    confidence: f64,
    #[serde(default)]
    reasoning: String,
    #[serde(default)]
    responses: Vec<String>,
}

/// Parse a reconcile response against the number of challenge points raised
pub fn parse_reconcile(
    response: &str,
    challenge_points: usize,
) -> Result<ReconciledVerdict, ModelFailure> {
    let wire: WireReconcile = serde_json::from_str(payload(response)?).map_err(schema_err)?;
    let answered = wire.responses.iter().filter(|r| !r.trim().is_empty()).count();
    Ok(ReconciledVerdict {
        truth_percentage: clamp_pct(wire.truth_percentage),
        confidence: clamp_pct(wire.confidence),
        reasoning: wire.reasoning,
        responses: wire.responses,
        unaddressed_objections: challenge_points.saturating_sub(answered),
    })
}

#[derive(Deserialize)]
struct WireDirectionEntry {
    evidence_id: String,
    direction: String,
}

#[derive(Deserialize)]
struct WireDirections {
    #[serde(default)]
    directions: Vec<WireDirectionEntry>,
}

/// Parse a direction-audit response
///
/// Returns validated (evidence, direction) pairs plus unresolvable ids.
/// Entries with an unparseable direction are skipped; duplicates keep the
/// first occurrence.
pub fn parse_directions(
    response: &str,
    index: &EvidenceIndex,
) -> Result<(Vec<(EvidenceId, Direction)>, Vec<String>), ModelFailure> {
    let wire: WireDirections = serde_json::from_str(payload(response)?).map_err(schema_err)?;

    let mut unknown = Vec::new();
    let mut pairs: Vec<(EvidenceId, Direction)> = Vec::new();
    for entry in wire.directions {
        let Some(id) = index.resolve_evidence(&entry.evidence_id) else {
            unknown.push(entry.evidence_id);
            continue;
        };
        let Some(direction) = Direction::parse(&entry.direction) else {
            continue;
        };
        if !pairs.iter().any(|(existing, _)| *existing == id) {
            pairs.push((id, direction));
        }
    }
    Ok((pairs, unknown))
}
