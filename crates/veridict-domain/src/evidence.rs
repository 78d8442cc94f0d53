//! Evidence items and analytical boundaries
//!
//! An evidence item is a sourced statement bearing on one claim, tagged with
//! a claimed directional stance and the source-reliability result resolved by
//! the external scoring service. A boundary is a named cluster of evidence
//! sharing a common methodology/scope; a claim may have several boundaries,
//! and cross-boundary agreement is what the triangulation scorer measures.

use crate::id::{BoundaryId, EvidenceId};
use serde::{Deserialize, Serialize};

/// Directional stance of evidence (or a verdict) relative to a claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Evidence supports the claim being true
    Supports,
    /// Evidence contradicts the claim
    Contradicts,
    /// Evidence bears on the claim without leaning either way
    Neutral,
}

impl Direction {
    /// Get the direction name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Supports => "supports",
            Direction::Contradicts => "contradicts",
            Direction::Neutral => "neutral",
        }
    }

    /// Parse a direction from a string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "supports" | "support" => Some(Direction::Supports),
            "contradicts" | "contradict" => Some(Direction::Contradicts),
            "neutral" => Some(Direction::Neutral),
            _ => None,
        }
    }
}

impl std::str::FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid direction: {}", s))
    }
}

/// Dominant direction of an evidence cluster after within-boundary weighting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DominantDirection {
    /// The cluster leans toward supporting the claim
    Supports,
    /// The cluster leans toward contradicting the claim
    Contradicts,
    /// No direction dominates
    Mixed,
}

impl DominantDirection {
    /// Get the name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            DominantDirection::Supports => "supports",
            DominantDirection::Contradicts => "contradicts",
            DominantDirection::Mixed => "mixed",
        }
    }
}

/// Probative value tier assigned during extraction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProbativeValue {
    /// Directly bears on the claim
    High,
    /// Bears on the claim with caveats
    Moderate,
    /// Circumstantial
    Low,
}

/// Source-reliability result from the external scoring service
///
/// Treated as an opaque lookup keyed by source domain; the pipeline never
/// recomputes it, only reads it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SourceReliability {
    /// The service resolved a score for this source
    Scored {
        /// Reliability score in [0.0, 1.0]
        score: f64,
        /// The service's confidence in its own score, [0.0, 1.0]
        confidence: f64,
        /// Whether the service's LLM consensus converged
        consensus_achieved: bool,
    },
    /// The source was not known to the service
    Unknown,
}

impl SourceReliability {
    /// Neutral prior used when the scoring service had no answer
    pub const UNKNOWN_SCORE: f64 = 0.5;

    /// The reliability score, falling back to the neutral prior
    pub fn score_or_default(&self) -> f64 {
        match self {
            SourceReliability::Scored { score, .. } => *score,
            SourceReliability::Unknown => Self::UNKNOWN_SCORE,
        }
    }
}

/// Reference to the document an evidence item was extracted from
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceRef {
    /// Source domain (reliability-scoring key, e.g. "example.org")
    pub domain: String,
    /// Document title or URL path distinguishing documents within a domain
    pub title: String,
}

impl SourceRef {
    /// Key identifying the underlying document, used for deduplication so
    /// that multiple extracts from one document count once
    pub fn document_key(&self) -> String {
        format!("{}::{}", self.domain, self.title)
    }
}

/// A sourced statement bearing on a claim
///
/// Immutable once extracted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvidenceItem {
    /// Unique identifier
    pub id: EvidenceId,

    /// The evidence statement text
    pub statement: String,

    /// Where the statement came from
    pub source: SourceRef,

    /// Direction claimed at extraction time (revalidated by the Direction
    /// Validator)
    pub claimed_direction: Direction,

    /// Externally resolved source-reliability result
    pub reliability: SourceReliability,

    /// Probative value tier
    pub probative_value: ProbativeValue,
}

/// A named cluster of evidence sharing one analytical frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimBoundary {
    /// Unique identifier
    pub id: BoundaryId,

    /// Human-readable boundary name (e.g. "peer-reviewed trials")
    pub name: String,

    /// Shared methodology/scope note
    pub methodology: String,

    /// Evidence items within this boundary
    pub evidence: Vec<EvidenceItem>,
}

impl ClaimBoundary {
    /// Number of evidence items in the boundary
    pub fn evidence_count(&self) -> usize {
        self.evidence.len()
    }
}
