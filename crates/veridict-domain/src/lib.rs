//! Veridict domain model
//!
//! Core types for the claim-verification pipeline: atomic claims, evidence
//! grouped by analytical boundary, verdicts with calibrated confidence, and
//! the trait boundary to the generative model capability.
//!
//! This crate is infrastructure-free by design: everything downstream
//! (providers, gates, the debate engine, aggregation) depends on it, and it
//! depends on nothing but identifiers and serialization.

#![warn(missing_docs)]

pub mod assessment;
pub mod claim;
pub mod evidence;
pub mod id;
pub mod tier;
pub mod traits;
pub mod verdict;

pub use assessment::OverallAssessment;
pub use claim::{AtomicClaim, CentralityTier, ClaimCategory, HarmTier};
pub use evidence::{
    ClaimBoundary, Direction, DominantDirection, EvidenceItem, ProbativeValue, SourceRef,
    SourceReliability,
};
pub use id::{BoundaryId, ClaimId, EvidenceId};
pub use tier::ConfidenceTier;
pub use verdict::{
    clamp_pct, implied_direction, BoundaryFinding, ClaimVerdict, ConsistencySpread,
    ContestationMeta, DirectionAudit, TriangulationClass, TriangulationFactor, VerdictBand,
};
