//! Veridict gates
//!
//! Deterministic filters at both ends of the debate: the Admissibility Gate
//! decides which claims are worth the expensive debate at all, and the
//! Confidence-Tier Gate classifies finished verdicts for publication.
//!
//! Neither gate calls the model; both are pure over their inputs.

#![warn(missing_docs)]

pub mod admissibility;
pub mod config;
pub mod tier_gate;

pub use admissibility::{Admissibility, AdmissibilityGate};
pub use config::TierConfig;
pub use tier_gate::{ConfidenceTierGate, EvidenceProfile};
