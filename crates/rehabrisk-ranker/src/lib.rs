//! rehabrisk-ranker — Fusion scoring and risk classification.
//!
//! merge → default + normalise → composite score → phase-aware threshold → tier

pub mod merge;
pub mod normalise;
pub mod weights;
pub mod scorer;
pub mod decision;
pub mod policy;

pub use decision::{classify, decide_cohort, dynamic_threshold, ThresholdPolicy};
pub use merge::merge_sources;
pub use policy::FusionPolicy;
pub use scorer::{score_cohort, ScoredPatient};
pub use weights::WeightVector;
