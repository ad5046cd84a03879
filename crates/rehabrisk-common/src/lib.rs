//! rehabrisk-common — Shared entities, errors, and configuration used across all rehabrisk crates.

pub mod error;
pub mod entities;
pub mod fusion_config;

// Re-export commonly used types
pub use error::{RehabRiskError, Result};
pub use entities::{RehabPhase, RiskDecision, RiskTier, TierCounts};
pub use fusion_config::FusionConfig;
