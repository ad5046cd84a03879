//! Core entity types flowing through the fusion pipeline.
//! Each loader reduces its source to one row per patient; the ranker joins,
//! scores and classifies those rows into `RiskDecision`s.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Per-source reduced rows
// ---------------------------------------------------------------------------

/// Most recent functioning assessment for one patient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatestFunctioning {
    pub patient_id: String,
    pub rehab_phase: Option<String>,
    pub icf_total: Option<f64>,
}

/// Mean gait abnormality probability for one patient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GaitSummary {
    pub patient_id: String,
    pub gait_abnormal_prob: Option<f64>,
}

/// Mean action risk (1 − motion quality) for one patient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionRiskSummary {
    pub patient_id: String,
    pub action_risk_score: Option<f64>,
}

// ---------------------------------------------------------------------------
// Merged features
// ---------------------------------------------------------------------------

/// One row per patient after the outer join of the three sources.
/// A patient absent from a source carries `None` for that source's fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MergedFeatures {
    pub patient_id: String,
    pub rehab_phase: Option<String>,
    pub icf_total: Option<f64>,
    pub gait_abnormal_prob: Option<f64>,
    pub action_risk_score: Option<f64>,
}

// ---------------------------------------------------------------------------
// Rehabilitation phase
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RehabPhase {
    Early,
    Mid,
    Late,
    /// Missing or unrecognised label.
    Unknown,
}

impl RehabPhase {
    /// Case-insensitive parse of a phase label.
    pub fn from_label(label: Option<&str>) -> Self {
        match label.map(|s| s.trim().to_lowercase()).as_deref() {
            Some("early") => RehabPhase::Early,
            Some("mid")   => RehabPhase::Mid,
            Some("late")  => RehabPhase::Late,
            _             => RehabPhase::Unknown,
        }
    }
}

// ---------------------------------------------------------------------------
// Risk tier / decision
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskTier {
    Low,
    Medium,
    High,
}

impl RiskTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskTier::Low    => "low",
            RiskTier::Medium => "medium",
            RiskTier::High   => "high",
        }
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RiskTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low"    => Ok(RiskTier::Low),
            "medium" => Ok(RiskTier::Medium),
            "high"   => Ok(RiskTier::High),
            other    => Err(format!("unknown risk tier: {other}")),
        }
    }
}

/// Final output row. Field order is the persisted column order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskDecision {
    pub patient_id: String,
    pub rehab_phase: Option<String>,
    pub icf_total: Option<f64>,
    pub gait_abnormal_prob: f64,
    pub action_risk_score: f64,
    pub final_risk_level: RiskTier,
}

/// Persisted column order of `RiskDecision`.
pub const OUTPUT_COLUMNS: [&str; 6] = [
    "patient_id",
    "rehab_phase",
    "icf_total",
    "gait_abnormal_prob",
    "action_risk_score",
    "final_risk_level",
];

/// Per-tier tallies of a decision table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierCounts {
    pub low: usize,
    pub medium: usize,
    pub high: usize,
}

impl TierCounts {
    pub fn from_decisions(decisions: &[RiskDecision]) -> Self {
        let mut counts = Self::default();
        for d in decisions {
            match d.final_risk_level {
                RiskTier::Low    => counts.low += 1,
                RiskTier::Medium => counts.medium += 1,
                RiskTier::High   => counts.high += 1,
            }
        }
        counts
    }

    pub fn total(&self) -> usize {
        self.low + self.medium + self.high
    }
}
