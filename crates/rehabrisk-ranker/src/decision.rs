//! Phase- and condition-aware risk classification.
//!
//! T = clamp(base(phase) + slope × (icf_norm − 0.5), floor, ceiling)
//!
//!   risk ≥ T               → high
//!   T − band ≤ risk < T    → medium
//!   risk < T − band        → low

use rehabrisk_common::{RehabPhase, RiskDecision, RiskTier};
use serde::{Deserialize, Serialize};

use crate::scorer::ScoredPatient;

/// Threshold constants. Earlier phases are flagged at a lower bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdPolicy {
    #[serde(default = "default_early")]
    pub early: f64,
    #[serde(default = "default_mid")]
    pub mid: f64,
    #[serde(default = "default_late")]
    pub late: f64,
    /// Base for a missing or unrecognised phase
    #[serde(default = "default_fallback")]
    pub fallback: f64,
    /// Shift per unit of normalised functioning away from the cohort midpoint
    #[serde(default = "default_slope")]
    pub functioning_slope: f64,
    #[serde(default = "default_floor")]
    pub floor: f64,
    #[serde(default = "default_ceiling")]
    pub ceiling: f64,
    /// Width of the medium band below the threshold
    #[serde(default = "default_medium_band")]
    pub medium_band: f64,
}

fn default_early() -> f64 { 0.55 }
fn default_mid() -> f64 { 0.60 }
fn default_late() -> f64 { 0.65 }
fn default_fallback() -> f64 { 0.60 }
fn default_slope() -> f64 { 0.10 }
fn default_floor() -> f64 { 0.30 }
fn default_ceiling() -> f64 { 0.85 }
fn default_medium_band() -> f64 { 0.10 }

impl Default for ThresholdPolicy {
    fn default() -> Self {
        Self {
            early:             default_early(),
            mid:               default_mid(),
            late:              default_late(),
            fallback:          default_fallback(),
            functioning_slope: default_slope(),
            floor:             default_floor(),
            ceiling:           default_ceiling(),
            medium_band:       default_medium_band(),
        }
    }
}

impl ThresholdPolicy {
    pub fn base(&self, phase: RehabPhase) -> f64 {
        match phase {
            RehabPhase::Early   => self.early,
            RehabPhase::Mid     => self.mid,
            RehabPhase::Late    => self.late,
            RehabPhase::Unknown => self.fallback,
        }
    }
}

/// Per-patient decision threshold, always within [floor, ceiling].
pub fn dynamic_threshold(phase: RehabPhase, icf_norm: f64, policy: &ThresholdPolicy) -> f64 {
    let threshold = policy.base(phase) + policy.functioning_slope * (icf_norm - 0.5);
    threshold.max(policy.floor).min(policy.ceiling)
}

/// Map a composite score to a tier against the patient's own threshold.
pub fn classify(
    phase: RehabPhase,
    icf_norm: f64,
    risk_score: f64,
    policy: &ThresholdPolicy,
) -> RiskTier {
    let threshold = dynamic_threshold(phase, icf_norm, policy);
    if risk_score >= threshold {
        RiskTier::High
    } else if risk_score >= threshold - policy.medium_band {
        RiskTier::Medium
    } else {
        RiskTier::Low
    }
}

/// Classify every scored row. Each decision depends only on its own row.
pub fn decide_cohort(scored: Vec<ScoredPatient>, policy: &ThresholdPolicy) -> Vec<RiskDecision> {
    scored
        .into_iter()
        .map(|s| {
            let phase = RehabPhase::from_label(s.rehab_phase.as_deref());
            RiskDecision {
                final_risk_level: classify(phase, s.icf_norm, s.risk_score, policy),
                patient_id: s.patient_id,
                rehab_phase: s.rehab_phase,
                icf_total: s.icf_total,
                gait_abnormal_prob: s.gait_abnormal_prob,
                action_risk_score: s.action_risk_score,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PHASES: [RehabPhase; 4] =
        [RehabPhase::Early, RehabPhase::Mid, RehabPhase::Late, RehabPhase::Unknown];

    #[test]
    fn test_base_threshold_per_phase() {
        let p = ThresholdPolicy::default();
        assert!((dynamic_threshold(RehabPhase::Early, 0.5, &p) - 0.55).abs() < 1e-12);
        assert!((dynamic_threshold(RehabPhase::Mid, 0.5, &p) - 0.60).abs() < 1e-12);
        assert!((dynamic_threshold(RehabPhase::Late, 0.5, &p) - 0.65).abs() < 1e-12);
        assert!((dynamic_threshold(RehabPhase::Unknown, 0.5, &p) - 0.60).abs() < 1e-12);
    }

    #[test]
    fn test_better_functioning_raises_threshold() {
        let p = ThresholdPolicy::default();
        let low = dynamic_threshold(RehabPhase::Mid, 0.0, &p);
        let high = dynamic_threshold(RehabPhase::Mid, 1.0, &p);
        assert!((low - 0.55).abs() < 1e-12);
        assert!((high - 0.65).abs() < 1e-12);
    }

    #[test]
    fn test_threshold_is_clamped() {
        let p = ThresholdPolicy::default();
        for phase in PHASES {
            for icf_norm in [-50.0, -1.0, 0.0, 0.5, 1.0, 7.0, 1e9] {
                let t = dynamic_threshold(phase, icf_norm, &p);
                assert!((0.30..=0.85).contains(&t), "threshold {t} out of band");
            }
        }
        assert_eq!(dynamic_threshold(RehabPhase::Late, 1e9, &p), 0.85);
        assert_eq!(dynamic_threshold(RehabPhase::Early, -1e9, &p), 0.30);
    }

    #[test]
    fn test_band_edges() {
        let p = ThresholdPolicy::default();
        // mid phase, neutral functioning → T = 0.60
        assert_eq!(classify(RehabPhase::Mid, 0.5, 0.60, &p), RiskTier::High);
        assert_eq!(classify(RehabPhase::Mid, 0.5, 0.59, &p), RiskTier::Medium);
        assert_eq!(classify(RehabPhase::Mid, 0.5, 0.51, &p), RiskTier::Medium);
        assert_eq!(classify(RehabPhase::Mid, 0.5, 0.41, &p), RiskTier::Low);
        assert_eq!(classify(RehabPhase::Unknown, 0.5, 0.70, &p), RiskTier::High);
    }

    #[test]
    fn test_decide_cohort_uses_row_phase() {
        let row = |id: &str, phase: Option<&str>| ScoredPatient {
            patient_id: id.to_string(),
            rehab_phase: phase.map(str::to_string),
            icf_total: Some(50.0),
            gait_abnormal_prob: 0.6,
            action_risk_score: 0.5,
            icf_norm: 0.5,
            risk_score: 0.58,
        };
        let decisions = decide_cohort(
            vec![row("A", Some("Early")), row("B", Some("mid")), row("C", Some("LATE"))],
            &ThresholdPolicy::default(),
        );
        let tiers: Vec<RiskTier> = decisions.iter().map(|d| d.final_risk_level).collect();
        assert_eq!(tiers, vec![RiskTier::High, RiskTier::Medium, RiskTier::Medium]);
        assert_eq!(decisions[0].rehab_phase.as_deref(), Some("Early"));
    }

    #[test]
    fn test_bands_are_exhaustive_and_ordered() {
        let p = ThresholdPolicy::default();
        let rank = |t: RiskTier| match t {
            RiskTier::Low => 0,
            RiskTier::Medium => 1,
            RiskTier::High => 2,
        };
        for phase in PHASES {
            let mut previous = 0;
            for step in -20..=120 {
                let score = step as f64 / 100.0;
                let tier = rank(classify(phase, 0.3, score, &p));
                assert!(tier >= previous, "tiers must be monotone in score");
                previous = tier;
            }
            assert_eq!(previous, 2);
        }
    }
}
