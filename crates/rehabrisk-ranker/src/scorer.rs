//! Composite risk score computation.
//!
//! risk = w_gait × gait_abnormal_prob
//!      + w_action × action_risk_score
//!      + w_func × (1 − icf_norm)
//!
//! Lower functioning contributes more risk, hence the inversion.

use rehabrisk_common::entities::MergedFeatures;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::normalise::{cohort_minmax, median};
use crate::policy::FusionPolicy;
use crate::weights::WeightVector;

/// A merged row after defaulting, normalisation and scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredPatient {
    pub patient_id: String,
    pub rehab_phase: Option<String>,
    /// Raw functioning total after cohort-median defaulting.
    /// Still `None` when the whole cohort lacks a total.
    pub icf_total: Option<f64>,
    pub gait_abnormal_prob: f64,
    pub action_risk_score: f64,
    /// Cohort min-max normalised functioning, in [0, 1].
    pub icf_norm: f64,
    pub risk_score: f64,
}

/// Weighted sum of the three (already defaulted) signals.
pub fn compute_risk_score(
    gait_abnormal_prob: f64,
    action_risk_score: f64,
    icf_norm: f64,
    weights: &WeightVector,
) -> f64 {
    let components = [gait_abnormal_prob, action_risk_score, 1.0 - icf_norm];
    components
        .iter()
        .zip(weights.as_array().iter())
        .map(|(n, w)| n * w)
        .sum()
}

/// Default missing signals, normalise functioning over the cohort and score
/// every row.
///
/// Missing gait probability and action risk take `policy.neutral_value`;
/// a missing functioning total takes the cohort median.
pub fn score_cohort(merged: &[MergedFeatures], policy: &FusionPolicy) -> Vec<ScoredPatient> {
    let raw_totals: Vec<Option<f64>> = merged.iter().map(|m| m.icf_total).collect();
    let cohort_median = median(&raw_totals);
    let totals: Vec<Option<f64>> = raw_totals.iter().map(|t| t.or(cohort_median)).collect();
    let icf_norm = cohort_minmax(&totals, policy.neutral_value);

    debug!(
        n_patients = merged.len(),
        n_missing_icf = raw_totals.iter().filter(|t| t.is_none()).count(),
        cohort_median = ?cohort_median,
        "Normalised functioning totals"
    );

    merged
        .iter()
        .zip(totals)
        .zip(icf_norm)
        .map(|((m, icf_total), icf_norm)| {
            let gait_abnormal_prob = m.gait_abnormal_prob.unwrap_or(policy.neutral_value);
            let action_risk_score = m.action_risk_score.unwrap_or(policy.neutral_value);
            let risk_score =
                compute_risk_score(gait_abnormal_prob, action_risk_score, icf_norm, &policy.weights);
            ScoredPatient {
                patient_id: m.patient_id.clone(),
                rehab_phase: m.rehab_phase.clone(),
                icf_total,
                gait_abnormal_prob,
                action_risk_score,
                icf_norm,
                risk_score,
            }
        })
        .collect()
}
