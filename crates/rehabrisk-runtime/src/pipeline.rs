//! End-to-end fusion pipeline.
//!
//! Orchestrates one run, strictly in order:
//!   1. Load and reduce the functioning, gait and sensor sources
//!   2. Outer-join them on patient id
//!   3. Default missing signals and normalise functioning over the cohort
//!   4. Compute the composite risk score
//!   5. Classify against the phase-aware threshold
//!   6. Persist the decision table
//!
//! Every run recomputes from scratch. A validation failure in any source
//! aborts before the output file is touched.

use std::time::Instant;

use rehabrisk_common::entities::{ActionRiskSummary, GaitSummary, LatestFunctioning};
use rehabrisk_common::{FusionConfig, Result, RiskDecision, TierCounts};
use rehabrisk_ingestion::{AssessmentSource, FunctioningSource, GaitSource, SensorSource};
use rehabrisk_ranker::{decide_cohort, merge_sources, score_cohort, FusionPolicy};
use tracing::{info, instrument};

use crate::output::write_decisions;

/// Fuse the three reduced sources into one decision per patient.
///
/// Returns an empty table when all three inputs are empty.
pub fn fuse_and_decide(
    functioning: &[LatestFunctioning],
    gait: &[GaitSummary],
    sensor: &[ActionRiskSummary],
    policy: &FusionPolicy,
) -> Vec<RiskDecision> {
    if functioning.is_empty() && gait.is_empty() && sensor.is_empty() {
        info!("All sources empty; nothing to fuse");
        return vec![];
    }

    let merged = merge_sources(functioning, gait, sensor);
    let scored = score_cohort(&merged, policy);
    decide_cohort(scored, &policy.threshold)
}

/// Run the full pipeline with the default policy.
pub fn run_fusion_pipeline(config: &FusionConfig) -> Result<Vec<RiskDecision>> {
    run_fusion_pipeline_with_policy(config, &FusionPolicy::default())
}

/// Run the full pipeline, write the output table and return it.
#[instrument(skip(policy), fields(output = %config.output_path.display()))]
pub fn run_fusion_pipeline_with_policy(
    config: &FusionConfig,
    policy: &FusionPolicy,
) -> Result<Vec<RiskDecision>> {
    let t0 = Instant::now();
    policy.validate()?;

    let functioning = FunctioningSource::load_path(&config.icf_path)?;
    let gait = GaitSource::load_path(&config.gait_path)?;
    let sensor = SensorSource::load_path(&config.sensor_path)?;

    let decisions = fuse_and_decide(&functioning, &gait, &sensor, policy);
    write_decisions(&config.output_path, &decisions)?;

    let counts = TierCounts::from_decisions(&decisions);
    info!(
        n_patients = decisions.len(),
        high = counts.high,
        medium = counts.medium,
        low = counts.low,
        duration_ms = t0.elapsed().as_millis() as u64,
        "Fusion run complete"
    );
    Ok(decisions)
}
