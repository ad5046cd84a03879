//! Full outer join of the three reduced sources on patient id.

use std::collections::BTreeMap;

use rehabrisk_common::entities::{ActionRiskSummary, GaitSummary, LatestFunctioning, MergedFeatures};
use tracing::debug;

/// Join functioning ⋈ gait ⋈ sensor (outer each time).
///
/// Every patient id present in any source appears exactly once, ordered by
/// id; fields from sources that lack the patient stay `None`.
pub fn merge_sources(
    functioning: &[LatestFunctioning],
    gait: &[GaitSummary],
    sensor: &[ActionRiskSummary],
) -> Vec<MergedFeatures> {
    let mut merged: BTreeMap<String, MergedFeatures> = BTreeMap::new();

    for f in functioning {
        let r = row(&mut merged, &f.patient_id);
        r.rehab_phase = f.rehab_phase.clone();
        r.icf_total = f.icf_total;
    }
    for g in gait {
        row(&mut merged, &g.patient_id).gait_abnormal_prob = g.gait_abnormal_prob;
    }
    for s in sensor {
        row(&mut merged, &s.patient_id).action_risk_score = s.action_risk_score;
    }

    debug!(
        n_functioning = functioning.len(),
        n_gait = gait.len(),
        n_sensor = sensor.len(),
        n_merged = merged.len(),
        "Merged sources"
    );
    merged.into_values().collect()
}

fn row<'a>(merged: &'a mut BTreeMap<String, MergedFeatures>, patient_id: &str) -> &'a mut MergedFeatures {
    merged
        .entry(patient_id.to_string())
        .or_insert_with(|| MergedFeatures {
            patient_id: patient_id.to_string(),
            ..Default::default()
        })
}
