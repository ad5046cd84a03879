//! IMU motion-quality loader: mean action risk per patient.
//!
//! Quality is expected in [0, 1]. If any value in the table exceeds 1 the
//! whole column is treated as a 0–100 scale and divided by 100. This
//! detection is table-wide: one stray value above 1 also rescales valid
//! fractional readings. Values are then clamped to [0, 1] and turned into
//! action risk = 1 − quality.

use rehabrisk_common::entities::ActionRiskSummary;
use tracing::{debug, warn};

use super::{keyed_rows, mean_by_patient, AssessmentSource};
use crate::schema::{FieldKind, FieldSpec, TableSchema};
use crate::table::{self, RawTable};

pub struct SensorSource;

impl AssessmentSource for SensorSource {
    type Record = ActionRiskSummary;

    const SCHEMA: TableSchema = TableSchema {
        source_name: "Sensor",
        fields: &[
            FieldSpec::new("patient_id", FieldKind::Identifier),
            FieldSpec::new("action_type", FieldKind::Categorical),
            FieldSpec::new("quality_score", FieldKind::Numeric),
        ],
    };

    fn reduce(table: &RawTable, columns: &[usize]) -> Vec<ActionRiskSummary> {
        let (id_col, quality_col) = (columns[0], columns[2]);

        let rows: Vec<(&str, Option<f64>)> = keyed_rows(table, id_col, Self::SCHEMA.source_name)
            .into_iter()
            .map(|(id, row)| (id, table::numeric(row, quality_col)))
            .collect();

        let scale = quality_scale(rows.iter().map(|(_, q)| *q));

        let risks = rows
            .into_iter()
            .map(|(id, q)| (id, q.map(|v| action_risk(v / scale))));

        mean_by_patient(risks)
            .into_iter()
            .map(|(patient_id, action_risk_score)| ActionRiskSummary { patient_id, action_risk_score })
            .collect()
    }
}

/// Divisor for the quality column: 100 when the observed maximum exceeds 1.
fn quality_scale<I>(values: I) -> f64
where
    I: IntoIterator<Item = Option<f64>>,
{
    let observed: Vec<f64> = values.into_iter().flatten().collect();
    let max = observed.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if max <= 1.0 {
        return 1.0;
    }

    let n_fractional = observed.iter().filter(|&&v| (0.0..=1.0).contains(&v)).count();
    if n_fractional > 0 {
        warn!(
            max_quality = max,
            n_fractional,
            "quality_score mixes [0,1] values with values above 1; rescaling whole table by 1/100"
        );
    } else {
        debug!(max_quality = max, "quality_score on 0-100 scale; rescaling by 1/100");
    }
    100.0
}

fn action_risk(quality: f64) -> f64 {
    1.0 - quality.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "patient_id,action_type,quality_score\n";

    fn load(body: &str) -> Vec<ActionRiskSummary> {
        SensorSource::load_reader(format!("{HEADER}{body}").as_bytes()).unwrap()
    }

    #[test]
    fn test_percent_scale_is_rescaled() {
        let out = load("P1,squat,90\nP1,lunge,70\n");
        assert!((out[0].action_risk_score.unwrap() - 0.2).abs() < 1e-9);
    }

    #[test]
    fn test_fractional_scale_is_kept() {
        let out = load("P1,squat,0.9\nP1,lunge,0.7\n");
        assert!((out[0].action_risk_score.unwrap() - 0.2).abs() < 1e-9);
    }

    #[test]
    fn test_single_outlier_rescales_whole_table() {
        // 0.9 is read as 0.009 once 150 forces the percent scale.
        let out = load("P1,squat,0.9\nP2,squat,150\n");
        assert!((out[0].action_risk_score.unwrap() - 0.991).abs() < 1e-9);
        assert_eq!(out[1].action_risk_score, Some(0.0));
    }

    #[test]
    fn test_negative_quality_is_clamped() {
        let out = load("P1,walk,-0.5\n");
        assert_eq!(out[0].action_risk_score, Some(1.0));
    }

    #[test]
    fn test_all_missing_quality_stays_missing() {
        let out = load("P1,walk,\nP1,stairs,bad\n");
        assert_eq!(out[0].action_risk_score, None);
    }
}
