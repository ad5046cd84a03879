//! Gait abnormality loader: mean probability per patient.

use rehabrisk_common::entities::GaitSummary;

use super::{keyed_rows, mean_by_patient, AssessmentSource};
use crate::schema::{FieldKind, FieldSpec, TableSchema};
use crate::table::{self, RawTable};

pub struct GaitSource;

impl AssessmentSource for GaitSource {
    type Record = GaitSummary;

    const SCHEMA: TableSchema = TableSchema {
        source_name: "Gait",
        fields: &[
            FieldSpec::new("patient_id", FieldKind::Identifier),
            FieldSpec::new("gait_abnormal_prob", FieldKind::Numeric),
        ],
    };

    fn reduce(table: &RawTable, columns: &[usize]) -> Vec<GaitSummary> {
        let (id_col, prob_col) = (columns[0], columns[1]);

        let values = keyed_rows(table, id_col, Self::SCHEMA.source_name)
            .into_iter()
            .map(|(id, row)| (id, table::numeric(row, prob_col)));

        mean_by_patient(values)
            .into_iter()
            .map(|(patient_id, gait_abnormal_prob)| GaitSummary { patient_id, gait_abnormal_prob })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_probability_per_patient() {
        let csv = "visit,patient_id,gait_abnormal_prob\n1,P1,0.2\n2,P1,0.8\n1,P2,0.9\n";
        let out = GaitSource::load_reader(csv.as_bytes()).unwrap();
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].patient_id, "P1");
        assert!((out[0].gait_abnormal_prob.unwrap() - 0.5).abs() < 1e-12);
        assert_eq!(out[1].gait_abnormal_prob, Some(0.9));
    }

    #[test]
    fn test_non_numeric_probability_keeps_patient() {
        let csv = "patient_id,gait_abnormal_prob\nP1,pending\n";
        let out = GaitSource::load_reader(csv.as_bytes()).unwrap();
        assert_eq!(out, vec![GaitSummary { patient_id: "P1".to_string(), gait_abnormal_prob: None }]);
    }
}
