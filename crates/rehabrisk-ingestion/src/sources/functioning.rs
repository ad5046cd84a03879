//! Functioning (ICF) assessment loader.
//!
//! Keeps the most recent assessment per patient: rows are ordered by
//! (patient_id, time_step) ascending, missing time steps last, and the last
//! row of each patient wins.

use std::cmp::Ordering;

use rehabrisk_common::entities::LatestFunctioning;

use super::{keyed_rows, AssessmentSource};
use crate::schema::{FieldKind, FieldSpec, TableSchema};
use crate::table::{self, RawTable};

pub struct FunctioningSource;

impl AssessmentSource for FunctioningSource {
    type Record = LatestFunctioning;

    const SCHEMA: TableSchema = TableSchema {
        source_name: "ICF",
        fields: &[
            FieldSpec::new("patient_id", FieldKind::Identifier),
            FieldSpec::new("time_step", FieldKind::Numeric),
            FieldSpec::new("rehab_phase", FieldKind::Categorical),
            FieldSpec::new("icf_total", FieldKind::Numeric),
            FieldSpec::new("rom", FieldKind::Numeric),
            FieldSpec::new("vas", FieldKind::Numeric),
        ],
    };

    fn reduce(table: &RawTable, columns: &[usize]) -> Vec<LatestFunctioning> {
        let (id_col, step_col, phase_col, total_col) =
            (columns[0], columns[1], columns[2], columns[3]);

        let mut rows: Vec<_> = keyed_rows(table, id_col, Self::SCHEMA.source_name)
            .into_iter()
            .map(|(id, row)| (id, table::numeric(row, step_col), row))
            .collect();

        // Stable: rows with equal keys keep file order.
        rows.sort_by(|a, b| a.0.cmp(b.0).then_with(|| cmp_time_step(a.1, b.1)));

        let mut latest: Vec<LatestFunctioning> = Vec::new();
        for (id, _, row) in rows {
            let record = LatestFunctioning {
                patient_id: id.to_string(),
                rehab_phase: table::text(row, phase_col).map(str::to_string),
                icf_total: table::numeric(row, total_col),
            };
            match latest.last_mut() {
                Some(prev) if prev.patient_id == record.patient_id => *prev = record,
                _ => latest.push(record),
            }
        }
        latest
    }
}

/// Ascending, with missing time steps ordered after every numeric one.
fn cmp_time_step(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
