//! Assessment source loaders.
//!
//! Every loader follows the same contract:
//!   - an empty table (no data rows) loads as an empty result, unvalidated
//!   - a non-empty table is checked against the source's `TableSchema`
//!   - the table is reduced to at most one record per patient id
//!   - unparsable numbers become missing values, never errors

pub mod functioning;
pub mod gait;
pub mod sensor;

pub use functioning::FunctioningSource;
pub use gait::GaitSource;
pub use sensor::SensorSource;

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;
use rehabrisk_common::Result;
use tracing::{info, warn};

use crate::schema::TableSchema;
use crate::table::{self, RawTable};

pub trait AssessmentSource {
    /// Reduced per-patient row.
    type Record;

    const SCHEMA: TableSchema;

    /// Reduce a validated, non-empty table. `columns` holds the header
    /// position of each `SCHEMA` field, in schema order.
    fn reduce(table: &RawTable, columns: &[usize]) -> Vec<Self::Record>;

    fn load_table(table: &RawTable) -> Result<Vec<Self::Record>> {
        if table.is_empty() {
            info!(source = Self::SCHEMA.source_name, "Empty source table");
            return Ok(vec![]);
        }
        let columns = Self::SCHEMA.resolve(table)?;
        let records = Self::reduce(table, &columns);
        info!(
            source = Self::SCHEMA.source_name,
            n_rows = table.len(),
            n_patients = records.len(),
            "Loaded source"
        );
        Ok(records)
    }

    fn load_path(path: &Path) -> Result<Vec<Self::Record>> {
        let table = RawTable::from_path(path)?;
        Self::load_table(&table)
    }

    fn load_reader<R: Read>(rdr: R) -> Result<Vec<Self::Record>> {
        let table = RawTable::from_reader(rdr)?;
        Self::load_table(&table)
    }
}

/// Rows paired with their patient id. Rows with a blank id cannot be
/// grouped and are skipped.
pub(crate) fn keyed_rows<'a>(
    table: &'a RawTable,
    id_col: usize,
    source: &str,
) -> Vec<(&'a str, &'a StringRecord)> {
    let mut skipped = 0usize;
    let rows: Vec<_> = table
        .rows()
        .filter_map(|row| match table::text(row, id_col) {
            Some(id) => Some((id, row)),
            None => {
                skipped += 1;
                None
            }
        })
        .collect();

    if skipped > 0 {
        warn!(source, skipped, "Skipped rows with a blank patient_id");
    }
    rows
}

/// Arithmetic mean per patient, ignoring missing values.
/// A patient whose values are all missing maps to `None`.
pub(crate) fn mean_by_patient<'a, I>(values: I) -> BTreeMap<String, Option<f64>>
where
    I: IntoIterator<Item = (&'a str, Option<f64>)>,
{
    let mut acc: BTreeMap<String, (f64, usize)> = BTreeMap::new();
    for (patient_id, value) in values {
        let entry = acc.entry(patient_id.to_string()).or_insert((0.0, 0));
        if let Some(v) = value {
            entry.0 += v;
            entry.1 += 1;
        }
    }

    acc.into_iter()
        .map(|(id, (sum, n))| {
            let mean = if n == 0 { None } else { Some(sum / n as f64) };
            (id, mean)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_ignores_missing_values() {
        let means = mean_by_patient(vec![
            ("P1", Some(0.2)),
            ("P1", None),
            ("P1", Some(0.8)),
            ("P2", None),
        ]);
        assert!((means["P1"].unwrap() - 0.5).abs() < 1e-12);
        assert_eq!(means["P2"], None);
    }

    #[test]
    fn test_blank_ids_are_skipped() {
        let table = RawTable::from_reader("patient_id,v\nP1,1\n,2\nP2,3\n".as_bytes()).unwrap();
        let rows = keyed_rows(&table, 0, "Demo");
        let ids: Vec<&str> = rows.iter().map(|(id, _)| *id).collect();
        assert_eq!(ids, vec!["P1", "P2"]);
    }
}
