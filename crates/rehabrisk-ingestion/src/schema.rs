//! Explicit column schemas for the assessment tables.
//!
//! Each source declares the fields it requires, in order, together with the
//! semantic type the loader will coerce them to. A schema is checked once per
//! load against the table header.

use rehabrisk_common::{RehabRiskError, Result};

use crate::table::RawTable;

/// Semantic type of a required column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Opaque grouping key (patient id).
    Identifier,
    /// Coerced to `f64`; unparsable text becomes missing.
    Numeric,
    /// Free-text label kept verbatim.
    Categorical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
}

impl FieldSpec {
    pub const fn new(name: &'static str, kind: FieldKind) -> Self {
        Self { name, kind }
    }
}

/// Ordered list of required fields for one source.
#[derive(Debug, Clone, Copy)]
pub struct TableSchema {
    /// Source name used in validation errors (e.g. "ICF").
    pub source_name: &'static str,
    pub fields: &'static [FieldSpec],
}

impl TableSchema {
    /// Check that every required field is present in the table header.
    ///
    /// On success returns the header position of each field, in schema order.
    /// On failure the error lists the missing fields sorted by name.
    /// Extra columns are ignored.
    pub fn resolve(&self, table: &RawTable) -> Result<Vec<usize>> {
        let mut positions = Vec::with_capacity(self.fields.len());
        let mut missing = Vec::new();

        for field in self.fields {
            match table.column_index(field.name) {
                Some(idx) => positions.push(idx),
                None => missing.push(field.name.to_string()),
            }
        }

        if !missing.is_empty() {
            missing.sort();
            return Err(RehabRiskError::SchemaValidation {
                source_name: self.source_name.to_string(),
                missing,
            });
        }

        Ok(positions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEMO: TableSchema = TableSchema {
        source_name: "Demo",
        fields: &[
            FieldSpec::new("patient_id", FieldKind::Identifier),
            FieldSpec::new("zeta", FieldKind::Numeric),
            FieldSpec::new("alpha", FieldKind::Categorical),
        ],
    };

    #[test]
    fn test_resolve_returns_positions_in_schema_order() {
        let table = RawTable::from_reader("alpha,extra,patient_id,zeta\nx,1,P1,2\n".as_bytes()).unwrap();
        assert_eq!(DEMO.resolve(&table).unwrap(), vec![2, 3, 0]);
    }

    #[test]
    fn test_missing_columns_are_sorted() {
        let table = RawTable::from_reader("patient_id\nP1\n".as_bytes()).unwrap();
        match DEMO.resolve(&table) {
            Err(RehabRiskError::SchemaValidation { source_name, missing }) => {
                assert_eq!(source_name, "Demo");
                assert_eq!(missing, vec!["alpha".to_string(), "zeta".to_string()]);
            }
            other => panic!("expected schema validation error, got {other:?}"),
        }
    }
}
