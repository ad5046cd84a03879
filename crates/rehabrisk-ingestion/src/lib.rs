//! rehabrisk-ingestion — Loads the three assessment sources and reduces each
//! to one row per patient.
//!
//! Sources:
//!   - functioning (ICF) assessments → latest record per patient
//!   - gait abnormality estimates    → mean probability per patient
//!   - IMU action quality readings   → mean action risk per patient

pub mod schema;
pub mod table;
pub mod sources;

pub use schema::{FieldKind, FieldSpec, TableSchema};
pub use sources::{AssessmentSource, FunctioningSource, GaitSource, SensorSource};
pub use table::RawTable;
