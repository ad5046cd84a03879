//! Decision table persistence.

use std::path::Path;

use rehabrisk_common::entities::OUTPUT_COLUMNS;
use rehabrisk_common::{RiskDecision, Result};
use tracing::info;

/// Write the decision table as CSV with a header row and no index column.
///
/// The header is written even when there are no decisions. Missing values
/// are written as empty fields. Parent directories are created as needed.
pub fn write_decisions(path: &Path, decisions: &[RiskDecision]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)?;

    wtr.write_record(OUTPUT_COLUMNS)?;
    for decision in decisions {
        wtr.serialize(decision)?;
    }
    wtr.flush()?;

    info!(path = %path.display(), n_rows = decisions.len(), "Wrote decision table");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rehabrisk_common::RiskTier;

    #[test]
    fn test_empty_table_still_has_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("out.csv");
        write_decisions(&path, &[]).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            content.trim_end(),
            "patient_id,rehab_phase,icf_total,gait_abnormal_prob,action_risk_score,final_risk_level"
        );
    }

    #[test]
    fn test_missing_values_are_empty_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let decision = RiskDecision {
            patient_id: "P2".to_string(),
            rehab_phase: None,
            icf_total: None,
            gait_abnormal_prob: 0.9,
            action_risk_score: 0.5,
            final_risk_level: RiskTier::High,
        };
        write_decisions(&path, &[decision]).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[1], "P2,,,0.9,0.5,high");
    }
}
