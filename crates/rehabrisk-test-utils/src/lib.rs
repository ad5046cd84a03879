//! Shared testing utilities: temporary CSV fixtures for the three
//! assessment sources.

use std::path::{Path, PathBuf};

use rehabrisk_common::FusionConfig;
use tempfile::TempDir;

pub const ICF_HEADER: &str = "patient_id,time_step,rehab_phase,icf_total,rom,vas";
pub const GAIT_HEADER: &str = "patient_id,gait_abnormal_prob";
pub const SENSOR_HEADER: &str = "patient_id,action_type,quality_score";

/// A temporary directory holding fixture files. Removed on drop.
pub struct CsvFixture {
    dir: TempDir,
}

impl CsvFixture {
    pub fn new() -> anyhow::Result<Self> {
        Ok(Self { dir: tempfile::tempdir()? })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write `header` followed by `rows`, one line each.
    pub fn write_csv(&self, name: &str, header: &str, rows: &[&str]) -> anyhow::Result<PathBuf> {
        let mut content = String::from(header);
        content.push('\n');
        for row in rows {
            content.push_str(row);
            content.push('\n');
        }
        self.write_raw(name, &content)
    }

    /// Write a file verbatim (e.g. zero-byte or malformed inputs).
    pub fn write_raw(&self, name: &str, content: &str) -> anyhow::Result<PathBuf> {
        let path = self.dir.path().join(name);
        std::fs::write(&path, content)?;
        Ok(path)
    }

    /// Write the three sources and return a config whose output lands in
    /// `out/decisions.csv` inside the fixture directory.
    pub fn sources(
        &self,
        icf_rows: &[&str],
        gait_rows: &[&str],
        sensor_rows: &[&str],
    ) -> anyhow::Result<FusionConfig> {
        Ok(FusionConfig::new(
            self.write_csv("icf.csv", ICF_HEADER, icf_rows)?,
            self.write_csv("gait.csv", GAIT_HEADER, gait_rows)?,
            self.write_csv("sensor.csv", SENSOR_HEADER, sensor_rows)?,
            self.dir.path().join("out").join("decisions.csv"),
        ))
    }
}

/// Patient P1 present in all three sources (latest total 60, gait mean 0.5,
/// action risk 0.2, phase "mid") and P2 present only in gait with 0.9.
pub fn two_patient_cohort(fixture: &CsvFixture) -> anyhow::Result<FusionConfig> {
    fixture.sources(
        &["P1,1,early,40,80,5", "P1,2,mid,60,95,3"],
        &["P1,0.2", "P1,0.8", "P2,0.9"],
        &["P1,squat,90", "P1,lunge,70"],
    )
}

/// Approximate float equality for test assertions.
pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}
