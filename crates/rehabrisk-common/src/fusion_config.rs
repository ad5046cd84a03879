//! Input/output locations for one fusion run.
//!
//! The pipeline consumes exactly one value of this type; anything that
//! builds it (CLI flags, config files) lives outside the core.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// The four paths of a fusion run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FusionConfig {
    /// Functioning (ICF) assessments: patient_id, time_step, rehab_phase, icf_total, rom, vas
    #[serde(default = "default_icf_path")]
    pub icf_path: PathBuf,

    /// Gait model output: patient_id, gait_abnormal_prob
    #[serde(default = "default_gait_path")]
    pub gait_path: PathBuf,

    /// IMU action quality: patient_id, action_type, quality_score
    #[serde(default = "default_sensor_path")]
    pub sensor_path: PathBuf,

    /// Destination of the decision table
    #[serde(default = "default_output_path")]
    pub output_path: PathBuf,
}

fn default_icf_path() -> PathBuf { PathBuf::from("data/icf/example_icf_output.csv") }
fn default_gait_path() -> PathBuf { PathBuf::from("data/gait/example_gait_output.csv") }
fn default_sensor_path() -> PathBuf { PathBuf::from("data/sensor/example_sensor_output.csv") }
fn default_output_path() -> PathBuf { PathBuf::from("data/fusion/example_fusion_output.csv") }

impl Default for FusionConfig {
    fn default() -> Self {
        Self {
            icf_path: default_icf_path(),
            gait_path: default_gait_path(),
            sensor_path: default_sensor_path(),
            output_path: default_output_path(),
        }
    }
}

impl FusionConfig {
    pub fn new(
        icf_path: impl Into<PathBuf>,
        gait_path: impl Into<PathBuf>,
        sensor_path: impl Into<PathBuf>,
        output_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            icf_path: icf_path.into(),
            gait_path: gait_path.into(),
            sensor_path: sensor_path.into(),
            output_path: output_path.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_paths_follow_data_layout() {
        let config = FusionConfig::default();
        assert!(config.icf_path.starts_with("data/icf"));
        assert!(config.output_path.ends_with("example_fusion_output.csv"));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: FusionConfig =
            serde_json::from_str(r#"{ "output_path": "out/decisions.csv" }"#).unwrap();
        assert_eq!(config.output_path, PathBuf::from("out/decisions.csv"));
        assert_eq!(config.gait_path, default_gait_path());
    }
}
