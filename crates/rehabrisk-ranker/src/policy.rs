//! The full set of fusion constants, passed into the scorer and classifier.

use rehabrisk_common::{RehabRiskError, Result};
use serde::{Deserialize, Serialize};

use crate::decision::ThresholdPolicy;
use crate::weights::WeightVector;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FusionPolicy {
    /// Stand-in for a missing gait probability or action risk, and the
    /// normalised functioning value of a cohort with no spread.
    #[serde(default = "default_neutral_value")]
    pub neutral_value: f64,

    #[serde(default)]
    pub weights: WeightVector,

    #[serde(default)]
    pub threshold: ThresholdPolicy,
}

fn default_neutral_value() -> f64 { 0.5 }

impl Default for FusionPolicy {
    fn default() -> Self {
        Self {
            neutral_value: default_neutral_value(),
            weights: WeightVector::default(),
            threshold: ThresholdPolicy::default(),
        }
    }
}

impl FusionPolicy {
    pub fn validate(&self) -> Result<()> {
        if !self.weights.validate() {
            return Err(RehabRiskError::Config(format!(
                "weights must be non-negative and sum to 1.0, got {:?}",
                self.weights.as_array()
            )));
        }
        if !(0.0..=1.0).contains(&self.neutral_value) {
            return Err(RehabRiskError::Config(format!(
                "neutral_value must lie in [0, 1], got {}",
                self.neutral_value
            )));
        }
        let t = &self.threshold;
        if t.floor > t.ceiling {
            return Err(RehabRiskError::Config(format!(
                "threshold floor {} exceeds ceiling {}",
                t.floor, t.ceiling
            )));
        }
        if t.medium_band < 0.0 {
            return Err(RehabRiskError::Config(format!(
                "medium_band must be non-negative, got {}",
                t.medium_band
            )));
        }
        Ok(())
    }
}
