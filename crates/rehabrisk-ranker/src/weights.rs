//! Weight vector for the composite risk score.

use serde::{Deserialize, Serialize};

/// The 3-component weight vector W.
/// Weights sum to 1.0; gait evidence dominates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightVector {
    /// Gait abnormality probability
    #[serde(default = "default_gait_weight")]
    pub gait_abnormal: f64,
    /// Action risk from IMU motion quality
    #[serde(default = "default_action_weight")]
    pub action_risk: f64,
    /// Functioning deficit (1 − normalised functioning total)
    #[serde(default = "default_functioning_weight")]
    pub functioning_deficit: f64,
}

fn default_gait_weight() -> f64 { 0.5 }
fn default_action_weight() -> f64 { 0.3 }
fn default_functioning_weight() -> f64 { 0.2 }

impl Default for WeightVector {
    fn default() -> Self {
        Self {
            gait_abnormal:       default_gait_weight(),
            action_risk:         default_action_weight(),
            functioning_deficit: default_functioning_weight(),
        }
    }
}

impl WeightVector {
    fn sum(&self) -> f64 {
        self.gait_abnormal + self.action_risk + self.functioning_deficit
    }

    /// Validate that all weights are non-negative and sum to ~1.0
    pub fn validate(&self) -> bool {
        self.as_array().iter().all(|w| *w >= 0.0) && (self.sum() - 1.0).abs() < 1e-6
    }

    /// Renormalise weights so they sum to 1.0
    pub fn normalise(&mut self) {
        let sum = self.sum();
        if sum > 0.0 {
            self.gait_abnormal       /= sum;
            self.action_risk         /= sum;
            self.functioning_deficit /= sum;
        }
    }

    /// Convert to array for iteration.
    pub fn as_array(&self) -> [f64; 3] {
        [self.gait_abnormal, self.action_risk, self.functioning_deficit]
    }
}
