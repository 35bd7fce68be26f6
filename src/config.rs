//! Calculator configuration
//!
//! Tunable constants for the calculation engine. Every field has a default, so
//! an empty JSON object is a valid configuration.

use serde::{Deserialize, Serialize};

use crate::error::ActivityError;

/// Stride length used when none is derived from height (m)
pub const DEFAULT_STRIDE_LENGTH_M: f64 = 0.65;
/// Stride length as a fraction of body height
pub const DEFAULT_STRIDE_HEIGHT_COEFFICIENT: f64 = 0.45;
/// Share of the running calorie estimate burned while walking
pub const DEFAULT_WALKING_CALORIES_COEFFICIENT: f64 = 0.5;

/// How step count is converted to distance
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "model", rename_all = "snake_case")]
pub enum StrideModel {
    /// Stride = height × coefficient
    HeightDerived { coefficient: f64 },
    /// Same stride for everyone
    Fixed { length_m: f64 },
}

impl StrideModel {
    /// Stride length in metres for a user of the given height (m)
    pub fn stride_length_m(&self, height_m: f64) -> f64 {
        match self {
            StrideModel::HeightDerived { coefficient } => height_m * coefficient,
            StrideModel::Fixed { length_m } => *length_m,
        }
    }
}

impl Default for StrideModel {
    fn default() -> Self {
        StrideModel::HeightDerived {
            coefficient: DEFAULT_STRIDE_HEIGHT_COEFFICIENT,
        }
    }
}

/// Engine configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorConfig {
    pub stride: StrideModel,
    pub walking_calories_coefficient: f64,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            stride: StrideModel::default(),
            walking_calories_coefficient: DEFAULT_WALKING_CALORIES_COEFFICIENT,
        }
    }
}

impl CalculatorConfig {
    /// Load and validate a configuration from JSON
    pub fn from_json(json: &str) -> Result<Self, ActivityError> {
        let config: CalculatorConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize configuration to pretty JSON
    pub fn to_json(&self) -> Result<String, ActivityError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check that every constant is a positive, finite number
    pub fn validate(&self) -> Result<(), ActivityError> {
        let (name, value) = match self.stride {
            StrideModel::HeightDerived { coefficient } => ("stride.coefficient", coefficient),
            StrideModel::Fixed { length_m } => ("stride.length_m", length_m),
        };
        check_positive(name, value)?;
        check_positive("walking_calories_coefficient", self.walking_calories_coefficient)
    }
}

fn check_positive(name: &str, value: f64) -> Result<(), ActivityError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ActivityError::InvalidConfig(format!(
            "{name} must be a positive number, got {value}"
        )))
    }
}
