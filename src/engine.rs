//! Calculation engine
//!
//! Derives distance, mean speed and calories burned from a step count, the
//! user's weight and height, and the elapsed time:
//! - distance (km) = steps × stride / 1000
//! - mean speed (km/h) = distance / hours
//! - running calories = weight × mean speed × minutes / 60
//! - walking calories = running calories × walking coefficient

use chrono::Duration;
use tracing::debug;

use crate::config::CalculatorConfig;
use crate::duration::{hours, minutes};
use crate::error::{ActivityError, Field};
use crate::types::{ActivityKind, ActivityRecord, ComputationResult, UserProfile};

const METERS_PER_KM: f64 = 1000.0;
const MINUTES_PER_HOUR: f64 = 60.0;

/// Calculator for distance, speed and calorie estimates
#[derive(Debug, Clone, Copy, Default)]
pub struct CalorieEngine {
    config: CalculatorConfig,
}

impl CalorieEngine {
    pub fn new(config: CalculatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CalculatorConfig {
        &self.config
    }

    /// Stride length (m) for a user of the given height (m)
    pub fn stride_length_m(&self, height_m: f64) -> f64 {
        self.config.stride.stride_length_m(height_m)
    }

    /// Distance covered (km)
    pub fn distance_km(&self, steps: u64, height_m: f64) -> f64 {
        steps as f64 * self.stride_length_m(height_m) / METERS_PER_KM
    }

    /// Mean speed (km/h); zero when the duration is not positive
    pub fn mean_speed_kmh(&self, steps: u64, height_m: f64, duration: Duration) -> f64 {
        if duration <= Duration::zero() {
            return 0.0;
        }
        self.distance_km(steps, height_m) / hours(duration)
    }

    /// Calories burned while running
    pub fn running_spent_calories(
        &self,
        steps: u64,
        weight_kg: f64,
        height_m: f64,
        duration: Duration,
    ) -> Result<f64, ActivityError> {
        validate_inputs(steps, weight_kg, height_m)?;

        let mean_speed = self.mean_speed_kmh(steps, height_m, duration);
        Ok(weight_kg * mean_speed * minutes(duration) / MINUTES_PER_HOUR)
    }

    /// Calories burned while walking
    pub fn walking_spent_calories(
        &self,
        steps: u64,
        weight_kg: f64,
        height_m: f64,
        duration: Duration,
    ) -> Result<f64, ActivityError> {
        let running = self.running_spent_calories(steps, weight_kg, height_m, duration)?;
        Ok(running * self.config.walking_calories_coefficient)
    }

    /// Calories burned for the given activity kind
    pub fn spent_calories(
        &self,
        kind: ActivityKind,
        steps: u64,
        weight_kg: f64,
        height_m: f64,
        duration: Duration,
    ) -> Result<f64, ActivityError> {
        match kind {
            ActivityKind::Walking => self.walking_spent_calories(steps, weight_kg, height_m, duration),
            ActivityKind::Running => self.running_spent_calories(steps, weight_kg, height_m, duration),
        }
    }

    /// Compute every metric for a parsed record
    pub fn compute(
        &self,
        kind: ActivityKind,
        record: &ActivityRecord,
        profile: &UserProfile,
    ) -> Result<ComputationResult, ActivityError> {
        let calories = self.spent_calories(
            kind,
            record.steps,
            profile.weight_kg,
            profile.height_m,
            record.duration,
        )?;

        let result = ComputationResult {
            distance_km: self.distance_km(record.steps, profile.height_m),
            mean_speed_kmh: self.mean_speed_kmh(record.steps, profile.height_m, record.duration),
            calories,
        };

        debug!(
            activity = kind.as_str(),
            steps = record.steps,
            distance_km = result.distance_km,
            mean_speed_kmh = result.mean_speed_kmh,
            calories = result.calories,
            "computed activity metrics"
        );

        Ok(result)
    }
}

/// Steps, weight and height must all be positive, checked in that order
fn validate_inputs(steps: u64, weight_kg: f64, height_m: f64) -> Result<(), ActivityError> {
    if steps == 0 {
        return Err(ActivityError::invalid(Field::Steps, steps));
    }
    if !(weight_kg.is_finite() && weight_kg > 0.0) {
        return Err(ActivityError::invalid(Field::Weight, weight_kg));
    }
    if !(height_m.is_finite() && height_m > 0.0) {
        return Err(ActivityError::invalid(Field::Height, height_m));
    }
    Ok(())
}

/// Distance (km) with the default configuration
pub fn distance(steps: u64, height_m: f64) -> f64 {
    CalorieEngine::default().distance_km(steps, height_m)
}

/// Mean speed (km/h) with the default configuration
pub fn mean_speed(steps: u64, height_m: f64, duration: Duration) -> f64 {
    CalorieEngine::default().mean_speed_kmh(steps, height_m, duration)
}

/// Running calories with the default configuration
pub fn running_spent_calories(
    steps: u64,
    weight_kg: f64,
    height_m: f64,
    duration: Duration,
) -> Result<f64, ActivityError> {
    CalorieEngine::default().running_spent_calories(steps, weight_kg, height_m, duration)
}

/// Walking calories with the default configuration
pub fn walking_spent_calories(
    steps: u64,
    weight_kg: f64,
    height_m: f64,
    duration: Duration,
) -> Result<f64, ActivityError> {
    CalorieEngine::default().walking_spent_calories(steps, weight_kg, height_m, duration)
}
