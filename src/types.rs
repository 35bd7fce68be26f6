//! Core types for Stepwise
//!
//! Records produced by the parser, the user attributes supplied with each call,
//! and the metrics the engine derives from them.

use std::fmt;
use std::str::FromStr;

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::error::ActivityError;

/// Kind of logged exercise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivityKind {
    Walking,
    Running,
}

impl ActivityKind {
    /// Label used in log records and reports
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityKind::Walking => "Walking",
            ActivityKind::Running => "Running",
        }
    }
}

impl fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActivityKind {
    type Err = ActivityError;

    fn from_str(label: &str) -> Result<Self, Self::Err> {
        match label {
            "Walking" => Ok(ActivityKind::Walking),
            "Running" => Ok(ActivityKind::Running),
            other => Err(ActivityError::UnknownActivity(other.to_string())),
        }
    }
}

/// A validated activity-log record
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityRecord {
    /// Step count (always > 0)
    pub steps: u64,
    /// Activity label exactly as it appeared in the record, if any
    pub activity: Option<String>,
    /// Elapsed time (always > 0)
    pub duration: Duration,
}

impl ActivityRecord {
    /// Resolve the activity label, if the record carries one
    pub fn kind(&self) -> Result<Option<ActivityKind>, ActivityError> {
        self.activity.as_deref().map(str::parse::<ActivityKind>).transpose()
    }
}

/// Per-call user attributes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Body weight (kg)
    pub weight_kg: f64,
    /// Body height (m)
    pub height_m: f64,
}

impl UserProfile {
    pub fn new(weight_kg: f64, height_m: f64) -> Self {
        Self {
            weight_kg,
            height_m,
        }
    }
}

/// Metrics derived from one record
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComputationResult {
    /// Distance covered (km)
    pub distance_km: f64,
    /// Mean speed (km/h)
    pub mean_speed_kmh: f64,
    /// Calories burned (kcal)
    pub calories: f64,
}
