//! Report rendering
//!
//! Summaries are plain serializable structs; their `Display` impls produce the
//! fixed text template, every number rounded to two decimals.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::duration::hours;
use crate::types::{ActivityKind, ActivityRecord, ComputationResult};

/// Summary of a labelled training record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingSummary {
    pub activity: ActivityKind,
    pub duration_hours: f64,
    pub distance_km: f64,
    pub mean_speed_kmh: f64,
    pub calories: f64,
}

impl TrainingSummary {
    pub fn new(kind: ActivityKind, record: &ActivityRecord, result: &ComputationResult) -> Self {
        Self {
            activity: kind,
            duration_hours: hours(record.duration),
            distance_km: result.distance_km,
            mean_speed_kmh: result.mean_speed_kmh,
            calories: result.calories,
        }
    }
}

impl fmt::Display for TrainingSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Training type: {}", self.activity)?;
        writeln!(f, "Duration: {:.2} h.", self.duration_hours)?;
        writeln!(f, "Distance: {:.2} km.", self.distance_km)?;
        writeln!(f, "Speed: {:.2} km/h", self.mean_speed_kmh)?;
        writeln!(f, "Calories burned: {:.2}", self.calories)
    }
}

/// Summary of an unlabelled day-steps record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DaySummary {
    pub steps: u64,
    pub distance_km: f64,
    pub calories: f64,
}

impl DaySummary {
    pub fn new(record: &ActivityRecord, result: &ComputationResult) -> Self {
        Self {
            steps: record.steps,
            distance_km: result.distance_km,
            calories: result.calories,
        }
    }
}

impl fmt::Display for DaySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Steps: {}.", self.steps)?;
        writeln!(f, "Distance: {:.2} km.", self.distance_km)?;
        writeln!(f, "Calories burned: {:.2}.", self.calories)
    }
}

/// Either kind of summary, for inputs that mix both layouts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Summary {
    Training(TrainingSummary),
    Day(DaySummary),
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Summary::Training(summary) => summary.fmt(f),
            Summary::Day(summary) => summary.fmt(f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use pretty_assertions::assert_eq;

    fn record() -> ActivityRecord {
        ActivityRecord {
            steps: 1000,
            activity: Some("Walking".to_string()),
            duration: Duration::minutes(45),
        }
    }

    fn result() -> ComputationResult {
        ComputationResult {
            distance_km: 0.7875,
            mean_speed_kmh: 1.05,
            calories: 29.53125,
        }
    }

    #[test]
    fn test_training_report_template() {
        let summary = TrainingSummary::new(ActivityKind::Walking, &record(), &result());
        assert_eq!(
            summary.to_string(),
            "Training type: Walking\n\
             Duration: 0.75 h.\n\
             Distance: 0.79 km.\n\
             Speed: 1.05 km/h\n\
             Calories burned: 29.53\n"
        );
    }

    #[test]
    fn test_day_report_template() {
        let summary = DaySummary::new(&record(), &result());
        assert_eq!(
            summary.to_string(),
            "Steps: 1000.\n\
             Distance: 0.79 km.\n\
             Calories burned: 29.53.\n"
        );
    }

    #[test]
    fn test_summary_json_is_tagged() {
        let summary = Summary::Day(DaySummary::new(&record(), &result()));
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["type"], "day");
        assert_eq!(json["steps"], 1000);

        let summary = Summary::Training(TrainingSummary::new(
            ActivityKind::Running,
            &record(),
            &result(),
        ));
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["type"], "training");
        assert_eq!(json["activity"], "Running");
        assert_eq!(json["duration_hours"], 0.75);
    }
}
