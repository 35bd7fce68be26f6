//! Pipeline orchestration
//!
//! This module provides the public API for Stepwise.
//! It runs a raw record through parsing, calculation and report rendering.

use tracing::warn;

use crate::config::CalculatorConfig;
use crate::engine::CalorieEngine;
use crate::error::ActivityError;
use crate::parser::RecordParser;
use crate::report::{DaySummary, Summary, TrainingSummary};
use crate::types::{ActivityKind, ActivityRecord, UserProfile};

/// Summarize a `steps,activity,duration` training record.
///
/// # Arguments
/// * `raw` - Record such as `"1000,Walking,45m"`
/// * `weight_kg` - User's weight (kg)
/// * `height_m` - User's height (m)
///
/// # Returns
/// The multi-line text report. Labels other than `Walking` and `Running`
/// fail with [`ActivityError::UnknownActivity`].
///
/// # Example
/// ```
/// let report = stepwise::summarize("1000,Walking,45m", 75.0, 1.75)?;
/// assert!(report.starts_with("Training type: Walking\n"));
/// # Ok::<(), stepwise::ActivityError>(())
/// ```
pub fn summarize(raw: &str, weight_kg: f64, height_m: f64) -> Result<String, ActivityError> {
    ActivityProcessor::new().summarize(raw, &UserProfile::new(weight_kg, height_m))
}

/// Summarize a `steps,duration` day-steps record.
///
/// # Example
/// ```
/// let report = stepwise::day_summary("1000,45m", 75.0, 1.75)?;
/// assert!(report.starts_with("Steps: 1000.\n"));
/// # Ok::<(), stepwise::ActivityError>(())
/// ```
pub fn day_summary(raw: &str, weight_kg: f64, height_m: f64) -> Result<String, ActivityError> {
    ActivityProcessor::new().day_summary(raw, &UserProfile::new(weight_kg, height_m))
}

/// Like [`summarize`], but logs the failure and returns an empty string.
pub fn summarize_or_empty(raw: &str, weight_kg: f64, height_m: f64) -> String {
    summarize(raw, weight_kg, height_m).unwrap_or_else(|e| {
        warn!(record = raw, code = e.code(), error = %e, "training record rejected");
        String::new()
    })
}

/// Like [`day_summary`], but logs the failure and returns an empty string.
pub fn day_summary_or_empty(raw: &str, weight_kg: f64, height_m: f64) -> String {
    day_summary(raw, weight_kg, height_m).unwrap_or_else(|e| {
        warn!(record = raw, code = e.code(), error = %e, "day-steps record rejected");
        String::new()
    })
}

/// Processor with a custom calculator configuration.
///
/// Use this when the defaults (height-derived stride, half-rate walking
/// calories) need to be overridden.
#[derive(Debug, Clone, Copy, Default)]
pub struct ActivityProcessor {
    engine: CalorieEngine,
}

impl ActivityProcessor {
    /// Create a processor with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a processor with the given configuration
    pub fn with_config(config: CalculatorConfig) -> Self {
        Self {
            engine: CalorieEngine::new(config),
        }
    }

    /// Load configuration from JSON
    pub fn from_config_json(json: &str) -> Result<Self, ActivityError> {
        Ok(Self::with_config(CalculatorConfig::from_json(json)?))
    }

    pub fn engine(&self) -> &CalorieEngine {
        &self.engine
    }

    /// Structured summary of a training record
    pub fn training_summary(
        &self,
        raw: &str,
        profile: &UserProfile,
    ) -> Result<TrainingSummary, ActivityError> {
        let record = RecordParser::parse_training(raw)?;
        self.training_from_record(&record, profile)
    }

    /// Structured summary of a day-steps record
    pub fn day(&self, raw: &str, profile: &UserProfile) -> Result<DaySummary, ActivityError> {
        let record = RecordParser::parse_steps(raw)?;
        self.day_from_record(&record, profile)
    }

    /// Text report for a training record
    pub fn summarize(&self, raw: &str, profile: &UserProfile) -> Result<String, ActivityError> {
        Ok(self.training_summary(raw, profile)?.to_string())
    }

    /// Text report for a day-steps record
    pub fn day_summary(&self, raw: &str, profile: &UserProfile) -> Result<String, ActivityError> {
        Ok(self.day(raw, profile)?.to_string())
    }

    /// Summarize a record of either layout, chosen by its field count
    pub fn process_line(&self, raw: &str, profile: &UserProfile) -> Result<Summary, ActivityError> {
        let record = RecordParser::parse(raw)?;
        if record.activity.is_some() {
            Ok(Summary::Training(self.training_from_record(&record, profile)?))
        } else {
            Ok(Summary::Day(self.day_from_record(&record, profile)?))
        }
    }

    fn training_from_record(
        &self,
        record: &ActivityRecord,
        profile: &UserProfile,
    ) -> Result<TrainingSummary, ActivityError> {
        let label = record.activity.as_deref().unwrap_or_default();
        let kind: ActivityKind = label.parse()?;
        let result = self.engine.compute(kind, record, profile)?;
        Ok(TrainingSummary::new(kind, record, &result))
    }

    fn day_from_record(
        &self,
        record: &ActivityRecord,
        profile: &UserProfile,
    ) -> Result<DaySummary, ActivityError> {
        // Day totals are counted as walking
        let result = self.engine.compute(ActivityKind::Walking, record, profile)?;
        Ok(DaySummary::new(record, &result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StrideModel;
    use crate::error::Field;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_summarize_walking() {
        let report = summarize("1000,Walking,45m", 75.0, 1.75).unwrap();
        assert_eq!(
            report,
            "Training type: Walking\n\
             Duration: 0.75 h.\n\
             Distance: 0.79 km.\n\
             Speed: 1.05 km/h\n\
             Calories burned: 29.53\n"
        );
    }

    #[test]
    fn test_summarize_running() {
        let report = summarize("10000,Running,1h30m", 80.0, 1.8).unwrap();
        // 10000 × 0.81 m = 8.1 km in 1.5 h
        assert_eq!(
            report,
            "Training type: Running\n\
             Duration: 1.50 h.\n\
             Distance: 8.10 km.\n\
             Speed: 5.40 km/h\n\
             Calories burned: 648.00\n"
        );
    }

    #[test]
    fn test_summarize_unknown_activity() {
        let err = summarize("1000,Swimming,45m", 75.0, 1.75).unwrap_err();
        assert!(matches!(err, ActivityError::UnknownActivity(ref l) if l == "Swimming"));
        assert_eq!(summarize_or_empty("1000,Swimming,45m", 75.0, 1.75), "");
    }

    #[test]
    fn test_summarize_propagates_parse_errors() {
        assert!(matches!(
            summarize("1000,45m", 75.0, 1.75).unwrap_err(),
            ActivityError::Format { .. }
        ));
        assert!(matches!(
            summarize("x,Walking,45m", 75.0, 1.75).unwrap_err(),
            ActivityError::Conversion { .. }
        ));
        assert!(matches!(
            summarize("1000,Walking,later", 75.0, 1.75).unwrap_err(),
            ActivityError::DurationParse { .. }
        ));
    }

    #[test]
    fn test_summarize_validates_profile() {
        let err = summarize("1000,Running,45m", 0.0, 1.75).unwrap_err();
        assert!(matches!(err, ActivityError::InvalidValue { field: Field::Weight, .. }));

        let err = summarize("1000,Running,45m", 75.0, -1.0).unwrap_err();
        assert!(matches!(err, ActivityError::InvalidValue { field: Field::Height, .. }));
    }

    #[test]
    fn test_summarize_is_idempotent() {
        let first = summarize("7777,Running,37m15s", 68.3, 1.71).unwrap();
        let second = summarize("7777,Running,37m15s", 68.3, 1.71).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_day_summary() {
        let report = day_summary("1000,45m", 75.0, 1.75).unwrap();
        assert_eq!(
            report,
            "Steps: 1000.\n\
             Distance: 0.79 km.\n\
             Calories burned: 29.53.\n"
        );
    }

    #[test]
    fn test_day_summary_or_empty() {
        assert_eq!(day_summary_or_empty("0,45m", 75.0, 1.75), "");
        assert_eq!(day_summary_or_empty("1000,Walking,45m", 75.0, 1.75), "");
        assert!(!day_summary_or_empty("1000,45m", 75.0, 1.75).is_empty());
    }

    #[test]
    fn test_process_line_detects_layout() {
        let processor = ActivityProcessor::new();
        let profile = UserProfile::new(75.0, 1.75);

        assert!(matches!(
            processor.process_line("1000,45m", &profile).unwrap(),
            Summary::Day(_)
        ));
        match processor.process_line("1000,Running,45m", &profile).unwrap() {
            Summary::Training(summary) => assert_eq!(summary.activity, ActivityKind::Running),
            other => panic!("expected training summary, got {other:?}"),
        }
        assert!(processor.process_line("1000,Cycling,45m", &profile).is_err());
    }

    #[test]
    fn test_processor_with_fixed_stride() {
        let processor = ActivityProcessor::from_config_json(
            r#"{"stride": {"model": "fixed", "length_m": 0.65}}"#,
        )
        .unwrap();
        assert_eq!(
            processor.engine().config().stride,
            StrideModel::Fixed { length_m: 0.65 }
        );

        let summary = processor
            .day("1000,30m", &UserProfile::new(70.0, 1.9))
            .unwrap();
        assert!((summary.distance_km - 0.65).abs() < 1e-9);
    }
}
