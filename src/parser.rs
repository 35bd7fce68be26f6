//! Record parsing
//!
//! Splits raw `steps[,activity],duration` strings into validated
//! [`ActivityRecord`]s. Fields are taken verbatim: no whitespace trimming.

use tracing::trace;

use crate::duration::parse_duration;
use crate::error::{ActivityError, Field};
use crate::types::ActivityRecord;

const FIELD_SEPARATOR: char = ',';

/// Shape of a record line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordLayout {
    /// `steps,duration`
    Steps,
    /// `steps,activity,duration`
    Training,
}

impl RecordLayout {
    pub fn field_count(&self) -> usize {
        match self {
            RecordLayout::Steps => 2,
            RecordLayout::Training => 3,
        }
    }

    fn from_field_count(count: usize) -> Option<Self> {
        match count {
            2 => Some(RecordLayout::Steps),
            3 => Some(RecordLayout::Training),
            _ => None,
        }
    }
}

/// Parser for activity-log records
pub struct RecordParser;

impl RecordParser {
    /// Parse a record of either layout, chosen by its field count
    pub fn parse(raw: &str) -> Result<ActivityRecord, ActivityError> {
        let fields: Vec<&str> = raw.split(FIELD_SEPARATOR).collect();
        let layout = RecordLayout::from_field_count(fields.len()).ok_or_else(|| {
            ActivityError::Format {
                input: raw.to_string(),
                fields: fields.len(),
            }
        })?;
        parse_fields(&fields, layout)
    }

    /// Parse a `steps,duration` record
    pub fn parse_steps(raw: &str) -> Result<ActivityRecord, ActivityError> {
        Self::parse_layout(raw, RecordLayout::Steps)
    }

    /// Parse a `steps,activity,duration` record
    pub fn parse_training(raw: &str) -> Result<ActivityRecord, ActivityError> {
        Self::parse_layout(raw, RecordLayout::Training)
    }

    /// Parse a record that must have exactly the given layout
    pub fn parse_layout(raw: &str, layout: RecordLayout) -> Result<ActivityRecord, ActivityError> {
        let fields: Vec<&str> = raw.split(FIELD_SEPARATOR).collect();
        if fields.len() != layout.field_count() {
            return Err(ActivityError::Format {
                input: raw.to_string(),
                fields: fields.len(),
            });
        }
        parse_fields(&fields, layout)
    }
}

fn parse_fields(fields: &[&str], layout: RecordLayout) -> Result<ActivityRecord, ActivityError> {
    let steps = parse_steps_field(fields[0])?;

    let (activity, duration_field) = match layout {
        RecordLayout::Steps => (None, fields[1]),
        RecordLayout::Training => (Some(fields[1].to_string()), fields[2]),
    };

    let duration = parse_duration(duration_field)?;
    if duration <= chrono::Duration::zero() {
        return Err(ActivityError::invalid(Field::Duration, duration_field));
    }

    trace!(steps, ?activity, ?duration, "parsed activity record");

    Ok(ActivityRecord {
        steps,
        activity,
        duration,
    })
}

fn parse_steps_field(field: &str) -> Result<u64, ActivityError> {
    let steps: i64 = field.parse().map_err(|source| ActivityError::Conversion {
        value: field.to_string(),
        source,
    })?;

    if steps <= 0 {
        return Err(ActivityError::invalid(Field::Steps, steps));
    }

    Ok(steps as u64)
}
