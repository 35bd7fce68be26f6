//! Error types for Stepwise

use std::fmt;
use std::num::ParseIntError;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Value that failed a positivity check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Steps,
    Weight,
    Height,
    Duration,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Steps => "steps",
            Field::Weight => "weight",
            Field::Height => "height",
            Field::Duration => "duration",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can occur while parsing records or computing metrics
#[derive(Debug, Error)]
pub enum ActivityError {
    #[error("Incorrect data format: {input:?} has {fields} fields")]
    Format { input: String, fields: usize },

    #[error("Steps conversion failed for {value:?}: {source}")]
    Conversion {
        value: String,
        #[source]
        source: ParseIntError,
    },

    #[error("Time parsing failed for {literal:?}: {reason}")]
    DurationParse { literal: String, reason: String },

    #[error("Incorrect {field} value: {value}")]
    InvalidValue { field: Field, value: String },

    #[error("Unknown activity type: {0}")]
    UnknownActivity(String),

    #[error("Invalid configuration JSON: {0}")]
    Config(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl ActivityError {
    pub(crate) fn invalid(field: Field, value: impl fmt::Display) -> Self {
        ActivityError::InvalidValue {
            field,
            value: value.to_string(),
        }
    }

    /// Stable machine-readable code, shared by the CLI and the C bindings
    pub fn code(&self) -> &'static str {
        match self {
            ActivityError::Format { .. } => "FORMAT_ERROR",
            ActivityError::Conversion { .. } => "CONVERSION_ERROR",
            ActivityError::DurationParse { .. } => "DURATION_PARSE_ERROR",
            ActivityError::InvalidValue { .. } => "INVALID_VALUE",
            ActivityError::UnknownActivity(_) => "UNKNOWN_ACTIVITY",
            ActivityError::Config(_) | ActivityError::InvalidConfig(_) => "CONFIG_ERROR",
        }
    }
}
