//! Stepwise - Step-count activity log calculator
//!
//! Stepwise turns comma-delimited activity records into distance, mean speed and
//! calorie estimates through a small deterministic pipeline: record parsing →
//! metric calculation → report rendering.
//!
//! ## Records
//!
//! - **Training**: `steps,activity,duration`, e.g. `"6000,Running,45m"`
//! - **Day steps**: `steps,duration`, e.g. `"1000,1h30m"`
//!
//! Activities are `Walking` or `Running`. Weight is in kilograms and height in
//! metres.

pub mod config;
pub mod duration;
pub mod engine;
pub mod error;
pub mod parser;
pub mod pipeline;
pub mod report;
pub mod types;

// FFI bindings for C interop (always available for cdylib/staticlib builds)
pub mod ffi;

pub use config::{CalculatorConfig, StrideModel};
pub use engine::{
    distance, mean_speed, running_spent_calories, walking_spent_calories, CalorieEngine,
};
pub use error::{ActivityError, Field};
pub use parser::{RecordLayout, RecordParser};
pub use pipeline::{
    day_summary, day_summary_or_empty, summarize, summarize_or_empty, ActivityProcessor,
};
pub use report::{DaySummary, Summary, TrainingSummary};
pub use types::{ActivityKind, ActivityRecord, ComputationResult, UserProfile};

/// Stepwise version
pub const STEPWISE_VERSION: &str = env!("CARGO_PKG_VERSION");
