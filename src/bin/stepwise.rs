//! Stepwise CLI - Command-line interface for Stepwise
//!
//! Commands:
//! - summary: Report on a single training record
//! - day: Report on a single day-steps record
//! - run: Process one record per line (batch mode)
//! - validate: Check records without computing anything
//! - config: Print the effective calculator configuration

use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use tracing::{debug, info, trace, warn};
use tracing_subscriber::EnvFilter;

use stepwise::{ActivityError, ActivityProcessor, RecordParser, UserProfile, STEPWISE_VERSION};

/// Stepwise - Distance, speed and calorie estimates from step-count logs
#[derive(Parser)]
#[command(name = "stepwise")]
#[command(version = STEPWISE_VERSION)]
#[command(about = "Compute distance, speed and calories from activity records", long_about = None)]
struct Cli {
    /// Enable verbose output (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Calculator configuration file (JSON)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Report on a training record (steps,activity,duration)
    Summary {
        /// Record, e.g. "6000,Running,45m"
        record: String,

        #[command(flatten)]
        profile: ProfileArgs,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Report on a day-steps record (steps,duration)
    Day {
        /// Record, e.g. "1000,1h30m"
        record: String,

        #[command(flatten)]
        profile: ProfileArgs,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Process one record per line; the layout is detected per line
    Run {
        /// Input file path (use - for stdin)
        #[arg(short, long, default_value = "-")]
        input: PathBuf,

        #[command(flatten)]
        profile: ProfileArgs,

        /// Output format
        #[arg(long, default_value = "text")]
        output_format: OutputFormat,

        /// Log rejected records and continue instead of stopping
        #[arg(long)]
        keep_going: bool,
    },

    /// Validate records without computing metrics
    Validate {
        /// Input file path (use - for stdin)
        #[arg(short, long, default_value = "-")]
        input: PathBuf,

        /// Output validation report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the effective calculator configuration as JSON
    Config,
}

#[derive(clap::Args)]
struct ProfileArgs {
    /// Body weight in kilograms
    #[arg(long)]
    weight: f64,

    /// Body height in metres
    #[arg(long)]
    height: f64,
}

impl ProfileArgs {
    fn profile(&self) -> UserProfile {
        UserProfile::new(self.weight, self.height)
    }
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// Text reports separated by blank lines
    Text,
    /// Newline-delimited JSON (one summary per line)
    Ndjson,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!(
                "{}",
                serde_json::to_string(&CliError::from(e)).unwrap_or_else(|_| "Unknown error".to_string())
            );
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: u8) {
    let log_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    // RUST_LOG wins over -v
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(verbose >= 2)
        .with_line_number(verbose >= 3)
        .init();

    debug!("Stepwise started with verbosity level: {}", verbose);
    trace!("Full CLI args: {:?}", std::env::args().collect::<Vec<_>>());
}

fn run(cli: Cli) -> Result<(), StepwiseCliError> {
    let processor = load_processor(cli.config.as_deref())?;

    match cli.command {
        Commands::Summary {
            record,
            profile,
            json,
        } => cmd_summary(&processor, &record, &profile.profile(), json),

        Commands::Day {
            record,
            profile,
            json,
        } => cmd_day(&processor, &record, &profile.profile(), json),

        Commands::Run {
            input,
            profile,
            output_format,
            keep_going,
        } => cmd_run(&processor, &input, &profile.profile(), output_format, keep_going),

        Commands::Validate { input, json } => cmd_validate(&input, json),

        Commands::Config => {
            println!("{}", processor.engine().config().to_json()?);
            Ok(())
        }
    }
}

fn load_processor(config: Option<&Path>) -> Result<ActivityProcessor, StepwiseCliError> {
    match config {
        Some(path) => {
            let json = fs::read_to_string(path)?;
            let processor = ActivityProcessor::from_config_json(&json)?;
            info!("Loaded calculator configuration from {}", path.display());
            Ok(processor)
        }
        None => Ok(ActivityProcessor::new()),
    }
}

fn cmd_summary(
    processor: &ActivityProcessor,
    record: &str,
    profile: &UserProfile,
    json: bool,
) -> Result<(), StepwiseCliError> {
    let summary = processor.training_summary(record, profile)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print!("{}", summary);
    }

    Ok(())
}

fn cmd_day(
    processor: &ActivityProcessor,
    record: &str,
    profile: &UserProfile,
    json: bool,
) -> Result<(), StepwiseCliError> {
    let summary = processor.day(record, profile)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print!("{}", summary);
    }

    Ok(())
}

fn cmd_run(
    processor: &ActivityProcessor,
    input: &Path,
    profile: &UserProfile,
    output_format: OutputFormat,
    keep_going: bool,
) -> Result<(), StepwiseCliError> {
    let input_data = read_input(input)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let mut processed = 0usize;
    let mut rejected = 0usize;

    for (index, line) in records(&input_data) {
        let summary = match processor.process_line(line, profile) {
            Ok(summary) => summary,
            Err(e) if keep_going => {
                warn!(line = index, code = e.code(), error = %e, "skipping record");
                rejected += 1;
                continue;
            }
            Err(source) => return Err(StepwiseCliError::Record { line: index, source }),
        };

        match output_format {
            OutputFormat::Text => {
                if processed > 0 {
                    writeln!(out)?;
                }
                write!(out, "{}", summary)?;
            }
            OutputFormat::Ndjson => {
                writeln!(out, "{}", serde_json::to_string(&summary)?)?;
            }
        }
        processed += 1;
    }

    out.flush()?;

    if processed == 0 && rejected == 0 {
        return Err(StepwiseCliError::NoRecords);
    }

    info!(processed, rejected, "Run complete");
    Ok(())
}

fn cmd_validate(input: &Path, json: bool) -> Result<(), StepwiseCliError> {
    let input_data = read_input(input)?;

    let mut total_records = 0usize;
    let mut errors: Vec<ValidationErrorDetail> = Vec::new();

    for (index, line) in records(&input_data) {
        total_records += 1;

        // Unknown labels are rejected here too, so a valid line always computes
        let outcome = RecordParser::parse(line).and_then(|record| record.kind());
        if let Err(e) = outcome {
            errors.push(ValidationErrorDetail {
                line: index,
                record: line.to_string(),
                code: e.code().to_string(),
                error: e.to_string(),
            });
        }
    }

    let report = ValidationReport {
        total_records,
        valid_records: total_records - errors.len(),
        invalid_records: errors.len(),
        errors,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Validation Report");
        println!("=================");
        println!("Total records:   {}", report.total_records);
        println!("Valid records:   {}", report.valid_records);
        println!("Invalid records: {}", report.invalid_records);

        if !report.errors.is_empty() {
            println!("\nErrors:");
            for err in &report.errors {
                println!("  - Line {} ({:?}): {}", err.line, err.record, err.error);
            }
        }
    }

    if report.invalid_records > 0 {
        Err(StepwiseCliError::ValidationFailed(report.invalid_records))
    } else {
        Ok(())
    }
}

// Helper functions

fn read_input(input: &Path) -> Result<String, StepwiseCliError> {
    if input.to_string_lossy() == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    } else {
        Ok(fs::read_to_string(input)?)
    }
}

/// Non-blank lines with their 1-based line numbers
fn records(input: &str) -> impl Iterator<Item = (usize, &str)> + '_ {
    input
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty())
}

// Error types

#[derive(Debug)]
enum StepwiseCliError {
    Io(io::Error),
    Activity(ActivityError),
    Json(serde_json::Error),
    Record { line: usize, source: ActivityError },
    NoRecords,
    ValidationFailed(usize),
}

impl From<io::Error> for StepwiseCliError {
    fn from(e: io::Error) -> Self {
        StepwiseCliError::Io(e)
    }
}

impl From<ActivityError> for StepwiseCliError {
    fn from(e: ActivityError) -> Self {
        StepwiseCliError::Activity(e)
    }
}

impl From<serde_json::Error> for StepwiseCliError {
    fn from(e: serde_json::Error) -> Self {
        StepwiseCliError::Json(e)
    }
}

#[derive(serde::Serialize)]
struct CliError {
    code: String,
    message: String,
    hint: Option<String>,
}

fn activity_hint(e: &ActivityError) -> &'static str {
    match e {
        ActivityError::Format { .. } => {
            "Records look like steps,duration or steps,activity,duration"
        }
        ActivityError::Conversion { .. } => "The step count must be a whole number",
        ActivityError::DurationParse { .. } => "Use durations such as 45m, 1h30m or 1.5h",
        ActivityError::InvalidValue { .. } => {
            "Steps, duration, weight and height must all be positive"
        }
        ActivityError::UnknownActivity(_) => "Supported activities: Walking, Running",
        ActivityError::Config(_) | ActivityError::InvalidConfig(_) => {
            "Run 'stepwise config' to see a valid configuration"
        }
    }
}

impl From<StepwiseCliError> for CliError {
    fn from(e: StepwiseCliError) -> Self {
        match e {
            StepwiseCliError::Io(e) => CliError {
                code: "IO_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check file paths and permissions".to_string()),
            },
            StepwiseCliError::Activity(e) => CliError {
                code: e.code().to_string(),
                message: e.to_string(),
                hint: Some(activity_hint(&e).to_string()),
            },
            StepwiseCliError::Json(e) => CliError {
                code: "JSON_ERROR".to_string(),
                message: e.to_string(),
                hint: None,
            },
            StepwiseCliError::Record { line, source } => CliError {
                code: source.code().to_string(),
                message: format!("line {}: {}", line, source),
                hint: Some(format!(
                    "{}; pass --keep-going to skip bad records",
                    activity_hint(&source)
                )),
            },
            StepwiseCliError::NoRecords => CliError {
                code: "NO_RECORDS".to_string(),
                message: "No records found in input".to_string(),
                hint: Some("Ensure input file is not empty".to_string()),
            },
            StepwiseCliError::ValidationFailed(count) => CliError {
                code: "VALIDATION_FAILED".to_string(),
                message: format!("{} records failed validation", count),
                hint: Some("Fix validation errors and retry".to_string()),
            },
        }
    }
}

// Report types

#[derive(serde::Serialize)]
struct ValidationReport {
    total_records: usize,
    valid_records: usize,
    invalid_records: usize,
    errors: Vec<ValidationErrorDetail>,
}

#[derive(serde::Serialize)]
struct ValidationErrorDetail {
    line: usize,
    record: String,
    code: String,
    error: String,
}
