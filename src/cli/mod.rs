//! Command-line parsing for the reimbursement estimators.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the estimator code.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::EstimatorKind;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "reimburse", version, about = "Travel reimbursement estimator (heuristic + learned)")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Predict one trip with the trained regression model.
    Predict(PredictArgs),
    /// Estimate one trip with the closed-form heuristic formula.
    Heuristic(HeuristicArgs),
    /// Train the regression model on a labeled dataset and save it.
    Train(TrainArgs),
    /// Score an estimator over a labeled dataset and report errors.
    Eval(EvalArgs),
}

/// Positional trip inputs shared by single-trip commands.
#[derive(Debug, Args, Clone)]
pub struct TripArgs {
    /// Trip duration in days.
    pub days: f64,

    /// Miles traveled.
    pub miles: f64,

    /// Total submitted receipts.
    pub receipts: f64,

    /// Known reimbursement, for error reporting and diagnostics.
    pub expected: Option<f64>,
}

#[derive(Debug, Args, Clone)]
pub struct PredictArgs {
    #[command(flatten)]
    pub trip: TripArgs,

    /// Model artifact to load (default: $REIMBURSE_MODEL_PATH or reg_model.json).
    #[arg(long, value_name = "JSON")]
    pub model: Option<PathBuf>,
}

#[derive(Debug, Args, Clone)]
pub struct HeuristicArgs {
    #[command(flatten)]
    pub trip: TripArgs,

    /// Diagnostics CSV to append to when an expected value is given.
    #[arg(long, value_name = "CSV")]
    pub log: Option<PathBuf>,

    /// Never write the diagnostics CSV.
    #[arg(long)]
    pub no_log: bool,
}

#[derive(Debug, Args, Clone)]
pub struct TrainArgs {
    /// Labeled dataset JSON (default: $REIMBURSE_DATA_PATH or public_cases.json).
    #[arg(long, value_name = "JSON")]
    pub data: Option<PathBuf>,

    /// Where to write the model artifact.
    #[arg(long, value_name = "JSON")]
    pub model: Option<PathBuf>,

    /// Random seed for the train/validation split.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Fraction of cases held out for validation.
    #[arg(long, default_value_t = crate::data::DEFAULT_VALIDATION_FRACTION)]
    pub validation_fraction: f64,
}

#[derive(Debug, Args, Clone)]
pub struct EvalArgs {
    /// Labeled dataset JSON (default: $REIMBURSE_DATA_PATH or public_cases.json).
    #[arg(long, value_name = "JSON")]
    pub data: Option<PathBuf>,

    /// Model artifact for the learned estimator.
    #[arg(long, value_name = "JSON")]
    pub model: Option<PathBuf>,

    /// Which estimator to score.
    #[arg(long, value_enum, default_value_t = EstimatorKind::Learned)]
    pub estimator: EstimatorKind,

    /// Export per-case results to CSV.
    #[arg(long, value_name = "CSV")]
    pub export: Option<PathBuf>,

    /// Show top-N high-error cases.
    #[arg(long, default_value_t = 5)]
    pub top: usize,

    /// Also print error groups (and heuristic adjustment statistics).
    #[arg(long)]
    pub groups: bool,

    /// Append a heuristic diagnostics row per case to this CSV.
    #[arg(long, value_name = "CSV")]
    pub log: Option<PathBuf>,
}

/// Rewrite argv so the historical positional interface keeps working.
///
/// Rules:
/// - `reimburse`                        -> `reimburse train`
/// - `reimburse --batch-eval ...`       -> `reimburse eval ...`
/// - `reimburse 3 120 45.6 [expected]`  -> `reimburse predict 3 120 45.6 [expected]`
/// - anything else                      -> unchanged
pub fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("train".to_string());
        return argv;
    };

    if arg1 == "--batch-eval" {
        argv[1] = "eval".to_string();
        return argv;
    }

    if arg1.parse::<f64>().is_ok() {
        argv.insert(1, "predict".to_string());
        return argv;
    }

    argv
}
