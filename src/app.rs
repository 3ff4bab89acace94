//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - installs logging and loads settings
//! - parses CLI arguments
//! - runs one estimator, a training run, or a batch evaluation
//! - prints results and writes optional exports / diagnostics

use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::cli::{Command, EvalArgs, HeuristicArgs, PredictArgs, TrainArgs, TripArgs, rewrite_args};
use crate::config::Settings;
use crate::domain::{EstimatorKind, EvalConfig, TrainConfig, Trip};
use crate::error::AppError;
use crate::io::dataset::validate_trip;
use crate::model::LearnedEstimator;
use crate::report::{
    adjustment_stats, format_adjustment_stats, format_group_highlights, format_high_error_case,
    format_summary, format_top_errors, format_training, group_errors, group_highlights,
};

pub mod pipeline;

/// Groups shown per highlight table.
const GROUP_HIGHLIGHTS: usize = 3;

/// Entry point for the `reimburse` binary.
pub fn run() -> Result<(), AppError> {
    init_logging();
    let settings = Settings::from_env();

    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Predict(args) => handle_predict(args, &settings),
        Command::Heuristic(args) => handle_heuristic(args, &settings),
        Command::Train(args) => handle_train(args, &settings),
        Command::Eval(args) => handle_eval(args, &settings),
    }
}

/// Structured logs go to stderr, filtered by `RUST_LOG` (default `warn`).
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn trip_from_args(args: &TripArgs) -> Result<Trip, AppError> {
    let trip = Trip::new(args.days, args.miles, args.receipts);
    validate_trip(&trip).map_err(AppError::input)?;
    Ok(trip)
}

fn handle_predict(args: PredictArgs, settings: &Settings) -> Result<(), AppError> {
    let trip = trip_from_args(&args.trip)?;
    let model_path = args.model.unwrap_or_else(|| settings.model_path.clone());
    let estimator = LearnedEstimator::from_artifact(&model_path)?;

    let result = estimator.predict(&trip)?;
    println!("{:.2}", result.amount);

    if let Some(expected) = args.trip.expected {
        if settings.debug_predict {
            println!("Error: {:.2}", result.amount - expected);
        }
    }
    Ok(())
}

fn handle_heuristic(args: HeuristicArgs, settings: &Settings) -> Result<(), AppError> {
    let trip = trip_from_args(&args.trip)?;
    let result = crate::heuristic::estimate(&trip);
    debug!(?trip, amount = result.amount, "heuristic estimate");

    if let (Some(expected), Some(breakdown)) = (args.trip.expected, result.diagnostics.as_ref()) {
        if !args.no_log {
            let log_path = args.log.unwrap_or_else(|| settings.log_path.clone());
            crate::io::diagnostics::append_best_effort(&log_path, breakdown, expected);
        }
        if settings.debug {
            if let Some(report) = format_high_error_case(breakdown, expected) {
                eprint!("{report}");
            }
        }
    }

    println!("{:.2}", result.amount);
    if let Some(expected) = args.trip.expected {
        if settings.debug {
            println!("Error: {:.2}", result.amount - expected);
        }
    }
    Ok(())
}

fn handle_train(args: TrainArgs, settings: &Settings) -> Result<(), AppError> {
    let config = train_config_from_args(&args, settings);
    println!("Training model on {} ...", config.data_path.display());

    let output = pipeline::run_train(&config)?;
    let artifact = &output.artifact;
    print!(
        "{}",
        format_training(
            artifact.n_train,
            artifact.n_validation,
            artifact.validation_mae,
            &config.model_path.display().to_string(),
        )
    );
    println!("Done. You can now run predictions: reimburse <days> <miles> <receipts> [expected], or reimburse eval");
    Ok(())
}

fn handle_eval(args: EvalArgs, settings: &Settings) -> Result<(), AppError> {
    let config = eval_config_from_args(&args, settings);
    let run = pipeline::run_eval(&config)?;

    if let Some(path) = &config.export {
        crate::io::export::write_results_csv(path, &run.rows)?;
        println!("Written to {} for further inspection.\n", path.display());
    }

    println!("{}", format_summary(&run.summary, config.estimator));
    print!("{}", format_top_errors(&run.top));

    if config.groups {
        let groups = group_errors(&run.rows);
        println!();
        print!("{}", format_group_highlights(&group_highlights(&groups, GROUP_HIGHLIGHTS)));

        if config.estimator == EstimatorKind::Heuristic {
            println!();
            print!("{}", format_adjustment_stats(&adjustment_stats(&run.rows)));
        }
    }

    Ok(())
}

pub fn train_config_from_args(args: &TrainArgs, settings: &Settings) -> TrainConfig {
    TrainConfig {
        data_path: args.data.clone().unwrap_or_else(|| settings.data_path.clone()),
        model_path: args.model.clone().unwrap_or_else(|| settings.model_path.clone()),
        validation_fraction: args.validation_fraction,
        seed: args.seed,
    }
}

pub fn eval_config_from_args(args: &EvalArgs, settings: &Settings) -> EvalConfig {
    EvalConfig {
        data_path: args.data.clone().unwrap_or_else(|| settings.data_path.clone()),
        model_path: args.model.clone().unwrap_or_else(|| settings.model_path.clone()),
        estimator: args.estimator,
        top_n: args.top,
        export: args.export.clone(),
        groups: args.groups,
        diagnostics_log: match args.estimator {
            EstimatorKind::Heuristic => args.log.clone(),
            EstimatorKind::Learned => None,
        },
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn settings() -> Settings {
        Settings::from_lookup(|_| None)
    }

    #[test]
    fn eval_config_falls_back_to_settings() {
        let cli = crate::cli::Cli::parse_from(["reimburse", "eval", "--estimator", "heuristic", "--log", "d.csv"]);
        let Command::Eval(args) = cli.command else {
            panic!("expected eval");
        };
        let config = eval_config_from_args(&args, &settings());
        assert_eq!(config.data_path, PathBuf::from(crate::config::DEFAULT_DATA_PATH));
        assert_eq!(config.model_path, PathBuf::from(crate::config::DEFAULT_MODEL_PATH));
        assert_eq!(config.estimator, EstimatorKind::Heuristic);
        assert_eq!(config.diagnostics_log, Some(PathBuf::from("d.csv")));
    }

    #[test]
    fn learned_eval_ignores_diagnostics_log() {
        let cli = crate::cli::Cli::parse_from(["reimburse", "eval", "--log", "d.csv"]);
        let Command::Eval(args) = cli.command else {
            panic!("expected eval");
        };
        assert_eq!(eval_config_from_args(&args, &settings()).diagnostics_log, None);
    }

    #[test]
    fn train_config_prefers_flags() {
        let cli = crate::cli::Cli::parse_from(["reimburse", "train", "--data", "x.json", "--seed", "7"]);
        let Command::Train(args) = cli.command else {
            panic!("expected train");
        };
        let config = train_config_from_args(&args, &settings());
        assert_eq!(config.data_path, PathBuf::from("x.json"));
        assert_eq!(config.seed, 7);
        assert_eq!(config.validation_fraction, crate::data::DEFAULT_VALIDATION_FRACTION);
    }

    #[test]
    fn negative_trip_inputs_are_rejected() {
        let args = TripArgs {
            days: 2.0,
            miles: -5.0,
            receipts: 10.0,
            expected: None,
        };
        let err = trip_from_args(&args).unwrap_err();
        assert_eq!(err.exit_code(), crate::error::EXIT_INPUT);
    }
}
