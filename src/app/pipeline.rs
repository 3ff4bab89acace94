//! Shared training and evaluation workflows.
//!
//! Keeping these in one place avoids duplicating the core sequences:
//! - train: dataset -> split -> feature vectors -> fit -> validation MAE -> artifact
//! - eval: dataset -> estimator -> scored rows -> summary -> outliers
//!
//! The CLI handlers in `app` then focus on presentation.

use rayon::prelude::*;
use tracing::info;

use crate::data::train_validation_split;
use crate::domain::{EstimateResult, EstimatorKind, EvalConfig, EvalRow, LabeledCase, TrainConfig, Trip};
use crate::error::{AppError, EXIT_INSUFFICIENT_DATA};
use crate::features::{FeatureVector, feature_vector};
use crate::heuristic;
use crate::io::artifact::{ModelArtifact, write_model_artifact};
use crate::io::dataset::load_cases;
use crate::io::diagnostics::DiagnosticsLog;
use crate::math::mean_absolute_error;
use crate::model::{LearnedEstimator, LinearModel, Regressor};
use crate::report::{EvalSummary, score_case, summarize, top_errors};

/// All computed outputs of a training run.
#[derive(Debug, Clone)]
pub struct TrainOutput {
    pub artifact: ModelArtifact,
}

/// All computed outputs of a batch evaluation.
#[derive(Debug, Clone)]
pub struct EvalOutput {
    pub rows: Vec<EvalRow>,
    pub summary: EvalSummary,
    pub top: Vec<EvalRow>,
}

/// Load the dataset, train, and persist the artifact.
pub fn run_train(config: &TrainConfig) -> Result<TrainOutput, AppError> {
    let cases = load_cases(&config.data_path)?;
    let artifact = train_on_cases(&cases, config.validation_fraction, config.seed)?;
    write_model_artifact(&config.model_path, &artifact)?;
    info!(path = %config.model_path.display(), "model artifact written");
    Ok(TrainOutput { artifact })
}

/// Split, fit a `LinearModel`, and measure validation MAE on raw predictions.
pub fn train_on_cases(cases: &[LabeledCase], validation_fraction: f64, seed: u64) -> Result<ModelArtifact, AppError> {
    let split = train_validation_split(cases, validation_fraction, seed)?;
    if split.train.is_empty() {
        return Err(AppError::new(EXIT_INSUFFICIENT_DATA, "No training cases after the split."));
    }

    let (x_train, y_train) = design(&split.train);
    let mut model = LinearModel::default();
    model.fit(&x_train, &y_train)?;

    let (x_val, y_val) = design(&split.validation);
    let val_preds: Vec<f64> = x_val.iter().map(|x| model.predict(x)).collect();
    let validation_mae = mean_absolute_error(&val_preds, &y_val);

    info!(
        regressor = model.name(),
        n_train = split.train.len(),
        n_validation = split.validation.len(),
        validation_mae = validation_mae.unwrap_or(f64::NAN),
        "trained model"
    );

    Ok(ModelArtifact::new(model, split.train.len(), split.validation.len(), validation_mae))
}

fn design(cases: &[LabeledCase]) -> (Vec<FeatureVector>, Vec<f64>) {
    cases.iter().map(|c| (feature_vector(&c.trip), c.expected)).unzip()
}

/// Load the dataset, score it with the configured estimator, and summarize.
pub fn run_eval(config: &EvalConfig) -> Result<EvalOutput, AppError> {
    let cases = load_cases(&config.data_path)?;

    let rows = match config.estimator {
        EstimatorKind::Learned => {
            let estimator = LearnedEstimator::from_artifact(&config.model_path)?;
            score_cases(&cases, |trip| estimator.predict(trip))?
        }
        EstimatorKind::Heuristic => score_cases(&cases, |trip| Ok(heuristic::estimate(trip)))?,
    };

    if let Some(path) = &config.diagnostics_log {
        write_diagnostics(path, &rows);
    }

    let summary = summarize(&rows)
        .ok_or_else(|| AppError::new(EXIT_INSUFFICIENT_DATA, "No cases were scored."))?;
    let top = top_errors(&rows, config.top_n);
    info!(
        estimator = config.estimator.display_name(),
        n = summary.n,
        mean_error = summary.mean_error,
        "evaluation complete"
    );

    Ok(EvalOutput { rows, summary, top })
}

/// Score every case in parallel; the estimator must be pure.
pub fn score_cases<F>(cases: &[LabeledCase], estimate: F) -> Result<Vec<EvalRow>, AppError>
where
    F: Fn(&Trip) -> Result<EstimateResult, AppError> + Sync,
{
    cases
        .par_iter()
        .enumerate()
        .map(|(idx, case)| {
            let result = estimate(&case.trip)?;
            let mut row = score_case(idx + 1, case, result.amount);
            row.breakdown = result.diagnostics;
            Ok(row)
        })
        .collect()
}

/// Append one diagnostics row per heuristic case from a single writer.
///
/// Failures are logged and otherwise ignored.
fn write_diagnostics(path: &std::path::Path, rows: &[EvalRow]) {
    let mut log = match DiagnosticsLog::open(path) {
        Ok(log) => log,
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "diagnostics log skipped");
            return;
        }
    };
    for row in rows {
        if let Some(b) = &row.breakdown {
            if let Err(err) = log.append(b, row.expected) {
                tracing::warn!(path = %log.path().display(), error = %err, "diagnostics log stopped");
                return;
            }
        }
    }
}
