//! Read/write the trained model artifact (JSON).
//!
//! The artifact is written once by `reimburse train` and read by every
//! prediction. Besides the fitted coefficients it records the feature layout
//! it was trained with; loading refuses an artifact whose layout differs from
//! the current `FEATURE_NAMES`.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::features::FEATURE_NAMES;
use crate::model::{LinearModel, Regressor};

/// A persisted trained model plus its provenance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub tool: String,
    pub created_at: DateTime<Utc>,
    pub regressor: String,
    pub feature_names: Vec<String>,
    pub n_train: usize,
    pub n_validation: usize,
    pub validation_mae: Option<f64>,
    pub model: LinearModel,
}

impl ModelArtifact {
    pub fn new(model: LinearModel, n_train: usize, n_validation: usize, validation_mae: Option<f64>) -> Self {
        Self {
            tool: "reimburse".to_string(),
            created_at: Utc::now(),
            regressor: model.name().to_string(),
            feature_names: FEATURE_NAMES.iter().map(|s| s.to_string()).collect(),
            n_train,
            n_validation,
            validation_mae,
            model,
        }
    }
}

/// Write a model artifact, replacing any previous file.
pub fn write_model_artifact(path: &Path, artifact: &ModelArtifact) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::input(format!("Failed to create model artifact '{}': {e}", path.display())))?;

    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, artifact)
        .map_err(|e| AppError::input(format!("Failed to write model artifact: {e}")))?;
    writer
        .flush()
        .map_err(|e| AppError::input(format!("Failed to write model artifact: {e}")))?;

    Ok(())
}

/// Read a model artifact.
///
/// A missing file maps to the fatal "model not found" error.
pub fn read_model_artifact(path: &Path) -> Result<ModelArtifact, AppError> {
    if !path.is_file() {
        return Err(AppError::model_not_found());
    }
    let file = File::open(path)
        .map_err(|e| AppError::input(format!("Failed to open model artifact '{}': {e}", path.display())))?;
    let artifact: ModelArtifact =
        serde_json::from_reader(file).map_err(|e| AppError::input(format!("Invalid model artifact: {e}")))?;

    check_feature_layout(&artifact)?;
    Ok(artifact)
}

fn check_feature_layout(artifact: &ModelArtifact) -> Result<(), AppError> {
    let matches = artifact.feature_names.len() == FEATURE_NAMES.len()
        && artifact.feature_names.iter().zip(FEATURE_NAMES).all(|(a, b)| a == b);
    if !matches {
        return Err(AppError::input(format!(
            "Model artifact feature layout [{}] does not match [{}]; retrain the model.",
            artifact.feature_names.join(", "),
            FEATURE_NAMES.join(", ")
        )));
    }
    if !artifact.model.is_fitted() {
        return Err(AppError::input(format!(
            "Model artifact has {} coefficients, expected {}.",
            artifact.model.coefficients.len(),
            FEATURE_NAMES.len()
        )));
    }
    Ok(())
}
