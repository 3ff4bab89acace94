//! The regression capability behind the learned estimator.
//!
//! The estimator only needs `fit` and `predict` over fixed-layout feature
//! vectors, so the concrete algorithm can be swapped without touching the
//! Feature Deriver or the heuristic formula.

use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, EXIT_INSUFFICIENT_DATA, EXIT_NUMERIC};
use crate::features::{FEATURE_LEN, FeatureVector};
use crate::math::solve_least_squares;

/// A trainable regressor over model feature vectors.
pub trait Regressor {
    /// Short name for reports and logs.
    fn name(&self) -> &'static str;

    /// Train on rows `x` with targets `y` (same length).
    fn fit(&mut self, x: &[FeatureVector], y: &[f64]) -> Result<(), AppError>;

    /// Raw (uncapped, unrounded) prediction for one row.
    fn predict(&self, x: &FeatureVector) -> f64;
}

/// Ordinary least squares with an intercept.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LinearModel {
    pub intercept: f64,
    /// One coefficient per feature column, in `FEATURE_NAMES` order.
    pub coefficients: Vec<f64>,
}

impl LinearModel {
    pub fn is_fitted(&self) -> bool {
        self.coefficients.len() == FEATURE_LEN
    }
}

impl Regressor for LinearModel {
    fn name(&self) -> &'static str {
        "linear-ols"
    }

    fn fit(&mut self, x: &[FeatureVector], y: &[f64]) -> Result<(), AppError> {
        if x.len() != y.len() {
            return Err(AppError::input(format!(
                "Feature rows ({}) and targets ({}) differ in length.",
                x.len(),
                y.len()
            )));
        }
        let cols = FEATURE_LEN + 1;
        if x.len() < cols {
            return Err(AppError::new(
                EXIT_INSUFFICIENT_DATA,
                format!("Need at least {cols} training rows, got {}.", x.len()),
            ));
        }

        let design = DMatrix::from_fn(x.len(), cols, |r, c| if c == 0 { 1.0 } else { x[r][c - 1] });
        let target = DVector::from_column_slice(y);

        let beta = solve_least_squares(&design, &target)
            .ok_or_else(|| AppError::new(EXIT_NUMERIC, "Least squares solve failed on training data."))?;

        self.intercept = beta[0];
        self.coefficients = beta.iter().skip(1).copied().collect();
        Ok(())
    }

    fn predict(&self, x: &FeatureVector) -> f64 {
        self.intercept + self.coefficients.iter().zip(x.iter()).map(|(b, v)| b * v).sum::<f64>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(seed: f64) -> FeatureVector {
        let mut v = [0.0; FEATURE_LEN];
        for (i, slot) in v.iter_mut().enumerate() {
            // Distinct, non-collinear columns.
            *slot = ((seed + 1.0) * (i as f64 + 1.0)).sin() * 10.0 + (i as f64) * seed;
        }
        v
    }

    #[test]
    fn linear_model_recovers_exact_relationship() {
        let truth: Vec<f64> = (1..=FEATURE_LEN).map(|i| i as f64 * 0.5).collect();
        let xs: Vec<FeatureVector> = (0..60).map(|i| row(i as f64)).collect();
        let ys: Vec<f64> = xs
            .iter()
            .map(|x| 7.0 + x.iter().zip(&truth).map(|(a, b)| a * b).sum::<f64>())
            .collect();

        let mut model = LinearModel::default();
        assert!(!model.is_fitted());
        model.fit(&xs, &ys).unwrap();
        assert!(model.is_fitted());

        for (x, y) in xs.iter().zip(&ys) {
            assert!((model.predict(x) - y).abs() < 1e-6);
        }
    }

    #[test]
    fn fit_rejects_too_few_rows() {
        let xs: Vec<FeatureVector> = (0..5).map(|i| row(i as f64)).collect();
        let ys = vec![1.0; 5];
        let err = LinearModel::default().fit(&xs, &ys).unwrap_err();
        assert_eq!(err.exit_code(), EXIT_INSUFFICIENT_DATA);
    }

    #[test]
    fn fit_rejects_length_mismatch() {
        let xs: Vec<FeatureVector> = (0..20).map(|i| row(i as f64)).collect();
        let ys = vec![1.0; 19];
        assert!(LinearModel::default().fit(&xs, &ys).is_err());
    }
}
