//! Least squares solver.
//!
//! The learned estimator's concrete regressor solves one problem of the form:
//!
//! ```text
//! minimize Σ (y_i - x_i^T β)^2
//! ```
//!
//! Implementation choices:
//! - We solve via SVD so the tall design matrix (many trips, 10 columns) is
//!   handled without forming normal equations.
//! - Band codes and the trouble flag are nearly collinear with the raw columns on
//!   small datasets, so the solve retries with looser singular-value tolerances
//!   rather than failing outright.

use nalgebra::{DMatrix, DVector};

/// Solve a least squares problem using SVD.
///
/// Returns `None` if the system is too ill-conditioned to solve robustly.
pub fn solve_least_squares(x: &DMatrix<f64>, y: &DVector<f64>) -> Option<DVector<f64>> {
    let svd = x.clone().svd(true, true);

    for &tol in &[1e-10, 1e-8, 1e-6] {
        if let Ok(beta) = svd.solve(y, tol) {
            if beta.iter().all(|v| v.is_finite()) {
                return Some(beta);
            }
        }
    }

    None
}

/// Mean absolute difference between two equal-length slices.
///
/// Returns `None` for empty input.
pub fn mean_absolute_error(predicted: &[f64], actual: &[f64]) -> Option<f64> {
    if predicted.is_empty() || predicted.len() != actual.len() {
        return None;
    }
    let sum: f64 = predicted.iter().zip(actual).map(|(p, a)| (p - a).abs()).sum();
    Some(sum / predicted.len() as f64)
}
