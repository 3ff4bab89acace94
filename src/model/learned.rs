//! Learned estimator: feature contract + post-hoc cap around a `Regressor`.

use std::path::Path;

use tracing::debug;

use crate::domain::{EstimateResult, Trip};
use crate::error::{AppError, EXIT_NUMERIC};
use crate::features::{FeatureVector, derive, encode};
use crate::heuristic::round_cents;
use crate::io::artifact::read_model_artifact;
use crate::model::regressor::{LinearModel, Regressor};

/// Share of receipts a flagged (troubled) trip may be reimbursed at most.
pub const TROUBLE_CAP_RATIO: f64 = 0.5;

/// Estimator backed by a trained regressor.
#[derive(Debug, Clone)]
pub struct LearnedEstimator<R> {
    regressor: R,
}

impl LearnedEstimator<LinearModel> {
    /// Load a trained artifact; a missing file is `ModelNotFound`.
    pub fn from_artifact(path: &Path) -> Result<Self, AppError> {
        let artifact = read_model_artifact(path)?;
        Ok(Self::new(artifact.model))
    }
}

impl<R: Regressor> LearnedEstimator<R> {
    pub fn new(regressor: R) -> Self {
        Self { regressor }
    }

    /// Predict a reimbursement, capped for troubled trips and rounded to cents.
    pub fn predict(&self, trip: &Trip) -> Result<EstimateResult, AppError> {
        let features = derive(trip);
        let vector: FeatureVector = encode(trip, &features);
        let raw = self.regressor.predict(&vector);
        if !raw.is_finite() {
            return Err(AppError::new(EXIT_NUMERIC, "Non-finite model prediction."));
        }

        let amount = if features.trouble_flag {
            apply_trouble_cap(raw, trip.receipts)
        } else {
            raw
        };
        debug!(
            model = self.regressor.name(),
            raw,
            amount,
            trouble = features.trouble_flag,
            "learned prediction"
        );

        Ok(EstimateResult {
            amount: round_cents(amount),
            diagnostics: None,
        })
    }
}

/// `min(prediction, receipts × 0.5)`.
pub fn apply_trouble_cap(prediction: f64, receipts: f64) -> f64 {
    prediction.min(receipts * TROUBLE_CAP_RATIO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::FEATURE_LEN;

    /// Always predicts the same amount.
    struct Constant(f64);

    impl Regressor for Constant {
        fn name(&self) -> &'static str {
            "constant"
        }

        fn fit(&mut self, _x: &[FeatureVector], _y: &[f64]) -> Result<(), AppError> {
            Ok(())
        }

        fn predict(&self, _x: &FeatureVector) -> f64 {
            self.0
        }
    }

    #[test]
    fn cap_applies_to_troubled_trips() {
        let estimator = LearnedEstimator::new(Constant(5000.0));
        // Short trip, low efficiency, very high / excessive spend.
        let trips = [
            Trip::new(3.0, 60.0, 1000.0),
            Trip::new(4.0, 100.0, 2400.0),
            Trip::new(2.5, 10.0, 900.0),
        ];
        for trip in trips {
            assert!(derive(&trip).trouble_flag);
            let amount = estimator.predict(&trip).unwrap().amount;
            assert!(amount <= trip.receipts * TROUBLE_CAP_RATIO + 1e-9);
        }
    }

    #[test]
    fn cap_does_not_raise_low_predictions() {
        let estimator = LearnedEstimator::new(Constant(100.0));
        let trip = Trip::new(3.0, 60.0, 1000.0);
        assert_eq!(estimator.predict(&trip).unwrap().amount, 100.0);
    }

    #[test]
    fn untroubled_trips_pass_through() {
        let estimator = LearnedEstimator::new(Constant(1234.567));
        let trip = Trip::new(5.0, 1000.0, 500.0);
        assert!(!derive(&trip).trouble_flag);
        assert_eq!(estimator.predict(&trip).unwrap().amount, 1234.57);
    }

    #[test]
    fn non_finite_prediction_is_an_error() {
        let estimator = LearnedEstimator::new(Constant(f64::NAN));
        let err = estimator.predict(&Trip::new(1.0, 1.0, 1.0)).unwrap_err();
        assert_eq!(err.exit_code(), EXIT_NUMERIC);
    }

    #[test]
    fn linear_model_sees_the_derived_vector() {
        // Weight only the trouble flag column so the prediction exposes it.
        let mut coefficients = vec![0.0; FEATURE_LEN];
        coefficients[FEATURE_LEN - 1] = 1000.0;
        let model = LinearModel { intercept: 10.0, coefficients };
        let estimator = LearnedEstimator::new(model);

        let plain = estimator.predict(&Trip::new(6.0, 600.0, 300.0)).unwrap();
        assert_eq!(plain.amount, 10.0);

        let troubled = estimator.predict(&Trip::new(3.0, 60.0, 3000.0)).unwrap();
        assert_eq!(troubled.amount, 1010.0);
    }
}
