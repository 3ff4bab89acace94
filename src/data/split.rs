//! Deterministic train/validation split.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::domain::LabeledCase;
use crate::error::AppError;

/// Held-out share used by `reimburse train` unless overridden.
pub const DEFAULT_VALIDATION_FRACTION: f64 = 0.15;

#[derive(Debug, Clone)]
pub struct Split {
    pub train: Vec<LabeledCase>,
    pub validation: Vec<LabeledCase>,
}

/// Shuffle with a seeded RNG and hold out `ceil(n * fraction)` cases.
///
/// The same `(cases, fraction, seed)` always yields the same split.
pub fn train_validation_split(cases: &[LabeledCase], fraction: f64, seed: u64) -> Result<Split, AppError> {
    if !(fraction.is_finite() && (0.0..1.0).contains(&fraction)) {
        return Err(AppError::input(format!("Validation fraction must be in [0, 1), got {fraction}.")));
    }

    let mut order: Vec<usize> = (0..cases.len()).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    order.shuffle(&mut rng);

    let n_validation = ((cases.len() as f64) * fraction).ceil() as usize;
    let n_validation = n_validation.min(cases.len());

    let validation = order[..n_validation].iter().map(|&i| cases[i]).collect();
    let train = order[n_validation..].iter().map(|&i| cases[i]).collect();

    Ok(Split { train, validation })
}
