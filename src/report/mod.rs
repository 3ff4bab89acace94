//! Reporting utilities: scored rows, summary statistics and outliers.

use crate::domain::{EvalRow, LabeledCase};
use crate::features::per_day_rates;

pub mod format;
pub mod grouping;

pub use format::*;
pub use grouping::*;

/// A prediction counts as exact within one cent.
pub const EXACT_TOLERANCE: f64 = 0.01;
/// A prediction counts as close within one unit of currency.
pub const CLOSE_TOLERANCE: f64 = 1.0;

/// Aggregate error statistics over a scored dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct EvalSummary {
    pub n: usize,
    pub exact_matches: usize,
    pub close_matches: usize,
    pub mean_error: f64,
    pub median_error: f64,
    pub max_error: f64,
    pub min_error: f64,
    /// `mean_error * 100 + (n - exact_matches) * 0.1`; lower is better.
    pub score: f64,
}

impl EvalSummary {
    pub fn exact_pct(&self) -> f64 {
        pct(self.exact_matches, self.n)
    }

    pub fn close_pct(&self) -> f64 {
        pct(self.close_matches, self.n)
    }
}

fn pct(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        100.0 * part as f64 / whole as f64
    }
}

/// Build a scored row for one case.
pub fn score_case(case_num: usize, case: &LabeledCase, predicted: f64) -> EvalRow {
    let (efficiency, spend_per_day) = per_day_rates(&case.trip);
    let signed_error = predicted - case.expected;
    EvalRow {
        case_num,
        trip: case.trip,
        expected: case.expected,
        predicted,
        error: signed_error.abs(),
        signed_error,
        efficiency,
        spend_per_day,
        breakdown: None,
    }
}

/// Summarize errors. Returns `None` for an empty slice.
pub fn summarize(rows: &[EvalRow]) -> Option<EvalSummary> {
    if rows.is_empty() {
        return None;
    }
    let n = rows.len();
    let mut errors: Vec<f64> = rows.iter().map(|r| r.error).collect();
    errors.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let exact_matches = errors.iter().filter(|&&e| e < EXACT_TOLERANCE).count();
    let close_matches = errors.iter().filter(|&&e| e < CLOSE_TOLERANCE).count();
    let mean_error = errors.iter().sum::<f64>() / n as f64;
    let median_error = if n % 2 == 1 {
        errors[n / 2]
    } else {
        (errors[n / 2 - 1] + errors[n / 2]) / 2.0
    };

    Some(EvalSummary {
        n,
        exact_matches,
        close_matches,
        mean_error,
        median_error,
        max_error: errors[n - 1],
        min_error: errors[0],
        score: mean_error * 100.0 + (n - exact_matches) as f64 * 0.1,
    })
}

/// The `top_n` rows with the largest absolute error, worst first.
pub fn top_errors(rows: &[EvalRow], top_n: usize) -> Vec<EvalRow> {
    let mut sorted = rows.to_vec();
    sorted.sort_by(|a, b| b.error.partial_cmp(&a.error).unwrap_or(std::cmp::Ordering::Equal));
    sorted.truncate(top_n);
    sorted
}
