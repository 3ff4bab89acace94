//! Shared domain types.
//!
//! These types are intentionally kept small and `Copy` where possible so the
//! estimators can stay pure functions of their inputs:
//!
//! - `Trip` is the request (days, miles, receipts)
//! - the band enums and `DerivedFeatures` are the Feature Deriver's output
//! - `HeuristicBreakdown` is the structured diagnostics record of the formula

use std::path::PathBuf;

use clap::ValueEnum;

/// One reimbursement request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Trip {
    pub days: f64,
    pub miles: f64,
    pub receipts: f64,
}

impl Trip {
    pub fn new(days: f64, miles: f64, receipts: f64) -> Self {
        Self { days, miles, receipts }
    }
}

/// Trip-length band used for model features.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TripBand {
    VeryShort,
    Short,
    Medium,
    Long,
}

/// Miles-per-day band used for model features.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EfficiencyBand {
    Low,
    Moderate,
    High,
    Extreme,
}

/// Receipts-per-day band used for model features.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpendBand {
    Low,
    Mid,
    High,
    VeryHigh,
    Excessive,
}

impl TripBand {
    pub const ALL: [TripBand; 4] = [TripBand::VeryShort, TripBand::Short, TripBand::Medium, TripBand::Long];

    pub fn label(self) -> &'static str {
        match self {
            TripBand::VeryShort => "very_short",
            TripBand::Short => "short",
            TripBand::Medium => "medium",
            TripBand::Long => "long",
        }
    }
}

impl EfficiencyBand {
    pub const ALL: [EfficiencyBand; 4] = [
        EfficiencyBand::Low,
        EfficiencyBand::Moderate,
        EfficiencyBand::High,
        EfficiencyBand::Extreme,
    ];

    pub fn label(self) -> &'static str {
        match self {
            EfficiencyBand::Low => "low",
            EfficiencyBand::Moderate => "moderate",
            EfficiencyBand::High => "high",
            EfficiencyBand::Extreme => "extreme",
        }
    }
}

impl SpendBand {
    pub const ALL: [SpendBand; 5] = [
        SpendBand::Low,
        SpendBand::Mid,
        SpendBand::High,
        SpendBand::VeryHigh,
        SpendBand::Excessive,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SpendBand::Low => "low",
            SpendBand::Mid => "mid",
            SpendBand::High => "high",
            SpendBand::VeryHigh => "very_high",
            SpendBand::Excessive => "excessive",
        }
    }
}

/// Everything the Feature Deriver computes for one trip.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedFeatures {
    pub efficiency: f64,
    pub spend_per_day: f64,
    pub trip_band: TripBand,
    pub efficiency_band: EfficiencyBand,
    pub spend_band: SpendBand,
    pub trouble_flag: bool,
}

/// Multiplicative adjustments of the heuristic formula.
///
/// Each factor is either `1.0` (not triggered) or its override value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Adjustments {
    pub sweet_spot: f64,
    pub long_low_penalty: f64,
    pub short_high_excessive_bonus: f64,
    pub medium_mod_high_bonus: f64,
    pub extra_penalty: f64,
}

impl Default for Adjustments {
    fn default() -> Self {
        Self {
            sweet_spot: 1.0,
            long_low_penalty: 1.0,
            short_high_excessive_bonus: 1.0,
            medium_mod_high_bonus: 1.0,
            extra_penalty: 1.0,
        }
    }
}

impl Adjustments {
    /// Product of all factors; overlapping conditions compound.
    pub fn product(&self) -> f64 {
        self.sweet_spot
            * self.long_low_penalty
            * self.short_high_excessive_bonus
            * self.medium_mod_high_bonus
            * self.extra_penalty
    }

    /// `(name, factor)` pairs in column order.
    pub fn named(&self) -> [(&'static str, f64); 5] {
        [
            ("sweet_spot", self.sweet_spot),
            ("long_low_penalty", self.long_low_penalty),
            ("short_high_excessive_bonus", self.short_high_excessive_bonus),
            ("medium_mod_high_bonus", self.medium_mod_high_bonus),
            ("extra_penalty", self.extra_penalty),
        ]
    }
}

/// Structured diagnostics record of one heuristic evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeuristicBreakdown {
    pub trip: Trip,
    pub per_diem: f64,
    pub mileage: f64,
    pub receipts_component: f64,
    pub adjustments: Adjustments,
    pub rounding_bonus: f64,
    pub efficiency: f64,
    pub spend_per_day: f64,
    /// Unrounded total.
    pub total: f64,
}

/// Result of either estimator.
#[derive(Debug, Clone, PartialEq)]
pub struct EstimateResult {
    /// Amount rounded to cents.
    pub amount: f64,
    /// Multiplier breakdown (heuristic estimator only).
    pub diagnostics: Option<HeuristicBreakdown>,
}

/// A trip with its known reimbursement, as read from the dataset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabeledCase {
    pub trip: Trip,
    pub expected: f64,
}

/// A scored dataset case (used for statistics, outliers and exports).
#[derive(Debug, Clone)]
pub struct EvalRow {
    /// 1-based position in the dataset.
    pub case_num: usize,
    pub trip: Trip,
    pub expected: f64,
    pub predicted: f64,
    /// `|predicted - expected|`.
    pub error: f64,
    /// `predicted - expected`.
    pub signed_error: f64,
    pub efficiency: f64,
    pub spend_per_day: f64,
    pub breakdown: Option<HeuristicBreakdown>,
}

/// Which estimator a batch evaluation runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EstimatorKind {
    Learned,
    Heuristic,
}

impl EstimatorKind {
    pub fn display_name(self) -> &'static str {
        match self {
            EstimatorKind::Learned => "learned regression",
            EstimatorKind::Heuristic => "heuristic formula",
        }
    }
}

/// Training run configuration, derived from CLI flags plus settings.
#[derive(Debug, Clone)]
pub struct TrainConfig {
    pub data_path: PathBuf,
    pub model_path: PathBuf,
    /// Fraction of cases held out for validation.
    pub validation_fraction: f64,
    pub seed: u64,
}

/// Batch evaluation configuration, derived from CLI flags plus settings.
#[derive(Debug, Clone)]
pub struct EvalConfig {
    pub data_path: PathBuf,
    pub model_path: PathBuf,
    pub estimator: EstimatorKind,
    pub top_n: usize,
    pub export: Option<PathBuf>,
    pub groups: bool,
    /// Heuristic diagnostics log (heuristic estimator only).
    pub diagnostics_log: Option<PathBuf>,
}
