//! Closed-form heuristic estimator.
//!
//! ```text
//! total = (per_diem + mileage + receipts_component) * Π adjustments + rounding_bonus
//! ```
//!
//! The adjustments use their own inline ranges on `(days, efficiency,
//! spend_per_day)`. They are deliberately independent of the Feature Deriver's
//! bands and must not be unified with them.
//!
//! Everything here is pure. Logging a breakdown is the caller's business
//! (see `io::diagnostics`).

use crate::domain::{Adjustments, EstimateResult, HeuristicBreakdown, Trip};
use crate::features::per_day_rates;

pub mod components;

pub use components::*;

/// Evaluate the formula and return the full breakdown (unrounded total).
pub fn breakdown(trip: &Trip) -> HeuristicBreakdown {
    let per_diem = per_diem(trip.days);
    let mileage = mileage_component(trip.days, trip.miles);
    let receipts_component = receipts_component(trip.receipts);
    let (efficiency, spend_per_day) = per_day_rates(trip);
    let adjustments = adjustments(trip.days, efficiency, spend_per_day);
    let rounding_bonus = rounding_bonus(trip.receipts);

    let total = (per_diem + mileage + receipts_component) * adjustments.product() + rounding_bonus;

    HeuristicBreakdown {
        trip: *trip,
        per_diem,
        mileage,
        receipts_component,
        adjustments,
        rounding_bonus,
        efficiency,
        spend_per_day,
        total,
    }
}

/// Heuristic estimate rounded to cents, with its breakdown attached.
pub fn estimate(trip: &Trip) -> EstimateResult {
    let detail = breakdown(trip);
    EstimateResult {
        amount: round_cents(detail.total),
        diagnostics: Some(detail),
    }
}

/// Multiplicative adjustments keyed on inline range conditions.
pub fn adjustments(days: f64, efficiency: f64, spend_per_day: f64) -> Adjustments {
    let mut adj = Adjustments::default();

    if (180.0..=220.0).contains(&efficiency) && (4.0..=6.0).contains(&days) && spend_per_day < 120.0 {
        adj.sweet_spot = SWEET_SPOT_BONUS;
    }

    if efficiency < 90.0 && spend_per_day < 100.0 {
        if days > 10.0 {
            adj.long_low_penalty = LONG_LOW_PENALTY;
        } else if days > 5.0 {
            adj.long_low_penalty = MEDIUM_LOW_PENALTY;
        }
    }

    if days <= 2.0 && efficiency >= 120.0 && spend_per_day >= 300.0 {
        adj.short_high_excessive_bonus = SHORT_HIGH_EXCESSIVE_BONUS;
    }

    if days > 3.0
        && days <= 10.0
        && efficiency > 60.0
        && efficiency < 120.0
        && spend_per_day > 100.0
        && spend_per_day < 300.0
    {
        adj.medium_mod_high_bonus = MEDIUM_MOD_HIGH_BONUS;
    }

    if days <= 2.0 && spend_per_day > 400.0 {
        adj.extra_penalty = EXTREME_SHORT_SPEND_PENALTY;
    }

    adj
}

/// Round to 2 decimal places from the exact binary value.
///
/// Must not scale by 100 first: `589.754999..` would become `58975.5` and
/// round up.
pub fn round_cents(value: f64) -> f64 {
    format!("{value:.2}").parse().unwrap_or(value)
}
