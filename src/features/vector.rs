//! Derived features and the learned model's input vector.
//!
//! Training and inference both go through `feature_vector`, so the column
//! layout cannot drift between the two paths.

use crate::domain::{DerivedFeatures, Trip};
use crate::features::bands::{efficiency_band, spend_band, trip_band, trouble_flag};

/// Number of model input columns.
pub const FEATURE_LEN: usize = 9;

/// Column names in model input order.
pub const FEATURE_NAMES: [&str; FEATURE_LEN] = [
    "days",
    "miles",
    "receipts",
    "efficiency",
    "spend_per_day",
    "trip_band",
    "efficiency_band",
    "spend_band",
    "trouble_flag",
];

pub type FeatureVector = [f64; FEATURE_LEN];

/// `(miles / days, receipts / days)`, or zeros when `days` is not positive.
pub fn per_day_rates(trip: &Trip) -> (f64, f64) {
    if trip.days > 0.0 {
        (trip.miles / trip.days, trip.receipts / trip.days)
    } else {
        (0.0, 0.0)
    }
}

/// Compute all derived features for a trip.
pub fn derive(trip: &Trip) -> DerivedFeatures {
    let (efficiency, spend_per_day) = per_day_rates(trip);
    let trip_band = trip_band(trip.days);
    let efficiency_band = efficiency_band(efficiency);
    let spend_band = spend_band(spend_per_day);

    DerivedFeatures {
        efficiency,
        spend_per_day,
        trip_band,
        efficiency_band,
        spend_band,
        trouble_flag: trouble_flag(trip_band, efficiency_band, spend_band),
    }
}

/// Encode a trip and its derived features in `FEATURE_NAMES` order.
pub fn encode(trip: &Trip, features: &DerivedFeatures) -> FeatureVector {
    [
        trip.days,
        trip.miles,
        trip.receipts,
        features.efficiency,
        features.spend_per_day,
        f64::from(features.trip_band.code()),
        f64::from(features.efficiency_band.code()),
        f64::from(features.spend_band.code()),
        if features.trouble_flag { 1.0 } else { 0.0 },
    ]
}

/// Derive and encode in one step.
pub fn feature_vector(trip: &Trip) -> FeatureVector {
    encode(trip, &derive(trip))
}
