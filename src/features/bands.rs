//! Band thresholds and the fixed band encoding table.
//!
//! Each band function is a total partition of the real line: every input maps
//! to exactly one label, and NaN falls through to the top band.
//!
//! The integer codes below are the model's feature contract. They are fixed
//! here rather than derived from whatever categories a batch happens to
//! contain, so training and inference always agree.

use crate::domain::{EfficiencyBand, SpendBand, TripBand};

/// Upper (inclusive) day counts for `VeryShort`, `Short`, `Medium`.
const TRIP_BOUNDS: [f64; 3] = [2.0, 4.0, 9.0];
/// Upper (exclusive) miles/day for `Low`, `Moderate`, `High`.
const EFFICIENCY_BOUNDS: [f64; 3] = [50.0, 150.0, 400.0];
/// Upper (exclusive) receipts/day for `Low`, `Mid`, `High`, `VeryHigh`.
const SPEND_BOUNDS: [f64; 4] = [50.0, 150.0, 300.0, 600.0];

pub fn trip_band(days: f64) -> TripBand {
    if days <= TRIP_BOUNDS[0] {
        TripBand::VeryShort
    } else if days <= TRIP_BOUNDS[1] {
        TripBand::Short
    } else if days <= TRIP_BOUNDS[2] {
        TripBand::Medium
    } else {
        TripBand::Long
    }
}

pub fn efficiency_band(efficiency: f64) -> EfficiencyBand {
    if efficiency < EFFICIENCY_BOUNDS[0] {
        EfficiencyBand::Low
    } else if efficiency < EFFICIENCY_BOUNDS[1] {
        EfficiencyBand::Moderate
    } else if efficiency < EFFICIENCY_BOUNDS[2] {
        EfficiencyBand::High
    } else {
        EfficiencyBand::Extreme
    }
}

pub fn spend_band(spend_per_day: f64) -> SpendBand {
    if spend_per_day < SPEND_BOUNDS[0] {
        SpendBand::Low
    } else if spend_per_day < SPEND_BOUNDS[1] {
        SpendBand::Mid
    } else if spend_per_day < SPEND_BOUNDS[2] {
        SpendBand::High
    } else if spend_per_day < SPEND_BOUNDS[3] {
        SpendBand::VeryHigh
    } else {
        SpendBand::Excessive
    }
}

/// Short trip, low efficiency, very high or excessive spend.
pub fn trouble_flag(trip: TripBand, efficiency: EfficiencyBand, spend: SpendBand) -> bool {
    trip == TripBand::Short
        && efficiency == EfficiencyBand::Low
        && matches!(spend, SpendBand::VeryHigh | SpendBand::Excessive)
}

impl TripBand {
    pub fn code(self) -> u8 {
        match self {
            TripBand::VeryShort => 0,
            TripBand::Short => 1,
            TripBand::Medium => 2,
            TripBand::Long => 3,
        }
    }
}

impl EfficiencyBand {
    pub fn code(self) -> u8 {
        match self {
            EfficiencyBand::Low => 0,
            EfficiencyBand::Moderate => 1,
            EfficiencyBand::High => 2,
            EfficiencyBand::Extreme => 3,
        }
    }
}

impl SpendBand {
    pub fn code(self) -> u8 {
        match self {
            SpendBand::Low => 0,
            SpendBand::Mid => 1,
            SpendBand::High => 2,
            SpendBand::VeryHigh => 3,
            SpendBand::Excessive => 4,
        }
    }
}
