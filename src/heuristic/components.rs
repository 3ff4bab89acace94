//! Additive terms of the heuristic formula and their constants.

/// Flat daily allowance.
pub const PER_DIEM_RATE: f64 = 82.0;

/// Miles billed at the tiered (days-dependent) rate.
pub const MILEAGE_TIER_MILES: f64 = 200.0;
pub const MILEAGE_BASE_RATE: f64 = 0.50;
/// Numerator of the `k / sqrt(days)` decay term.
pub const MILEAGE_DECAY: f64 = 0.08;
pub const MILEAGE_CAP_RATE: f64 = 0.58;
/// Rate for miles beyond the first tier.
pub const MILEAGE_FLAT_RATE: f64 = 0.23;

pub const RECEIPTS_PENALTY_BELOW: f64 = 30.0;
pub const RECEIPTS_PENALTY: f64 = -20.0;
pub const RECEIPTS_LINEAR_RATE: f64 = 0.75;
pub const RECEIPTS_LOG_START: f64 = 600.0;
pub const RECEIPTS_LOG_BASE: f64 = 450.0;
pub const RECEIPTS_LOG_COEF: f64 = 55.0;
pub const RECEIPTS_TAIL_START: f64 = 1000.0;
pub const RECEIPTS_TAIL_COEF: f64 = 12.0;

pub const SWEET_SPOT_BONUS: f64 = 1.15;
pub const LONG_LOW_PENALTY: f64 = 0.8;
pub const MEDIUM_LOW_PENALTY: f64 = 0.85;
pub const SHORT_HIGH_EXCESSIVE_BONUS: f64 = 1.3;
pub const MEDIUM_MOD_HIGH_BONUS: f64 = 1.15;
pub const EXTREME_SHORT_SPEND_PENALTY: f64 = 0.85;

/// Flat addend for receipts ending in .49 or .99.
pub const ROUNDING_BONUS: f64 = 20.0;

pub fn per_diem(days: f64) -> f64 {
    PER_DIEM_RATE * days
}

/// Tier rate for the first 200 miles: `min(cap, base + k / sqrt(days))`.
///
/// At `days = 0` the decay term is infinite and the cap applies.
pub fn mileage_rate(days: f64) -> f64 {
    MILEAGE_CAP_RATE.min(MILEAGE_BASE_RATE + MILEAGE_DECAY / days.sqrt())
}

pub fn mileage_component(days: f64, miles: f64) -> f64 {
    mileage_rate(days) * miles.min(MILEAGE_TIER_MILES) + MILEAGE_FLAT_RATE * (miles - MILEAGE_TIER_MILES).max(0.0)
}

/// Piecewise receipts credit with diminishing marginal value above 600.
pub fn receipts_component(receipts: f64) -> f64 {
    if receipts < RECEIPTS_PENALTY_BELOW {
        RECEIPTS_PENALTY
    } else if receipts < RECEIPTS_LOG_START {
        receipts * RECEIPTS_LINEAR_RATE
    } else if receipts < RECEIPTS_TAIL_START {
        RECEIPTS_LOG_BASE + (receipts - RECEIPTS_LOG_START + 1.0).ln() * RECEIPTS_LOG_COEF
    } else {
        receipts_at_tail_start() + (receipts - RECEIPTS_TAIL_START + 1.0).ln() * RECEIPTS_TAIL_COEF
    }
}

/// The `[600, 1000)` segment extrapolated to 1000.
fn receipts_at_tail_start() -> f64 {
    RECEIPTS_LOG_BASE + (RECEIPTS_TAIL_START - RECEIPTS_LOG_START + 1.0).ln() * RECEIPTS_LOG_COEF
}

/// Cents of the receipt total, rounded to the nearest cent first.
pub fn receipt_cents(receipts: f64) -> i64 {
    ((receipts * 100.0).round() as i64).rem_euclid(100)
}

pub fn rounding_bonus(receipts: f64) -> f64 {
    match receipt_cents(receipts) {
        49 | 99 => ROUNDING_BONUS,
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mileage_rate_is_capped_for_short_trips() {
        assert_eq!(mileage_rate(1.0), MILEAGE_CAP_RATE);
        assert_eq!(mileage_rate(0.0), MILEAGE_CAP_RATE);
        assert!((mileage_rate(4.0) - 0.54).abs() < 1e-12);
    }

    #[test]
    fn mileage_is_non_decreasing_in_miles() {
        for &days in &[1.0, 2.0, 3.0, 5.0, 8.0, 14.0] {
            let mut prev = mileage_component(days, 0.0);
            for step in 1..=1200 {
                let miles = step as f64 * 0.5;
                let cur = mileage_component(days, miles);
                assert!(cur >= prev, "days={days} miles={miles}: {cur} < {prev}");
                prev = cur;
            }
        }
    }

    #[test]
    fn mileage_is_continuous_at_tier_boundary() {
        for &days in &[1.0, 4.0, 9.0] {
            let below = mileage_component(days, MILEAGE_TIER_MILES - 1e-9);
            let at = mileage_component(days, MILEAGE_TIER_MILES);
            let above = mileage_component(days, MILEAGE_TIER_MILES + 1e-9);
            assert!((at - below).abs() < 1e-6);
            assert!((above - at).abs() < 1e-6);
        }
    }

    #[test]
    fn receipts_small_claims_are_penalized() {
        assert_eq!(receipts_component(0.0), RECEIPTS_PENALTY);
        assert_eq!(receipts_component(29.99), RECEIPTS_PENALTY);
        assert_eq!(receipts_component(30.0), 22.5);
    }

    #[test]
    fn receipts_continuous_at_600() {
        let below = receipts_component(600.0 - 1e-9);
        let at = receipts_component(600.0);
        assert_eq!(at, RECEIPTS_LOG_BASE);
        assert!((at - below).abs() < 1e-6);
    }

    #[test]
    fn receipts_join_at_1000_is_bounded_by_log_step() {
        let below = receipts_component(1000.0 - 1e-9);
        let at = receipts_component(1000.0);
        let max_jump = RECEIPTS_LOG_COEF * (401.0f64 / 400.0).ln();
        assert!(at >= below);
        assert!(at - below <= max_jump + 1e-6, "jump {} > {max_jump}", at - below);
        assert!((at - receipts_at_tail_start()).abs() < 1e-12);
    }

    #[test]
    fn receipts_tail_grows_slowly() {
        let a = receipts_component(1500.0);
        let b = receipts_component(2500.0);
        assert!(b > a);
        assert!(b - a < 0.1 * 1000.0);
    }

    #[test]
    fn rounding_bonus_on_49_and_99_cents() {
        assert_eq!(rounding_bonus(2321.49), ROUNDING_BONUS);
        assert_eq!(rounding_bonus(10.99), ROUNDING_BONUS);
        assert_eq!(rounding_bonus(10.50), 0.0);
        assert_eq!(rounding_bonus(497.70), 0.0);
        assert_eq!(receipt_cents(1692.73), 73);
    }
}
