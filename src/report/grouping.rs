//! Error grouping for analysis output.
//!
//! The taxonomy here (trip boundaries 2/5/10, efficiency 60/120, spend
//! 50/100/300) exists only for reporting. It is intentionally different from
//! the model feature bands in `features::bands` and must never feed the model.

use std::collections::BTreeMap;

use crate::domain::EvalRow;

/// Reporting-only labels for one row: `(trip, efficiency, spend)`.
pub type GroupKey = (&'static str, &'static str, &'static str);

pub fn report_trip_label(days: f64) -> &'static str {
    if days <= 2.0 {
        "very_short"
    } else if days <= 5.0 {
        "short"
    } else if days <= 10.0 {
        "medium"
    } else {
        "long"
    }
}

pub fn report_efficiency_label(efficiency: f64) -> &'static str {
    if efficiency < 60.0 {
        "low"
    } else if efficiency < 120.0 {
        "mod"
    } else {
        "high"
    }
}

pub fn report_spend_label(spend_per_day: f64) -> &'static str {
    if spend_per_day < 50.0 {
        "low"
    } else if spend_per_day < 100.0 {
        "mid"
    } else if spend_per_day < 300.0 {
        "high"
    } else {
        "excessive"
    }
}

pub fn group_key(row: &EvalRow) -> GroupKey {
    (
        report_trip_label(row.trip.days),
        report_efficiency_label(row.efficiency),
        report_spend_label(row.spend_per_day),
    )
}

/// Signed-error statistics for one group.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupStats {
    pub key: GroupKey,
    pub count: usize,
    /// Mean of `predicted - expected`; positive means overpaying.
    pub mean_signed_error: f64,
}

/// Group rows by the reporting taxonomy, in key order.
pub fn group_errors(rows: &[EvalRow]) -> Vec<GroupStats> {
    let mut acc: BTreeMap<GroupKey, (usize, f64)> = BTreeMap::new();
    for row in rows {
        let entry = acc.entry(group_key(row)).or_insert((0, 0.0));
        entry.0 += 1;
        entry.1 += row.signed_error;
    }
    acc.into_iter()
        .map(|(key, (count, sum))| GroupStats {
            key,
            count,
            mean_signed_error: sum / count as f64,
        })
        .collect()
}

/// Top groups by count, by overpay, and by underpay.
#[derive(Debug, Clone)]
pub struct GroupHighlights {
    pub most_common: Vec<GroupStats>,
    pub most_overpaid: Vec<GroupStats>,
    pub most_underpaid: Vec<GroupStats>,
}

pub fn group_highlights(groups: &[GroupStats], top_n: usize) -> GroupHighlights {
    let mut by_count = groups.to_vec();
    by_count.sort_by(|a, b| b.count.cmp(&a.count).then(a.key.cmp(&b.key)));
    by_count.truncate(top_n);

    let mut over = groups.to_vec();
    over.sort_by(|a, b| {
        b.mean_signed_error
            .partial_cmp(&a.mean_signed_error)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    over.truncate(top_n);

    let mut under = groups.to_vec();
    under.sort_by(|a, b| {
        a.mean_signed_error
            .partial_cmp(&b.mean_signed_error)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    under.truncate(top_n);

    GroupHighlights {
        most_common: by_count,
        most_overpaid: over,
        most_underpaid: under,
    }
}

/// How one heuristic adjustment behaved over a scored dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct AdjustmentStats {
    pub name: &'static str,
    pub triggered: usize,
    pub not_triggered: usize,
    pub mean_error_triggered: Option<f64>,
    pub mean_error_not_triggered: Option<f64>,
    pub mean_signed_error_triggered: Option<f64>,
}

/// Per-adjustment trigger counts and errors; rows without a breakdown are skipped.
pub fn adjustment_stats(rows: &[EvalRow]) -> Vec<AdjustmentStats> {
    let with_breakdown: Vec<_> = rows
        .iter()
        .filter_map(|r| r.breakdown.as_ref().map(|b| (r, b.adjustments.named())))
        .collect();
    if with_breakdown.is_empty() {
        return Vec::new();
    }

    let names = with_breakdown[0].1.map(|(name, _)| name);
    names
        .iter()
        .enumerate()
        .map(|(idx, &name)| {
            let mut on: Vec<&EvalRow> = Vec::new();
            let mut off: Vec<&EvalRow> = Vec::new();
            for (r, adj) in &with_breakdown {
                if adj[idx].1 != 1.0 {
                    on.push(*r);
                } else {
                    off.push(*r);
                }
            }
            AdjustmentStats {
                name,
                triggered: on.len(),
                not_triggered: off.len(),
                mean_error_triggered: mean(on.iter().map(|r| r.error)),
                mean_error_not_triggered: mean(off.iter().map(|r| r.error)),
                mean_signed_error_triggered: mean(on.iter().map(|r| r.signed_error)),
            }
        })
        .collect()
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (n, sum) = values.fold((0usize, 0.0), |(n, s), v| (n + 1, s + v));
    if n == 0 { None } else { Some(sum / n as f64) }
}
