//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the estimators and statistics stay clean and testable
//! - output changes are localized

use crate::domain::{EstimatorKind, EvalRow, HeuristicBreakdown};
use crate::features::derive;
use crate::report::EvalSummary;
use crate::report::grouping::{AdjustmentStats, GroupHighlights, GroupStats};

/// Format the evaluation summary block.
pub fn format_summary(summary: &EvalSummary, estimator: EstimatorKind) -> String {
    let mut out = String::new();

    out.push_str(&format!("=== reimburse - batch evaluation ({}) ===\n", estimator.display_name()));
    out.push_str(&format!("Total test cases: {}\n", summary.n));
    out.push_str(&format!(
        "Exact matches (±$0.01): {} ({:.1}%)\n",
        summary.exact_matches,
        summary.exact_pct()
    ));
    out.push_str(&format!(
        "Close matches (±$1.00): {} ({:.1}%)\n",
        summary.close_matches,
        summary.close_pct()
    ));
    out.push_str(&format!("Mean Absolute Error: ${:.2}\n", summary.mean_error));
    out.push_str(&format!("Median Error: ${:.2}\n", summary.median_error));
    out.push_str(&format!("Maximum Error: ${:.2}\n", summary.max_error));
    out.push_str(&format!("Minimum Error: ${:.2}\n", summary.min_error));
    out.push_str(&format!("\nScore: {:.2} (lower is better)\n", summary.score));

    out
}

/// Format the high-error case table.
pub fn format_top_errors(rows: &[EvalRow]) -> String {
    let mut out = String::new();
    out.push_str(&format!("Top {} High-Error Cases:\n", rows.len()));
    push_line(
        &mut out,
        format!(
            "{:>8} {:>6} {:>8} {:>10} {:>10} {:>10} {:>10}",
            "case_num", "days", "miles", "receipts", "expected", "predicted", "error"
        ),
    );
    push_line(
        &mut out,
        format!(
            "{:-<8} {:-<6} {:-<8} {:-<10} {:-<10} {:-<10} {:-<10}",
            "", "", "", "", "", "", ""
        ),
    );

    for r in rows {
        push_line(
            &mut out,
            format!(
                "{:>8} {:>6} {:>8} {:>10.2} {:>10.2} {:>10.2} {:>10.2}",
                r.case_num, r.trip.days, r.trip.miles, r.trip.receipts, r.expected, r.predicted, r.error
            ),
        );
    }

    out
}

/// Format group highlights from the reporting taxonomy.
pub fn format_group_highlights(highlights: &GroupHighlights) -> String {
    let mut out = String::new();

    out.push_str("Most common groups (by count):\n");
    out.push_str(&format_group_table(&highlights.most_common));
    out.push('\n');

    out.push_str("Groups by mean overpay (largest positive mean):\n");
    out.push_str(&format_group_table(&highlights.most_overpaid));
    out.push('\n');

    out.push_str("Groups by mean underpay (most negative mean):\n");
    out.push_str(&format_group_table(&highlights.most_underpaid));

    out
}

fn format_group_table(groups: &[GroupStats]) -> String {
    let mut out = String::new();
    push_line(
        &mut out,
        format!("{:<12} {:<10} {:<10} {:>12} {:>6}", "trip", "efficiency", "spend", "mean_error", "count"),
    );
    for g in groups {
        push_line(
            &mut out,
            format!(
                "{:<12} {:<10} {:<10} {:>12.2} {:>6}",
                g.key.0, g.key.1, g.key.2, g.mean_signed_error, g.count
            ),
        );
    }
    out
}

/// Format per-adjustment trigger statistics.
pub fn format_adjustment_stats(stats: &[AdjustmentStats]) -> String {
    let mut out = String::new();
    out.push_str("Heuristic adjustments:\n");
    push_line(
        &mut out,
        format!(
            "{:<28} {:>9} {:>12} {:>12} {:>12}",
            "adjustment", "triggered", "err_on", "err_off", "signed_on"
        ),
    );
    for s in stats {
        push_line(
            &mut out,
            format!(
                "{:<28} {:>9} {:>12} {:>12} {:>12}",
                s.name,
                s.triggered,
                fmt_opt(s.mean_error_triggered),
                fmt_opt(s.mean_error_not_triggered),
                fmt_opt(s.mean_signed_error_triggered),
            ),
        );
    }
    out
}

/// Format the result of a training run.
pub fn format_training(n_train: usize, n_validation: usize, validation_mae: Option<f64>, model_path: &str) -> String {
    let mut out = String::new();
    out.push_str(&format!("Trained on {n_train} cases, validated on {n_validation}.\n"));
    match validation_mae {
        Some(mae) => out.push_str(&format!("Validation Mean Absolute Error: {mae:.2}\n")),
        None => out.push_str("Validation Mean Absolute Error: n/a (no validation cases)\n"),
    }
    out.push_str(&format!("Model saved to: {model_path}\n"));
    out
}

/// Errors above this are called out by the heuristic debug report.
pub const HIGH_ERROR_THRESHOLD: f64 = 200.0;

/// Debug report for a heuristic estimate that missed by more than
/// `HIGH_ERROR_THRESHOLD`; `None` otherwise.
pub fn format_high_error_case(b: &HeuristicBreakdown, expected: f64) -> Option<String> {
    let error = (b.total - expected).abs();
    if !(error > HIGH_ERROR_THRESHOLD) {
        return None;
    }

    let mut out = String::new();
    out.push_str("High error case:\n");
    out.push_str(&format!(
        "Inputs: {} days, {} miles, ${:.2} receipts\n",
        b.trip.days, b.trip.miles, b.trip.receipts
    ));
    out.push_str(&format!("Expected: ${expected:.2}, Got: ${:.2}, Error: {error:.2}\n", b.total));
    let features = derive(&b.trip);
    out.push_str(&format!(
        "Bands: trip={} efficiency={} spend={} trouble={}\n",
        features.trip_band.label(),
        features.efficiency_band.label(),
        features.spend_band.label(),
        features.trouble_flag
    ));
    for (name, factor) in b.adjustments.named() {
        if factor != 1.0 {
            out.push_str(&format!("[adjustment] {name}: {factor}x\n"));
        }
    }
    Some(out)
}

fn fmt_opt(v: Option<f64>) -> String {
    v.map(|x| format!("{x:.2}")).unwrap_or_else(|| "-".to_string())
}

fn push_line(out: &mut String, line: String) {
    out.push_str(line.trim_end());
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::test_support::row;
    use crate::report::{summarize, top_errors};

    #[test]
    fn summary_mentions_score_and_counts() {
        let rows = vec![row(1, 1.0, 1.0, 1.0, 10.0, 10.0), row(2, 1.0, 1.0, 1.0, 10.0, 12.0)];
        let s = summarize(&rows).unwrap();
        let text = format_summary(&s, EstimatorKind::Heuristic);
        assert!(text.contains("Total test cases: 2"));
        assert!(text.contains("Exact matches (±$0.01): 1 (50.0%)"));
        assert!(text.contains("Score: 100.10"));
    }

    #[test]
    fn top_errors_table_has_one_line_per_row() {
        let rows = vec![row(1, 1.0, 1.0, 1.0, 10.0, 11.0), row(7, 2.0, 5.0, 3.0, 10.0, 30.0)];
        let text = format_top_errors(&top_errors(&rows, 5));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[3].trim_start().starts_with('7'));
        assert!(lines.iter().all(|l| !l.ends_with(' ')));
    }

    #[test]
    fn high_error_report_lists_triggered_adjustments() {
        let b = crate::heuristic::breakdown(&crate::domain::Trip::new(1.0, 601.0, 497.70));
        assert!(format_high_error_case(&b, 700.0).is_none());

        let text = format_high_error_case(&b, 100.0).unwrap();
        assert!(text.contains("Expected: $100.00, Got: $733.17"));
        assert!(text.contains("short_high_excessive_bonus: 1.3x"));
        assert!(text.contains("extra_penalty: 0.85x"));
        assert!(text.contains("Bands: trip=very_short efficiency=extreme spend=very_high trouble=false"));
        assert!(!text.contains("sweet_spot"));
    }

    #[test]
    fn training_summary_handles_missing_mae() {
        let text = format_training(10, 0, None, "m.json");
        assert!(text.contains("n/a"));
        assert!(text.contains("m.json"));
    }
}
