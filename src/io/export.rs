//! Export per-case evaluation results to CSV.
//!
//! The export is meant to be easy to consume in spreadsheets or downstream scripts.

use std::path::Path;

use serde::Serialize;

use crate::domain::EvalRow;
use crate::error::AppError;

#[derive(Debug, Serialize)]
struct ResultRow {
    case_num: usize,
    days: f64,
    miles: f64,
    receipts: f64,
    expected: f64,
    predicted: f64,
    error: f64,
    signed_error: f64,
    efficiency: f64,
    spend_per_day: f64,
}

impl From<&EvalRow> for ResultRow {
    fn from(r: &EvalRow) -> Self {
        Self {
            case_num: r.case_num,
            days: r.trip.days,
            miles: r.trip.miles,
            receipts: r.trip.receipts,
            expected: r.expected,
            predicted: r.predicted,
            error: r.error,
            signed_error: r.signed_error,
            efficiency: r.efficiency,
            spend_per_day: r.spend_per_day,
        }
    }
}

/// Write per-case evaluation results to a CSV file, replacing any previous one.
pub fn write_results_csv(path: &Path, rows: &[EvalRow]) -> Result<(), AppError> {
    let mut writer = csv::Writer::from_path(path)
        .map_err(|e| AppError::input(format!("Failed to create export CSV '{}': {e}", path.display())))?;

    for r in rows {
        writer
            .serialize(ResultRow::from(r))
            .map_err(|e| AppError::input(format!("Failed to write export CSV row: {e}")))?;
    }

    writer
        .flush()
        .map_err(|e| AppError::input(format!("Failed to flush export CSV: {e}")))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Trip;

    fn scored(case_num: usize) -> EvalRow {
        EvalRow {
            case_num,
            trip: Trip::new(3.0, 93.0, 1.42),
            expected: 364.51,
            predicted: 360.25,
            error: 4.26,
            signed_error: -4.26,
            efficiency: 31.0,
            spend_per_day: 0.5,
            breakdown: None,
        }
    }

    #[test]
    fn export_writes_header_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");

        write_results_csv(&path, &[scored(1), scored(2)]).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            "case_num,days,miles,receipts,expected,predicted,error,signed_error,efficiency,spend_per_day"
        );
        assert!(lines[2].starts_with("2,"));
    }

    #[test]
    fn exported_values_read_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        write_results_csv(&path, &[scored(7)]).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let record = reader.records().next().unwrap().unwrap();
        let values: Vec<f64> = record.iter().map(|v| v.parse().unwrap()).collect();
        assert_eq!(values, vec![7.0, 3.0, 93.0, 1.42, 364.51, 360.25, 4.26, -4.26, 31.0, 0.5]);
    }
}
