//! Append-only CSV log of heuristic breakdowns.
//!
//! One row per estimate that came with an expected value. The header is
//! written only when the file is new (or empty). All appends go through a
//! single `&mut DiagnosticsLog`, so rows never interleave.
//!
//! Logging is strictly secondary to the estimate: `append_best_effort` logs a
//! warning and carries on if anything about the file fails.

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::warn;

use crate::domain::HeuristicBreakdown;
use crate::error::AppError;

pub const DIAGNOSTICS_HEADER: [&str; 17] = [
    "days",
    "miles",
    "receipts",
    "expected",
    "actual",
    "error",
    "per_diem",
    "mileage",
    "receipts_band",
    "sweet_spot",
    "long_low_penalty",
    "short_high_excessive_bonus",
    "medium_mod_high_bonus",
    "extra_penalty",
    "rounding_bonus",
    "efficiency",
    "spend_per_day",
];

#[derive(Debug, Serialize)]
struct DiagnosticsRow {
    days: f64,
    miles: f64,
    receipts: f64,
    expected: f64,
    actual: f64,
    error: f64,
    per_diem: f64,
    mileage: f64,
    receipts_band: f64,
    sweet_spot: f64,
    long_low_penalty: f64,
    short_high_excessive_bonus: f64,
    medium_mod_high_bonus: f64,
    extra_penalty: f64,
    rounding_bonus: f64,
    efficiency: f64,
    spend_per_day: f64,
}

impl DiagnosticsRow {
    fn new(b: &HeuristicBreakdown, expected: f64) -> Self {
        Self {
            days: b.trip.days,
            miles: b.trip.miles,
            receipts: b.trip.receipts,
            expected,
            actual: b.total,
            error: b.total - expected,
            per_diem: b.per_diem,
            mileage: b.mileage,
            receipts_band: b.receipts_component,
            sweet_spot: b.adjustments.sweet_spot,
            long_low_penalty: b.adjustments.long_low_penalty,
            short_high_excessive_bonus: b.adjustments.short_high_excessive_bonus,
            medium_mod_high_bonus: b.adjustments.medium_mod_high_bonus,
            extra_penalty: b.adjustments.extra_penalty,
            rounding_bonus: b.rounding_bonus,
            efficiency: b.efficiency,
            spend_per_day: b.spend_per_day,
        }
    }
}

/// An open diagnostics log.
pub struct DiagnosticsLog {
    path: PathBuf,
    writer: csv::Writer<File>,
}

impl DiagnosticsLog {
    /// Open `path` for appending, writing the header if the file is new.
    pub fn open(path: &Path) -> Result<Self, AppError> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| AppError::input(format!("Failed to open diagnostics log '{}': {e}", path.display())))?;
        let is_new = file
            .metadata()
            .map(|m| m.len() == 0)
            .map_err(|e| AppError::input(format!("Failed to stat diagnostics log: {e}")))?;

        let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(file);
        if is_new {
            writer
                .write_record(DIAGNOSTICS_HEADER)
                .map_err(|e| AppError::input(format!("Failed to write diagnostics header: {e}")))?;
        }

        Ok(Self {
            path: path.to_path_buf(),
            writer,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one row and flush it.
    pub fn append(&mut self, breakdown: &HeuristicBreakdown, expected: f64) -> Result<(), AppError> {
        self.writer
            .serialize(DiagnosticsRow::new(breakdown, expected))
            .map_err(|e| AppError::input(format!("Failed to write diagnostics row: {e}")))?;
        self.writer
            .flush()
            .map_err(|e| AppError::input(format!("Failed to flush diagnostics log: {e}")))?;
        Ok(())
    }
}

/// Open, append, and swallow any failure with a warning.
pub fn append_best_effort(path: &Path, breakdown: &HeuristicBreakdown, expected: f64) {
    let result = DiagnosticsLog::open(path).and_then(|mut log| log.append(breakdown, expected));
    if let Err(err) = result {
        warn!(path = %path.display(), error = %err, "diagnostics log skipped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Trip;
    use crate::heuristic::breakdown;

    #[test]
    fn header_written_once_and_rows_appended() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("diag.csv");

        let b = breakdown(&Trip::new(1.0, 601.0, 497.70));
        {
            let mut log = DiagnosticsLog::open(&path).unwrap();
            log.append(&b, 644.12).unwrap();
        }
        {
            let mut log = DiagnosticsLog::open(&path).unwrap();
            log.append(&b, 700.0).unwrap();
        }

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], DIAGNOSTICS_HEADER.join(","));
        assert!(lines[1].starts_with("1.0,601.0,497.7,644.12,"));
        assert_eq!(lines[2].split(',').count(), DIAGNOSTICS_HEADER.len());
    }

    #[test]
    fn best_effort_swallows_unwritable_path() {
        let dir = tempfile::tempdir().unwrap();
        // A directory cannot be opened as a log file.
        let b = breakdown(&Trip::new(2.0, 100.0, 50.0));
        append_best_effort(dir.path(), &b, 100.0);
    }
}
