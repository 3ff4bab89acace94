//! Labeled dataset ingest.
//!
//! The dataset is a JSON array of
//! `{input: {trip_duration_days, miles_traveled, total_receipts_amount}, expected_output}`.
//!
//! Parsing is strict: a missing field or a negative / non-finite value anywhere
//! is fatal (exit code 2). There is no partial-row recovery.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::Deserialize;

use crate::domain::{LabeledCase, Trip};
use crate::error::{AppError, EXIT_INSUFFICIENT_DATA};

#[derive(Debug, Deserialize)]
struct RawCase {
    input: RawInput,
    expected_output: f64,
}

#[derive(Debug, Deserialize)]
struct RawInput {
    trip_duration_days: f64,
    miles_traveled: f64,
    total_receipts_amount: f64,
}

/// Load and validate a labeled dataset file.
pub fn load_cases(path: &Path) -> Result<Vec<LabeledCase>, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::input(format!("Failed to open dataset '{}': {e}", path.display())))?;
    let cases = parse_cases(BufReader::new(file))
        .map_err(|e| AppError::new(e.exit_code(), format!("{}: {e}", path.display())))?;
    tracing::info!(path = %path.display(), n = cases.len(), "loaded dataset");
    Ok(cases)
}

/// Parse a dataset from any reader.
pub fn parse_cases<R: Read>(reader: R) -> Result<Vec<LabeledCase>, AppError> {
    let raw: Vec<RawCase> =
        serde_json::from_reader(reader).map_err(|e| AppError::input(format!("Invalid dataset JSON: {e}")))?;

    if raw.is_empty() {
        return Err(AppError::new(EXIT_INSUFFICIENT_DATA, "Dataset contains no cases."));
    }

    raw.into_iter()
        .enumerate()
        .map(|(idx, r)| {
            let trip = Trip::new(
                r.input.trip_duration_days,
                r.input.miles_traveled,
                r.input.total_receipts_amount,
            );
            validate_trip(&trip).map_err(|msg| AppError::input(format!("Case {}: {msg}", idx + 1)))?;
            if !r.expected_output.is_finite() {
                return Err(AppError::input(format!("Case {}: expected_output is not finite.", idx + 1)));
            }
            Ok(LabeledCase {
                trip,
                expected: r.expected_output,
            })
        })
        .collect()
}

/// Check that a trip's fields are finite and non-negative.
pub fn validate_trip(trip: &Trip) -> Result<(), String> {
    for (name, value) in [("days", trip.days), ("miles", trip.miles), ("receipts", trip.receipts)] {
        if !value.is_finite() {
            return Err(format!("{name} must be a finite number, got {value}."));
        }
        if value < 0.0 {
            return Err(format!("{name} must be non-negative, got {value}."));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EXIT_INPUT;

    #[test]
    fn parses_well_formed_cases() {
        let json = r#"[
            {"input": {"trip_duration_days": 3, "miles_traveled": 93, "total_receipts_amount": 1.42}, "expected_output": 364.51},
            {"input": {"trip_duration_days": 1, "miles_traveled": 55, "total_receipts_amount": 3.6}, "expected_output": 126.06}
        ]"#;
        let cases = parse_cases(json.as_bytes()).unwrap();
        assert_eq!(cases.len(), 2);
        assert_eq!(cases[0].trip, Trip::new(3.0, 93.0, 1.42));
        assert_eq!(cases[1].expected, 126.06);
    }

    #[test]
    fn missing_field_is_fatal() {
        let json = r#"[{"input": {"trip_duration_days": 3, "miles_traveled": 93}, "expected_output": 1.0}]"#;
        let err = parse_cases(json.as_bytes()).unwrap_err();
        assert_eq!(err.exit_code(), EXIT_INPUT);
        assert!(err.to_string().contains("total_receipts_amount"));
    }

    #[test]
    fn negative_values_are_rejected() {
        let json = r#"[{"input": {"trip_duration_days": 3, "miles_traveled": -1, "total_receipts_amount": 5}, "expected_output": 1.0}]"#;
        let err = parse_cases(json.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("Case 1"));
        assert!(err.to_string().contains("miles"));
    }

    #[test]
    fn empty_dataset_is_insufficient() {
        let err = parse_cases("[]".as_bytes()).unwrap_err();
        assert_eq!(err.exit_code(), EXIT_INSUFFICIENT_DATA);
    }
}
