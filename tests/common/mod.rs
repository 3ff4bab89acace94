use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A scratch working directory with an isolated environment.
pub struct Workspace {
    pub dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("temp dir"),
        }
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    pub fn cmd(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("reimburse");
        cmd.current_dir(self.dir.path())
            .env_remove("REIMBURSE_MODEL_PATH")
            .env_remove("REIMBURSE_DATA_PATH")
            .env_remove("REIMBURSE_LOG_PATH")
            .env_remove("DEBUG_PREDICT")
            .env_remove("DEBUG")
            .env_remove("RUST_LOG");
        cmd
    }

    /// Write `n` synthetic labeled cases to `name`.
    pub fn write_dataset(&self, name: &str, n: usize) -> PathBuf {
        let path = self.path(name);
        write_dataset(&path, n);
        path
    }
}

pub fn write_dataset(path: &Path, n: usize) {
    let cases: Vec<serde_json::Value> = (0..n)
        .map(|i| {
            let days = 1 + (i % 12);
            let miles = 15 + (i * 41) % 1000;
            let receipts = 3.0 + ((i * 67) % 2000) as f64 + 0.17 * (i % 5) as f64;
            let expected = 60.0 + 90.0 * days as f64 + 0.45 * miles as f64 + 0.35 * receipts;
            serde_json::json!({
                "input": {
                    "trip_duration_days": days,
                    "miles_traveled": miles,
                    "total_receipts_amount": receipts,
                },
                "expected_output": expected,
            })
        })
        .collect();
    fs::write(path, serde_json::to_string_pretty(&cases).unwrap()).unwrap();
}
