//! Environment-backed settings.
//!
//! `.env` is loaded first (if present), then the process environment is read.
//! CLI flags take precedence over everything here.

use std::path::PathBuf;

pub const DEFAULT_MODEL_PATH: &str = "reg_model.json";
pub const DEFAULT_DATA_PATH: &str = "public_cases.json";
pub const DEFAULT_LOG_PATH: &str = "errors_summary.csv";

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub model_path: PathBuf,
    pub data_path: PathBuf,
    pub log_path: PathBuf,
    /// `DEBUG_PREDICT=1`: print the signed error of learned predictions.
    pub debug_predict: bool,
    /// `DEBUG` set and non-empty: print heuristic error diagnostics.
    pub debug: bool,
}

impl Settings {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let path = |key: &str, default: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(default))
        };

        Self {
            model_path: path("REIMBURSE_MODEL_PATH", DEFAULT_MODEL_PATH),
            data_path: path("REIMBURSE_DATA_PATH", DEFAULT_DATA_PATH),
            log_path: path("REIMBURSE_LOG_PATH", DEFAULT_LOG_PATH),
            debug_predict: lookup("DEBUG_PREDICT").as_deref() == Some("1"),
            debug: lookup("DEBUG").is_some_and(|v| !v.is_empty()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let s = Settings::from_lookup(lookup(&[]));
        assert_eq!(s.model_path, PathBuf::from(DEFAULT_MODEL_PATH));
        assert_eq!(s.data_path, PathBuf::from(DEFAULT_DATA_PATH));
        assert_eq!(s.log_path, PathBuf::from(DEFAULT_LOG_PATH));
        assert!(!s.debug_predict);
        assert!(!s.debug);
    }

    #[test]
    fn env_overrides_and_flags() {
        let s = Settings::from_lookup(lookup(&[
            ("REIMBURSE_MODEL_PATH", "/tmp/m.json"),
            ("DEBUG_PREDICT", "1"),
            ("DEBUG", "yes"),
        ]));
        assert_eq!(s.model_path, PathBuf::from("/tmp/m.json"));
        assert!(s.debug_predict);
        assert!(s.debug);
    }

    #[test]
    fn debug_predict_requires_exactly_one() {
        let s = Settings::from_lookup(lookup(&[("DEBUG_PREDICT", "true"), ("DEBUG", "")]));
        assert!(!s.debug_predict);
        assert!(!s.debug);
    }
}
