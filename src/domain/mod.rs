//! Domain types used throughout the estimators and the evaluation harness.
//!
//! This module defines:
//!
//! - the request (`Trip`) and labeled dataset rows (`LabeledCase`)
//! - feature bands and `DerivedFeatures`
//! - estimator outputs (`EstimateResult`, `HeuristicBreakdown`)
//! - run configuration (`TrainConfig`, `EvalConfig`)

pub mod types;

pub use types::*;
