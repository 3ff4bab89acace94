//! Feature Deriver: per-day rates, bands, trouble flag and the model input vector.
//!
//! Shared by the heuristic formula (rates only) and the learned estimator
//! (everything).

pub mod bands;
pub mod vector;

pub use bands::*;
pub use vector::*;
