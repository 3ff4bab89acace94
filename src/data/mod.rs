//! Dataset preparation for training: deterministic train/validation split.

pub mod split;

pub use split::*;
