//! Learned estimator: regressor capability, concrete least-squares model, and
//! the troubled-trip cap.

pub mod learned;
pub mod regressor;

pub use learned::*;
pub use regressor::*;
