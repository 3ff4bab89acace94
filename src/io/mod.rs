//! Input/output helpers.
//!
//! - labeled dataset JSON ingest (`dataset`)
//! - trained model artifact read/write (`artifact`)
//! - append-only heuristic diagnostics log (`diagnostics`)
//! - evaluation result exports (`export`)

pub mod artifact;
pub mod dataset;
pub mod diagnostics;
pub mod export;

pub use artifact::*;
pub use dataset::*;
pub use diagnostics::*;
pub use export::*;
