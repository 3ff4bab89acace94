//! `reimburse` library crate.
//!
//! The binary (`reimburse`) is a thin wrapper around this library so that:
//!
//! - the estimators are testable without spawning processes
//! - training and inference share one feature-derivation code path
//! - plumbing (CLI, files, reports) stays out of the core

pub mod app;
pub mod cli;
pub mod config;
pub mod data;
pub mod domain;
pub mod error;
pub mod features;
pub mod heuristic;
pub mod io;
pub mod math;
pub mod model;
pub mod report;
