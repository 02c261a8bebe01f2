//! Helpers for projects that read YAML configuration and write versioned
//! output files.
//!
//! # Modules
//!
//! - [`path`]: versioned file names (`report_v03.csv`) and simple renames
//! - [`config`]: naming constants, versioning options and the YAML loader
//! - [`mapping`]: flattening and escape normalization for nested mappings
//! - [`timing`]: opt-in wall-clock timing of a unit of work
//! - [`logging`]: `tracing` subscriber setup for binaries
//! - [`error`]: error types for path and config operations

pub mod config;
pub mod error;
pub mod logging;
pub mod mapping;
pub mod path;
pub mod timing;
