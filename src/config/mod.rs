//! Configuration types and options for the application.
//!
//! This module contains the configuration file format and the option structs
//! the binary builds from it and from the command line.

pub mod execution;
pub mod file;
pub mod scan;

pub use execution::ExecutionOptions;
pub use file::{FileConfig, expand_tilde};
pub use scan::ScanOptions;
