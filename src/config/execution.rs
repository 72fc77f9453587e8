//! Execution configuration for a discovery invocation.
//!
//! This module defines the options that control what the binary does around
//! a discovery run: whether results are persisted, how they are printed, and
//! whether the user is prompted for a directory.

/// Configuration for how a discovery invocation is executed.
#[derive(Clone, Debug, Default)]
#[allow(clippy::struct_excessive_bools)]
pub struct ExecutionOptions {
    /// Whether to walk without saving newly found projects
    pub dry_run: bool,

    /// Whether to print the known projects instead of scanning
    pub list: bool,

    /// Whether to emit a single JSON document on stdout
    pub json: bool,

    /// Whether to prompt for the directory and depth to scan
    pub interactive: bool,
}
