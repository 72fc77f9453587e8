//! Error types for discovery, detection and persistence.
//!
//! None of these errors abort a discovery run. They exist so callers (and
//! tests) can tell "definitively nothing here" apart from "something went
//! wrong while looking".

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while walking the configured directory trees.
#[derive(Error, Debug)]
pub enum DiscoveryError {
    /// A directory could not be listed or stat'd.
    #[error("Cannot read directory {}", .path.display())]
    UnreadableDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A configured `(path, depth)` entry failed validation.
    #[error("Invalid search path {path:?} (depth {depth}): {reason}")]
    InvalidSpec {
        path: String,
        depth: i64,
        reason: &'static str,
    },
}

/// Errors raised by a [`ProjectDetector`](crate::detector::ProjectDetector).
#[derive(Error, Debug)]
pub enum DetectionError {
    /// The candidate directory itself cannot be read.
    #[error("Cannot read candidate directory {}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Probing a marker entry failed for a reason other than "not found".
    #[error("Failed to probe {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A marker exists but its content is not what the backend expects.
    #[error("Malformed project metadata at {}: {message}", .path.display())]
    MalformedMetadata { path: PathBuf, message: String },
}

/// Errors raised by a [`ProjectStore`](crate::project::ProjectStore).
#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("I/O error on project list {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid project list {}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to determine the data directory for the project list")]
    NoDataDir,
}
