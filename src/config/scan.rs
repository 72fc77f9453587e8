//! Scanning configuration: what to skip and what marks a project.

use crate::{
    detector::{DEFAULT_MARKERS, MarkerDetector, RootDetector},
    filter::{DEFAULT_IGNORED, PathFilter},
};

/// Configuration for how directory trees are traversed.
#[derive(Clone, Debug)]
pub struct ScanOptions {
    /// Whether to emit debug-level traversal events
    pub verbose: bool,

    /// Directory basenames skipped at any depth
    pub ignore: Vec<String>,

    /// Entries whose presence marks a project root
    pub markers: Vec<String>,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            verbose: false,
            ignore: DEFAULT_IGNORED.iter().map(ToString::to_string).collect(),
            markers: DEFAULT_MARKERS.iter().map(ToString::to_string).collect(),
        }
    }
}

impl ScanOptions {
    /// Build the ignore filter described by these options.
    #[must_use]
    pub fn path_filter(&self) -> PathFilter {
        PathFilter::new(self.ignore.iter().cloned())
    }

    /// Build the marker-based root detector described by these options.
    #[must_use]
    pub fn root_detector(&self) -> RootDetector {
        RootDetector::new(Box::new(MarkerDetector::new(self.markers.iter().cloned())))
    }
}
