//! Basename-based ignore rules for directory traversal.

use std::{collections::HashSet, path::Path};

/// Directory names skipped at any depth unless the configuration says otherwise.
pub const DEFAULT_IGNORED: [&str; 10] = [
    ".git",
    ".hg",
    ".svn",
    "node_modules",
    ".cache",
    "build",
    "dist",
    "$RECYCLE.BIN",
    "System Volume Information",
    "Config.Msi",
];

/// Decides whether a directory is on the ignore list.
///
/// Only the final path component is compared, exactly and case-sensitively,
/// so `build` matches `/any/where/build` and `/any/where/build/` but not
/// `/any/where/Build` or `/build/src`.
#[derive(Clone, Debug)]
pub struct PathFilter {
    ignored: HashSet<String>,
}

impl Default for PathFilter {
    fn default() -> Self {
        Self::new(DEFAULT_IGNORED)
    }
}

impl PathFilter {
    /// Build a filter from a set of directory basenames.
    #[must_use]
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ignored: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Add more basenames to the filter.
    #[must_use]
    pub fn with_extra<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignored.extend(names.into_iter().map(Into::into));
        self
    }

    /// Check whether the basename of `path` is ignored.
    ///
    /// Paths without a final component (`/`, `..`) are never ignored.
    #[must_use]
    pub fn is_ignored(&self, path: &Path) -> bool {
        path.file_name()
            .map(|name| name.to_string_lossy())
            .is_some_and(|name| self.ignored.contains(name.as_ref()))
    }

    /// Number of ignored basenames.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ignored.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ignored.is_empty()
    }
}
