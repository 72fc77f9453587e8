//! Listing the subdirectories a walk may descend into.

use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

use crate::{error::DiscoveryError, filter::PathFilter};

/// Lists the immediate children of a directory that a walk should visit.
///
/// A child is returned only if it is a directory (symlinks are followed),
/// its name does not start with `.`, it can be read, and the [`PathFilter`]
/// does not ignore it. Results are sorted by file name.
#[derive(Clone, Debug)]
pub struct DirectoryLister {
    filter: PathFilter,
}

impl DirectoryLister {
    #[must_use]
    pub const fn new(filter: PathFilter) -> Self {
        Self { filter }
    }

    #[must_use]
    pub const fn filter(&self) -> &PathFilter {
        &self.filter
    }

    /// Visible, readable, non-ignored subdirectories of `dir`.
    ///
    /// If `dir` cannot be read the failure is logged and an empty list is
    /// returned; use [`try_list_children`](Self::try_list_children) to see
    /// the error instead.
    #[must_use]
    pub fn list_children(&self, dir: &Path) -> Vec<PathBuf> {
        match self.try_list_children(dir) {
            Ok(children) => children,
            Err(e) => {
                warn!(dir = %dir.display(), error = %e, "Skipping unreadable directory");
                Vec::new()
            }
        }
    }

    /// Same as [`list_children`](Self::list_children) but reports a failure
    /// to read `dir` itself.
    ///
    /// # Errors
    ///
    /// Returns [`DiscoveryError::UnreadableDirectory`] if `dir` cannot be
    /// opened for listing. Unreadable children are skipped, not reported.
    /// A path that is not a directory has no children.
    pub fn try_list_children(&self, dir: &Path) -> Result<Vec<PathBuf>, DiscoveryError> {
        let mut children = Vec::new();

        for entry in WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
        {
            match entry {
                Ok(entry) => {
                    if self.should_list_entry(&entry) {
                        children.push(entry.into_path());
                    }
                }
                // Errors carrying `dir` itself mean the listing failed as a whole.
                Err(e) if e.path() == Some(dir) => {
                    return Err(DiscoveryError::UnreadableDirectory {
                        path: dir.to_path_buf(),
                        source: e.into(),
                    });
                }
                Err(e) => {
                    debug!(error = %e, "Skipping entry that cannot be read");
                }
            }
        }

        Ok(children)
    }

    fn should_list_entry(&self, entry: &DirEntry) -> bool {
        let path = entry.path();

        if !entry.file_type().is_dir() {
            return false;
        }

        if Self::is_hidden(path) || self.filter.is_ignored(path) {
            return false;
        }

        if !is_readable_dir(path) {
            warn!(dir = %path.display(), "Skipping unreadable directory");
            return false;
        }

        true
    }

    fn is_hidden(path: &Path) -> bool {
        path.file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|name| name.starts_with('.'))
    }
}

/// Whether `path` is a directory whose entries can be listed.
#[must_use]
pub fn is_readable_dir(path: &Path) -> bool {
    path.is_dir() && fs::read_dir(path).is_ok()
}
