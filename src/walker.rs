//! Depth-bounded traversal of a single directory tree.

use std::path::Path;

use tracing::{debug, info, warn};

use crate::{
    detector::{Detection, RootDetector},
    discovery::RunCounters,
    filter::PathFilter,
    lister::{DirectoryLister, is_readable_dir},
    project::{ProjectRegistry, Registration, canonicalize},
};

/// Walks a directory tree depth-first, registering every project root found.
///
/// Every visited directory is checked for root status, including the
/// subdirectories of projects already found, so nested projects are picked
/// up. Recursion stops when the remaining depth reaches zero. There is no
/// cycle detection: the depth bound is what keeps symlink loops finite.
pub struct Walker {
    lister: DirectoryLister,
    detector: RootDetector,
}

impl Walker {
    #[must_use]
    pub const fn new(filter: PathFilter, detector: RootDetector) -> Self {
        Self {
            lister: DirectoryLister::new(filter),
            detector,
        }
    }

    fn filter(&self) -> &PathFilter {
        self.lister.filter()
    }

    /// Examine `dir` and, while `depth` allows, its descendants.
    ///
    /// `depth == 0` checks `dir` only. Missing, unreadable and ignored
    /// directories end the branch silently.
    pub fn walk(
        &self,
        dir: &Path,
        depth: usize,
        registry: &mut ProjectRegistry,
        counters: &mut RunCounters,
    ) {
        if !is_readable_dir(dir) {
            debug!(dir = %dir.display(), "Not a readable directory");
            return;
        }

        self.visit(dir, depth, registry, counters);
    }

    /// Walk a directory already known to be readable. Children come from the
    /// lister, which only returns readable directories.
    fn visit(
        &self,
        dir: &Path,
        depth: usize,
        registry: &mut ProjectRegistry,
        counters: &mut RunCounters,
    ) {
        let dir = canonicalize(dir);
        debug!(dir = %dir.display(), depth, "Walking directory");

        if self.filter().is_ignored(&dir) {
            debug!(dir = %dir.display(), "Ignored directory");
            return;
        }

        debug!(dir = %dir.display(), "Scanning directory");
        self.check_root(&dir, registry, counters);

        if depth == 0 {
            return;
        }

        for child in self.lister.list_children(&dir) {
            self.visit(&child, depth - 1, registry, counters);
        }
    }

    fn check_root(&self, dir: &Path, registry: &mut ProjectRegistry, counters: &mut RunCounters) {
        match self.detector.detect_readable(dir) {
            Detection::Root(root) => {
                counters.found += 1;
                info!(project = %root, "Found project root");

                if registry.register(root) == Registration::Registered {
                    counters.added += 1;
                }
            }
            Detection::NotRoot => {}
            Detection::Failed(e) => {
                warn!(dir = %dir.display(), error = %e, "Project detection failed");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detector::MarkerDetector;
    use crate::project::ProjectRoot;
    use std::fs;
    use tempfile::TempDir;

    fn walker() -> Walker {
        Walker::new(
            PathFilter::default(),
            RootDetector::new(Box::new(MarkerDetector::new([".git"]))),
        )
    }

    fn make_repo(path: &Path) {
        fs::create_dir_all(path.join(".git")).unwrap();
    }

    fn walk(dir: &Path, depth: usize) -> (ProjectRegistry, RunCounters) {
        let mut registry = ProjectRegistry::new();
        let mut counters = RunCounters::default();
        walker().walk(dir, depth, &mut registry, &mut counters);
        (registry, counters)
    }

    #[test]
    fn test_depth_zero_checks_only_the_directory() {
        let tmp = TempDir::new().unwrap();
        make_repo(&tmp.path().join("child"));

        let (registry, counters) = walk(tmp.path(), 0);

        assert_eq!(counters, RunCounters { found: 0, added: 0 });
        assert!(registry.is_empty());
    }

    #[test]
    fn test_depth_zero_still_registers_the_directory_itself() {
        let tmp = TempDir::new().unwrap();
        let repo = tmp.path().join("repo");
        make_repo(&repo);

        let (registry, counters) = walk(&repo, 0);

        assert_eq!(counters, RunCounters { found: 1, added: 1 });
        assert!(registry.contains(&ProjectRoot::new(&repo)));
    }

    #[test]
    fn test_root_is_found_only_within_depth() {
        let tmp = TempDir::new().unwrap();
        make_repo(&tmp.path().join("a/b/c"));

        for depth in 0..3 {
            let (_, counters) = walk(tmp.path(), depth);
            assert_eq!(counters.found, 0, "depth {depth}");
        }
        for depth in 3..5 {
            let (_, counters) = walk(tmp.path(), depth);
            assert_eq!(counters.found, 1, "depth {depth}");
        }
    }

    #[test]
    fn test_ignored_directory_and_descendants_are_skipped() {
        let tmp = TempDir::new().unwrap();
        make_repo(&tmp.path().join("node_modules/pkg"));
        make_repo(&tmp.path().join("build/deep/repo"));
        make_repo(&tmp.path().join("src/app"));

        let (registry, counters) = walk(tmp.path(), 5);

        assert_eq!(counters.found, 1);
        assert_eq!(registry.roots(), &[ProjectRoot::new(tmp.path().join("src/app"))]);
    }

    #[test]
    fn test_ignored_start_directory_is_skipped() {
        let tmp = TempDir::new().unwrap();
        let dist = tmp.path().join("dist");
        make_repo(&dist);

        let (_, counters) = walk(&dist, 3);

        assert_eq!(counters.found, 0);
    }

    #[test]
    fn test_missing_start_directory_is_a_no_op() {
        let tmp = TempDir::new().unwrap();

        let (registry, counters) = walk(&tmp.path().join("missing"), 3);

        assert_eq!(counters, RunCounters::default());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_nested_projects_are_discovered() {
        let tmp = TempDir::new().unwrap();
        let outer = tmp.path().join("outer");
        make_repo(&outer);
        make_repo(&outer.join("vendor/inner"));
        fs::create_dir_all(outer.join("src/module")).unwrap();

        let (registry, counters) = walk(tmp.path(), 3);

        assert_eq!(counters, RunCounters { found: 2, added: 2 });
        assert!(registry.contains(&ProjectRoot::new(&outer)));
        assert!(registry.contains(&ProjectRoot::new(outer.join("vendor/inner"))));
    }

    #[test]
    fn test_known_projects_count_as_found_but_not_added() {
        let tmp = TempDir::new().unwrap();
        let repo = tmp.path().join("repo");
        make_repo(&repo);

        let mut registry = ProjectRegistry::from_roots([ProjectRoot::new(&repo)]);
        let mut counters = RunCounters::default();
        walker().walk(tmp.path(), 1, &mut registry, &mut counters);

        assert_eq!(counters, RunCounters { found: 1, added: 0 });
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_detection_failure_does_not_stop_the_walk() {
        let tmp = TempDir::new().unwrap();
        let broken = tmp.path().join("broken");
        fs::create_dir(&broken).unwrap();
        fs::write(broken.join(".git"), "not a gitdir pointer").unwrap();
        make_repo(&broken.join("inner"));
        make_repo(&tmp.path().join("sibling"));

        let (registry, counters) = walk(tmp.path(), 2);

        assert_eq!(counters.found, 2);
        assert!(!registry.contains(&ProjectRoot::new(&broken)));
    }
}
