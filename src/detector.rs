//! Project root detection.
//!
//! Detection is split in two layers:
//!
//! - a [`ProjectDetector`] backend answers "which project contains this
//!   directory?" and knows nothing about traversal;
//! - [`RootDetector`] wraps a backend and only reports a root when the
//!   answer *is* the directory being examined, so the subdirectories of a
//!   known project are not registered as projects of their own.

use std::{
    fs,
    io::{ErrorKind, Read},
    path::{Path, PathBuf},
};

use crate::{
    error::DetectionError,
    project::{ProjectRoot, canonicalize},
};

/// Entries whose presence marks a directory as a project root.
pub const DEFAULT_MARKERS: [&str; 11] = [
    ".git",
    ".hg",
    ".svn",
    ".bzr",
    "_darcs",
    ".fslckout",
    "_FOSSIL_",
    "Cargo.toml",
    "package.json",
    "go.mod",
    "pyproject.toml",
];

/// A backend able to locate the project root containing a directory.
pub trait ProjectDetector {
    /// Return the root of the project that contains `dir`, if any.
    ///
    /// `dir` is absolute and canonical. The answer may be `dir` itself or
    /// one of its ancestors.
    ///
    /// # Errors
    ///
    /// Returns an error when the backend cannot reach a verdict, e.g. on
    /// unreadable or malformed project metadata.
    fn project_root(&self, dir: &Path) -> Result<Option<PathBuf>, DetectionError>;
}

/// Outcome of [`RootDetector::detect`].
#[derive(Debug)]
pub enum Detection {
    /// The directory is itself a project root.
    Root(ProjectRoot),

    /// The directory is not a root: either no project contains it, or it
    /// lies inside a project rooted elsewhere.
    NotRoot,

    /// Detection could not be completed.
    Failed(DetectionError),
}

impl Detection {
    #[must_use]
    pub const fn is_root(&self) -> bool {
        matches!(self, Self::Root(_))
    }
}

/// Applies the "must be the root itself" rule on top of a [`ProjectDetector`].
pub struct RootDetector {
    backend: Box<dyn ProjectDetector>,
}

impl Default for RootDetector {
    fn default() -> Self {
        Self::new(Box::new(MarkerDetector::default()))
    }
}

impl RootDetector {
    #[must_use]
    pub fn new(backend: Box<dyn ProjectDetector>) -> Self {
        Self { backend }
    }

    /// Decide whether `dir` is itself a project root.
    pub fn detect(&self, dir: &Path) -> Detection {
        if let Err(source) = fs::read_dir(dir) {
            return Detection::Failed(DetectionError::Unreadable {
                path: dir.to_path_buf(),
                source,
            });
        }

        self.detect_readable(&canonicalize(dir))
    }

    /// [`detect`](Self::detect) for a canonical directory the caller has
    /// already found readable.
    pub(crate) fn detect_readable(&self, dir: &Path) -> Detection {
        match self.backend.project_root(dir) {
            Ok(Some(root)) if canonicalize(&root).as_path() == dir => {
                Detection::Root(ProjectRoot::new(dir))
            }
            Ok(_) => Detection::NotRoot,
            Err(e) => Detection::Failed(e),
        }
    }
}

/// Reports a directory as a project root when it directly contains a marker
/// entry.
///
/// Ancestors are never consulted: [`RootDetector`] only accepts `dir`
/// itself, so a plain subdirectory of a project simply has no root here.
/// A `.git` *file* (worktrees, submodules) counts only if it holds a
/// `gitdir:` pointer; anything else is reported as malformed metadata.
#[derive(Clone, Debug)]
pub struct MarkerDetector {
    markers: Vec<String>,
}

impl Default for MarkerDetector {
    fn default() -> Self {
        Self::new(DEFAULT_MARKERS)
    }
}

impl MarkerDetector {
    #[must_use]
    pub fn new<I, S>(markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            markers: markers.into_iter().map(Into::into).collect(),
        }
    }

    #[must_use]
    pub fn markers(&self) -> &[String] {
        &self.markers
    }

    /// Whether `dir` directly contains one of the markers.
    fn has_marker(&self, dir: &Path) -> Result<bool, DetectionError> {
        for marker in &self.markers {
            let candidate = dir.join(marker);

            match fs::symlink_metadata(&candidate) {
                Ok(meta) => {
                    if marker == ".git" && meta.is_file() {
                        Self::check_git_file(&candidate)?;
                    }
                    return Ok(true);
                }
                Err(e) if matches!(e.kind(), ErrorKind::NotFound | ErrorKind::NotADirectory) => {}
                Err(source) => {
                    return Err(DetectionError::Io {
                        path: candidate,
                        source,
                    });
                }
            }
        }

        Ok(false)
    }

    fn check_git_file(path: &Path) -> Result<(), DetectionError> {
        let mut head = String::new();
        fs::File::open(path)
            .and_then(|file| file.take(512).read_to_string(&mut head))
            .map_err(|source| DetectionError::Io {
                path: path.to_path_buf(),
                source,
            })?;

        if head.trim_start().starts_with("gitdir:") {
            Ok(())
        } else {
            Err(DetectionError::MalformedMetadata {
                path: path.to_path_buf(),
                message: "expected a `gitdir:` pointer".to_string(),
            })
        }
    }
}

impl ProjectDetector for MarkerDetector {
    fn project_root(&self, dir: &Path) -> Result<Option<PathBuf>, DetectionError> {
        Ok(self.has_marker(dir)?.then(|| dir.to_path_buf()))
    }
}
