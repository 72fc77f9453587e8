//! Canonical project root paths.
//!
//! Every path that is compared for equality during discovery goes through
//! [`canonicalize`] first, so `~/code/app`, `/home/me/code/app/` and a
//! symlink pointing at the same directory all end up as one entry.

use std::{
    fmt::{Display, Formatter, Result},
    path::{Component, Path, PathBuf},
};

use serde::Serialize;

/// Normalize a path for equality comparisons.
///
/// Existing paths are resolved with [`std::fs::canonicalize`], which follows
/// symlinks and adopts the filesystem's own spelling. Paths that cannot be
/// resolved (missing, unreadable parent) fall back to a lexical cleanup of
/// the absolute path: `.` is dropped, `..` pops a component, and the trailing
/// separator disappears.
#[must_use]
pub fn canonicalize(path: &Path) -> PathBuf {
    if let Ok(resolved) = std::fs::canonicalize(path) {
        return resolved;
    }

    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    normalize_lexically(&absolute)
}

fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push(component);
                }
            }
            other => out.push(other),
        }
    }

    out
}

/// A directory recognized as the top of a project.
///
/// The inner path is always canonical; construct values through
/// [`ProjectRoot::new`] so equality stays meaningful.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ProjectRoot(PathBuf);

impl ProjectRoot {
    /// Canonicalize `path` and wrap it.
    #[must_use]
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self(canonicalize(path.as_ref()))
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.0
    }

    /// Final path component, used as a display name.
    #[must_use]
    pub fn name(&self) -> Option<String> {
        self.0
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
    }

    #[must_use]
    pub fn into_path_buf(self) -> PathBuf {
        self.0
    }
}

impl AsRef<Path> for ProjectRoot {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl Display for ProjectRoot {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "{}", self.0.display())
    }
}
