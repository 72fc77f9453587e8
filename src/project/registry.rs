//! In-memory set of known project roots.
//!
//! The registry is the single source of truth for "have we seen this project
//! before?" during a run. It is append-only, keeps entries unique by
//! canonical path, and commits to its [`ProjectStore`] after every new
//! insertion so nothing registered is lost if the process stops mid-run.

use tracing::{info, warn};

use crate::{
    error::PersistenceError,
    project::{ProjectRoot, ProjectStore},
};

/// Outcome of [`ProjectRegistry::register`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Registration {
    /// The root was new and has been inserted.
    Registered,

    /// An equal root was already present; nothing changed.
    AlreadyKnown,
}

/// Ordered, duplicate-free collection of project roots, newest first.
pub struct ProjectRegistry {
    entries: Vec<ProjectRoot>,
    store: Option<Box<dyn ProjectStore>>,
}

impl Default for ProjectRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ProjectRegistry {
    /// An empty registry with no persistence.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            store: None,
        }
    }

    /// A registry preloaded from `store`, committing back to it.
    ///
    /// Duplicates in the persisted list are collapsed, keeping the first
    /// (newest) occurrence.
    ///
    /// # Errors
    ///
    /// Returns the store's error if the existing list cannot be loaded.
    pub fn with_store(store: Box<dyn ProjectStore>) -> Result<Self, PersistenceError> {
        let loaded = store.load()?;
        let mut registry = Self::from_roots(loaded);
        registry.store = Some(store);
        Ok(registry)
    }

    /// A registry holding `roots` (newest first), with no persistence.
    #[must_use]
    pub fn from_roots(roots: impl IntoIterator<Item = ProjectRoot>) -> Self {
        let mut entries: Vec<ProjectRoot> = Vec::new();
        for root in roots {
            if !entries.contains(&root) {
                entries.push(root);
            }
        }

        Self {
            entries,
            store: None,
        }
    }

    /// Insert `root` unless an equal root is already known.
    ///
    /// A failed commit is reported as a warning; the in-memory insertion
    /// stands either way.
    pub fn register(&mut self, root: ProjectRoot) -> Registration {
        if self.contains(&root) {
            info!(project = %root, "Project already known");
            return Registration::AlreadyKnown;
        }

        self.entries.insert(0, root);
        info!(project = %self.entries[0], "Project added");

        if let Some(store) = &self.store
            && let Err(e) = store.commit(&self.entries)
        {
            warn!(error = %e, "Failed to save project list");
        }

        Registration::Registered
    }

    #[must_use]
    pub fn contains(&self, root: &ProjectRoot) -> bool {
        self.entries.iter().any(|known| known == root)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn has_store(&self) -> bool {
        self.store.is_some()
    }

    /// All known roots, newest first.
    #[must_use]
    pub fn roots(&self) -> &[ProjectRoot] {
        &self.entries
    }

    /// The `n` most recently registered roots.
    #[must_use]
    pub fn newest(&self, n: usize) -> &[ProjectRoot] {
        &self.entries[..n.min(self.entries.len())]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ProjectRoot> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a ProjectRegistry {
    type Item = &'a ProjectRoot;
    type IntoIter = std::slice::Iter<'a, ProjectRoot>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
