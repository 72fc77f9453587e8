//! Durable storage for the list of known projects.
//!
//! The registry only ever talks to the [`ProjectStore`] trait. The default
//! implementation keeps a small JSON document on disk:
//!
//! ```json
//! {
//!   "updated_at": "2026-10-16T09:12:44.120Z",
//!   "projects": ["/home/me/code/app", "/home/me/code/lib"]
//! }
//! ```

use std::{
    fs,
    path::{Path, PathBuf},
};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{error::PersistenceError, project::ProjectRoot};

/// Storage backend for known project roots.
pub trait ProjectStore {
    /// Read the persisted list, newest first. A store that has never been
    /// written returns an empty list.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage exists but cannot be read or
    /// decoded.
    fn load(&self) -> Result<Vec<ProjectRoot>, PersistenceError>;

    /// Replace the persisted list with `roots`.
    ///
    /// # Errors
    ///
    /// Returns an error if the list cannot be written.
    fn commit(&self, roots: &[ProjectRoot]) -> Result<(), PersistenceError>;
}

#[derive(Serialize, Deserialize)]
struct ProjectListFile {
    updated_at: DateTime<Utc>,
    projects: Vec<PathBuf>,
}

/// [`ProjectStore`] backed by a JSON file.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Default location: `<data_dir>/project-roots/projects.json`.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::NoDataDir`] if the platform data directory
    /// cannot be determined.
    pub fn at_default_location() -> Result<Self, PersistenceError> {
        Self::default_path()
            .map(Self::new)
            .ok_or(PersistenceError::NoDataDir)
    }

    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::data_dir().map(|p| p.join("project-roots").join("projects.json"))
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> PersistenceError {
        PersistenceError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl ProjectStore for JsonFileStore {
    fn load(&self) -> Result<Vec<ProjectRoot>, PersistenceError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&self.path).map_err(|e| self.io_error(e))?;
        let file: ProjectListFile =
            serde_json::from_str(&content).map_err(|source| PersistenceError::Json {
                path: self.path.clone(),
                source,
            })?;

        Ok(file.projects.iter().map(ProjectRoot::new).collect())
    }

    fn commit(&self, roots: &[ProjectRoot]) -> Result<(), PersistenceError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }

        let file = ProjectListFile {
            updated_at: Utc::now(),
            projects: roots.iter().map(|r| r.path().to_path_buf()).collect(),
        };
        let content =
            serde_json::to_string_pretty(&file).map_err(|source| PersistenceError::Json {
                path: self.path.clone(),
                source,
            })?;

        // Write next to the target and rename so a crash never leaves a
        // truncated list behind.
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, content).map_err(|e| self.io_error(e))?;
        fs::rename(&tmp, &self.path).map_err(|e| self.io_error(e))
    }
}
