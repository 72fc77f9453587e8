//! Configuration file support for persistent settings.
//!
//! This module provides support for loading configuration from a TOML file
//! located at `~/.config/project-roots/config.toml` (or the platform-specific
//! equivalent). Configuration file values serve as defaults that can be
//! overridden by CLI arguments.
//!
//! # Layering
//!
//! The precedence order is: **CLI argument > config file > hardcoded default**.
//!
//! # Example config
//!
//! ```toml
//! list_file = "~/.local/share/project-roots/projects.json"
//!
//! [[search_paths]]
//! path = "~/code"
//! depth = 2
//!
//! [[search_paths]]
//! path = "~/work"
//! depth = 3
//!
//! [scanning]
//! ignore = [".git", "node_modules", "target"]
//! markers = [".git", "Cargo.toml"]
//! verbose = false
//!
//! [execution]
//! dry_run = false
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::discovery::DirectorySpec;

/// Top-level configuration file structure.
///
/// All scalar fields are `Option<T>` so we can detect which values are
/// present in the config file and apply layered configuration.
#[derive(Deserialize, Default, Debug)]
pub struct FileConfig {
    /// Where the known project list is stored
    pub list_file: Option<PathBuf>,

    /// Directories to search and their depth limits, in order
    #[serde(default)]
    pub search_paths: Vec<DirectorySpec>,

    /// Scanning options
    #[serde(default)]
    pub scanning: FileScanConfig,

    /// Execution options
    #[serde(default)]
    pub execution: FileExecutionConfig,
}

/// Scanning options from the configuration file.
#[derive(Deserialize, Default, Debug)]
pub struct FileScanConfig {
    /// Directory basenames to skip; replaces the built-in list
    pub ignore: Option<Vec<String>>,

    /// Project root markers; replaces the built-in list
    pub markers: Option<Vec<String>>,

    /// Whether to show verbose output
    pub verbose: Option<bool>,
}

/// Execution options from the configuration file.
#[derive(Deserialize, Default, Debug)]
pub struct FileExecutionConfig {
    /// Whether to run in dry-run mode
    pub dry_run: Option<bool>,
}

/// Expand a leading `~` in a path to the user's home directory.
///
/// Paths that don't start with `~` are returned unchanged.
#[must_use]
pub fn expand_tilde(path: &Path) -> PathBuf {
    if let Ok(rest) = path.strip_prefix("~")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    path.to_path_buf()
}

impl FileConfig {
    /// Returns the path where the configuration file is expected.
    ///
    /// The configuration file is located at `<config_dir>/project-roots/config.toml`,
    /// where `<config_dir>` is the platform-specific configuration directory
    /// (e.g., `~/.config` on Linux, `%APPDATA%` on Windows).
    #[must_use]
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("project-roots").join("config.toml"))
    }

    /// Load configuration from the default config file location.
    ///
    /// If the config file doesn't exist, returns a default (empty) configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be read or
    /// contains invalid TOML.
    pub fn load() -> anyhow::Result<Self> {
        let Some(path) = Self::config_path() else {
            return Ok(Self::default());
        };

        Self::load_from(&path)
    }

    /// Load configuration from an explicit path; a missing file yields defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            anyhow::anyhow!("Failed to read config file at {}: {e}", path.display())
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| {
            anyhow::anyhow!("Failed to parse config file at {}: {e}", path.display())
        })?;

        Ok(config)
    }
}
