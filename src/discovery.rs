//! Top-level discovery runs over the configured search paths.

use std::path::PathBuf;

use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{
    config::expand_tilde, detector::RootDetector, error::DiscoveryError, filter::PathFilter,
    project::ProjectRegistry, walker::Walker,
};

/// A directory to search and how many levels below it to descend.
///
/// Values come straight from configuration and are validated when a run
/// starts, so a bad entry only skips itself. Entries are read leniently: a
/// wrongly typed field marks the entry as malformed instead of failing the
/// whole configuration file.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(from = "toml::Value")]
pub struct DirectorySpec {
    /// Directory to search; a leading `~` is expanded.
    pub path: String,

    /// Levels below `path` to descend; `0` checks `path` only.
    pub depth: i64,

    /// Why the raw entry could not be read, if it could not.
    #[serde(skip)]
    malformed: Option<&'static str>,
}

impl DirectorySpec {
    #[must_use]
    pub fn new(path: impl Into<String>, depth: i64) -> Self {
        Self {
            path: path.into(),
            depth,
            malformed: None,
        }
    }

    fn malformed(path: String, depth: i64, reason: &'static str) -> Self {
        Self {
            path,
            depth,
            malformed: Some(reason),
        }
    }

    /// Same entry with a different depth. A malformed entry stays malformed.
    #[must_use]
    pub fn with_depth(mut self, depth: i64) -> Self {
        self.depth = depth;
        self
    }

    /// Check the entry and convert it to a usable path and depth.
    ///
    /// # Errors
    ///
    /// Returns [`DiscoveryError::InvalidSpec`] for a wrongly typed entry, an
    /// empty path or a negative depth.
    pub fn validate(&self) -> Result<(PathBuf, usize), DiscoveryError> {
        let invalid = |reason: &'static str| DiscoveryError::InvalidSpec {
            path: self.path.clone(),
            depth: self.depth,
            reason,
        };

        if let Some(reason) = self.malformed {
            return Err(invalid(reason));
        }

        if self.path.trim().is_empty() {
            return Err(invalid("path must not be empty"));
        }

        let depth =
            usize::try_from(self.depth).map_err(|_| invalid("depth must not be negative"))?;

        Ok((expand_tilde(&PathBuf::from(&self.path)), depth))
    }
}

impl From<toml::Value> for DirectorySpec {
    fn from(value: toml::Value) -> Self {
        let table = match value {
            toml::Value::Table(table) => table,
            other => return Self::malformed(other.to_string(), 0, "entry must be a table"),
        };

        let path = match table.get("path") {
            None => Ok(String::new()),
            Some(toml::Value::String(path)) => Ok(path.clone()),
            Some(other) => Err(other.to_string()),
        };
        let depth = match table.get("depth") {
            Some(toml::Value::Integer(depth)) => Some(*depth),
            _ => None,
        };

        match (path, depth) {
            (Ok(path), Some(depth)) => Self::new(path, depth),
            (Ok(path), None) => Self::malformed(path, 0, "depth must be an integer"),
            (Err(raw), depth) => Self::malformed(raw, depth.unwrap_or(0), "path must be a string"),
        }
    }
}

/// Counters for a single discovery run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct RunCounters {
    /// Project roots detected, including ones that were already known.
    pub found: usize,

    /// Project roots newly added to the registry.
    pub added: usize,
}

/// Runs discovery over a list of [`DirectorySpec`]s.
pub struct DiscoveryRun {
    walker: Walker,

    /// When `true`, suppresses the progress spinner.
    quiet: bool,
}

impl DiscoveryRun {
    #[must_use]
    pub const fn new(filter: PathFilter, detector: RootDetector) -> Self {
        Self {
            walker: Walker::new(filter, detector),
            quiet: true,
        }
    }

    /// Enable or disable quiet mode (hides the progress spinner).
    #[must_use]
    pub const fn with_quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// Walk every spec in order, registering roots into `registry`.
    ///
    /// Invalid specs are skipped. Counters start at zero on every call.
    pub fn run(&self, specs: &[DirectorySpec], registry: &mut ProjectRegistry) -> RunCounters {
        let mut counters = RunCounters::default();
        info!(search_paths = specs.len(), "Starting project discovery");

        let progress = self.progress_bar();

        for spec in specs {
            let (path, depth) = match spec.validate() {
                Ok(valid) => valid,
                Err(e) => {
                    debug!(error = %e, "Skipping search path");
                    continue;
                }
            };

            info!(dir = %path.display(), depth, "Scanning search path");
            progress.set_message(format!("Scanning {}...", path.display()));

            self.walker.walk(&path, depth, registry, &mut counters);
        }

        progress.finish_and_clear();
        info!(
            found = counters.found,
            added = counters.added,
            "Project discovery finished"
        );

        counters
    }

    fn progress_bar(&self) -> ProgressBar {
        if self.quiet {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::with_template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{detector::MarkerDetector, project::ProjectRoot};
    use std::fs;
    use tempfile::TempDir;

    fn discovery() -> DiscoveryRun {
        DiscoveryRun::new(
            PathFilter::default(),
            RootDetector::new(Box::new(MarkerDetector::new([".git"]))),
        )
    }

    fn spec(path: &std::path::Path, depth: i64) -> DirectorySpec {
        DirectorySpec::new(path.to_string_lossy(), depth)
    }

    #[test]
    fn test_validate_accepts_zero_depth() {
        let (path, depth) = DirectorySpec::new("/srv/code", 0).validate().unwrap();

        assert_eq!(path, PathBuf::from("/srv/code"));
        assert_eq!(depth, 0);
    }

    #[test]
    fn test_validate_rejects_negative_depth() {
        let err = DirectorySpec::new("/srv/code", -1).validate().unwrap_err();

        assert!(matches!(err, DiscoveryError::InvalidSpec { depth: -1, .. }));
    }

    #[test]
    fn test_validate_rejects_empty_path() {
        assert!(DirectorySpec::new("", 2).validate().is_err());
        assert!(DirectorySpec::new("   ", 2).validate().is_err());
    }

    #[test]
    fn test_validate_expands_tilde() {
        let (path, _) = DirectorySpec::new("~/code", 1).validate().unwrap();

        if let Some(home) = dirs::home_dir() {
            assert_eq!(path, home.join("code"));
        }
    }

    #[test]
    fn test_spec_deserializes_from_toml() {
        #[derive(Deserialize)]
        struct Wrapper {
            search_paths: Vec<DirectorySpec>,
        }

        let parsed: Wrapper = toml::from_str(
            "[[search_paths]]\npath = \"~/code\"\ndepth = 2\n\n[[search_paths]]\ndepth = 1\n",
        )
        .unwrap();

        assert_eq!(
            parsed.search_paths,
            vec![DirectorySpec::new("~/code", 2), DirectorySpec::new("", 1)]
        );
    }

    #[test]
    fn test_wrongly_typed_entries_are_kept_but_invalid() {
        #[derive(Deserialize)]
        struct Wrapper {
            search_paths: Vec<DirectorySpec>,
        }

        let parsed: Wrapper = toml::from_str(
            r#"
[[search_paths]]
path = "/good"
depth = 2

[[search_paths]]
path = "/word"
depth = "deep"

[[search_paths]]
path = "/float"
depth = 1.5

[[search_paths]]
path = "/missing-depth"

[[search_paths]]
path = 5
depth = 1
"#,
        )
        .unwrap();

        assert_eq!(parsed.search_paths.len(), 5);
        assert_eq!(parsed.search_paths[0], DirectorySpec::new("/good", 2));
        assert!(parsed.search_paths[0].validate().is_ok());
        for spec in &parsed.search_paths[1..] {
            assert!(matches!(
                spec.validate(),
                Err(DiscoveryError::InvalidSpec { .. })
            ));
        }
    }

    #[test]
    fn test_with_depth_keeps_malformed_entries_invalid() {
        let spec = DirectorySpec::from(toml::Value::String("/not/a/table".to_string()));

        assert!(spec.clone().with_depth(3).validate().is_err());
        assert_eq!(
            DirectorySpec::new("/srv", 1).with_depth(4),
            DirectorySpec::new("/srv", 4)
        );
    }

    #[test]
    fn test_malformed_entry_does_not_affect_others() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("repo/.git")).unwrap();

        let specs = vec![
            DirectorySpec::from(toml::Value::Integer(7)),
            spec(tmp.path(), 1),
        ];
        let mut registry = ProjectRegistry::new();

        let counters = discovery().run(&specs, &mut registry);

        assert_eq!(counters, RunCounters { found: 1, added: 1 });
    }

    #[test]
    fn test_empty_spec_list_does_nothing() {
        let mut registry = ProjectRegistry::new();

        let counters = discovery().run(&[], &mut registry);

        assert_eq!(counters, RunCounters { found: 0, added: 0 });
        assert!(registry.is_empty());
    }

    #[test]
    fn test_invalid_specs_are_skipped() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("repo/.git")).unwrap();

        let specs = vec![
            DirectorySpec::new("", 1),
            spec(tmp.path(), -3),
            spec(tmp.path(), 1),
        ];
        let mut registry = ProjectRegistry::new();

        let counters = discovery().run(&specs, &mut registry);

        assert_eq!(counters, RunCounters { found: 1, added: 1 });
    }

    #[test]
    fn test_same_directory_twice_adds_once() {
        let tmp = TempDir::new().unwrap();
        let repo = tmp.path().join("repo");
        fs::create_dir_all(repo.join(".git")).unwrap();

        let specs = vec![spec(tmp.path(), 1), spec(tmp.path(), 3)];
        let mut registry = ProjectRegistry::new();

        let counters = discovery().run(&specs, &mut registry);

        assert_eq!(counters, RunCounters { found: 2, added: 1 });
        assert_eq!(registry.roots(), &[ProjectRoot::new(&repo)]);
    }

    #[test]
    fn test_counters_reset_between_runs() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("repo/.git")).unwrap();

        let run = discovery();
        let specs = vec![spec(tmp.path(), 1)];
        let mut registry = ProjectRegistry::new();

        let first = run.run(&specs, &mut registry);
        let second = run.run(&specs, &mut registry);

        assert_eq!(first, RunCounters { found: 1, added: 1 });
        assert_eq!(second, RunCounters { found: 1, added: 0 });
    }

    #[test]
    fn test_counters_serialize() {
        let json = serde_json::to_value(RunCounters { found: 3, added: 1 }).unwrap();

        assert_eq!(json, serde_json::json!({ "found": 3, "added": 1 }));
    }
}
