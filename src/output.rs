//! JSON output for `--json` mode.

use serde::Serialize;

use crate::{discovery::RunCounters, project::ProjectRoot};

/// Result of a discovery run, as printed by `--json`.
#[derive(Serialize, Debug)]
pub struct JsonOutput {
    pub dry_run: bool,
    pub found: usize,
    pub added: usize,
    pub new_projects: Vec<JsonProject>,
}

/// A project entry in JSON output.
#[derive(Serialize, Debug)]
pub struct JsonProject {
    pub name: Option<String>,
    pub path: String,
}

impl From<&ProjectRoot> for JsonProject {
    fn from(root: &ProjectRoot) -> Self {
        Self {
            name: root.name(),
            path: root.to_string(),
        }
    }
}

impl JsonOutput {
    #[must_use]
    pub fn from_run(counters: RunCounters, new_projects: &[ProjectRoot], dry_run: bool) -> Self {
        Self {
            dry_run,
            found: counters.found,
            added: counters.added,
            new_projects: new_projects.iter().map(JsonProject::from).collect(),
        }
    }
}

/// Known projects, as printed by `--list --json`.
#[must_use]
pub fn project_list(roots: &[ProjectRoot]) -> Vec<JsonProject> {
    roots.iter().map(JsonProject::from).collect()
}
