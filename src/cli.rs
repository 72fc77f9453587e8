use std::path::PathBuf;

use clap::Parser;
use project_roots::{
    config::{ExecutionOptions, FileConfig, ScanOptions, expand_tilde},
    discovery::DirectorySpec,
};

/// Depth used for directories given on the command line without `--depth`.
pub(crate) const DEFAULT_DEPTH: u32 = 2;

#[derive(Parser)]
struct ScanningArgs {
    /// Show traversal details (directories walked, detection failures)
    #[arg(short = 'v', long)]
    verbose: bool,

    /// Additional directory names to skip at any depth
    #[arg(long, action = clap::ArgAction::Append)]
    ignore: Vec<String>,

    /// Files or directories that mark a project root (replaces the defaults)
    #[arg(long = "marker", action = clap::ArgAction::Append)]
    markers: Vec<String>,
}

#[derive(Parser)]
struct ExecutionArgs {
    /// Walk and report without saving newly found projects
    #[arg(long)]
    dry_run: bool,

    /// Print the known projects and exit
    #[arg(short = 'l', long)]
    list: bool,

    /// Print a single JSON document instead of human-readable output
    #[arg(long, conflicts_with = "interactive")]
    json: bool,

    /// Prompt for the directory and depth to scan
    #[arg(short = 'i', long)]
    interactive: bool,
}

#[derive(Parser)]
#[command(name = "project-roots")]
#[command(version)]
#[command(about = "Discover project roots under your code directories and remember them")]
pub(crate) struct Cli {
    /// Directories to search (defaults to the configured search paths)
    dirs: Vec<PathBuf>,

    /// How many levels below each directory to search
    #[arg(short = 'd', long)]
    depth: Option<u32>,

    /// Where the known project list is stored
    #[arg(long)]
    list_file: Option<PathBuf>,

    /// Scanning options
    #[command(flatten)]
    scanning: ScanningArgs,

    /// Execution options
    #[command(flatten)]
    execution: ExecutionArgs,
}

impl Cli {
    /// Search paths to walk: command-line directories, or the configured ones.
    ///
    /// `--depth` applies to command-line directories and overrides the
    /// configured depth of config file entries.
    pub(crate) fn search_paths(&self, config: &FileConfig) -> Vec<DirectorySpec> {
        if !self.dirs.is_empty() {
            let depth = i64::from(self.depth.unwrap_or(DEFAULT_DEPTH));
            return self
                .dirs
                .iter()
                .map(|dir| DirectorySpec::new(dir.to_string_lossy(), depth))
                .collect();
        }

        config
            .search_paths
            .iter()
            .map(|spec| match self.depth {
                Some(depth) => spec.clone().with_depth(i64::from(depth)),
                None => spec.clone(),
            })
            .collect()
    }

    pub(crate) fn scan_options(&self, config: &FileConfig) -> ScanOptions {
        let defaults = ScanOptions::default();

        let mut ignore = config.scanning.ignore.clone().unwrap_or(defaults.ignore);
        ignore.extend(self.scanning.ignore.iter().cloned());

        let markers = if self.scanning.markers.is_empty() {
            config.scanning.markers.clone().unwrap_or(defaults.markers)
        } else {
            self.scanning.markers.clone()
        };

        ScanOptions {
            verbose: self.scanning.verbose || config.scanning.verbose.unwrap_or(false),
            ignore,
            markers,
        }
    }

    pub(crate) fn execution_options(&self, config: &FileConfig) -> ExecutionOptions {
        ExecutionOptions {
            dry_run: self.execution.dry_run || config.execution.dry_run.unwrap_or(false),
            list: self.execution.list,
            json: self.execution.json,
            interactive: self.execution.interactive,
        }
    }

    /// Explicit project list location, if one was given anywhere.
    pub(crate) fn list_file(&self, config: &FileConfig) -> Option<PathBuf> {
        self.list_file
            .as_ref()
            .or(config.list_file.as_ref())
            .map(|p| expand_tilde(p))
    }

    pub(crate) const fn json(&self) -> bool {
        self.execution.json
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("project-roots").chain(args.iter().copied())).unwrap()
    }

    fn config_with_paths() -> FileConfig {
        FileConfig {
            search_paths: vec![DirectorySpec::new("~/code", 3), DirectorySpec::new("/srv", 1)],
            ..FileConfig::default()
        }
    }

    #[test]
    fn test_cli_dirs_use_default_depth() {
        let cli = parse(&["/a", "/b"]);
        let specs = cli.search_paths(&config_with_paths());

        assert_eq!(
            specs,
            vec![
                DirectorySpec::new("/a", i64::from(DEFAULT_DEPTH)),
                DirectorySpec::new("/b", i64::from(DEFAULT_DEPTH))
            ]
        );
    }

    #[test]
    fn test_config_paths_used_without_cli_dirs() {
        let cli = parse(&[]);

        assert_eq!(cli.search_paths(&config_with_paths()), config_with_paths().search_paths);
    }

    #[test]
    fn test_depth_flag_overrides_config_depth() {
        let cli = parse(&["--depth", "0"]);
        let specs = cli.search_paths(&config_with_paths());

        assert!(specs.iter().all(|s| s.depth == 0));
        assert_eq!(specs.len(), 2);
    }

    #[test]
    fn test_ignore_flags_extend_configured_list() {
        let cli = parse(&["--ignore", "target", "--ignore", "vendor"]);
        let config = FileConfig::default();
        let opts = cli.scan_options(&config);

        assert!(opts.ignore.contains(&"node_modules".to_string()));
        assert!(opts.ignore.contains(&"target".to_string()));
        assert!(opts.ignore.contains(&"vendor".to_string()));
    }

    #[test]
    fn test_marker_flags_replace_defaults() {
        let cli = parse(&["--marker", ".git"]);
        let opts = cli.scan_options(&FileConfig::default());

        assert_eq!(opts.markers, vec![".git".to_string()]);
    }

    #[test]
    fn test_config_dry_run_is_honored() {
        let cli = parse(&[]);
        let mut config = FileConfig::default();
        config.execution.dry_run = Some(true);

        assert!(cli.execution_options(&config).dry_run);
    }

    #[test]
    fn test_list_file_prefers_cli() {
        let cli = parse(&["--list-file", "/tmp/cli.json"]);
        let config = FileConfig {
            list_file: Some(PathBuf::from("/tmp/config.json")),
            ..FileConfig::default()
        };

        assert_eq!(cli.list_file(&config), Some(PathBuf::from("/tmp/cli.json")));
        assert_eq!(
            parse(&[]).list_file(&config),
            Some(PathBuf::from("/tmp/config.json"))
        );
    }

    #[test]
    fn test_json_conflicts_with_interactive() {
        let result = Cli::try_parse_from(["project-roots", "--json", "--interactive"]);

        assert!(result.is_err());
    }
}
