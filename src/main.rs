//! # project-roots
//!
//! Discover project roots under your code directories and remember them.
//!
//! The tool walks every configured search path down to its depth limit,
//! recognizes project roots by their marker files (`.git`, `Cargo.toml`,
//! `package.json`, ...), and adds new ones to a persistent project list.
//! Running it again over the same trees adds nothing new.
//!
//! ## Usage
//!
//! ```bash
//! # Scan the configured search paths
//! project-roots
//!
//! # Scan specific directories, three levels deep
//! project-roots ~/code ~/work --depth 3
//!
//! # See what would be added without saving anything
//! project-roots --dry-run
//!
//! # Show the known projects
//! project-roots --list
//! ```

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, DEFAULT_DEPTH};
use colored::Colorize;
use inquire::{CustomType, Text};
use project_roots::{
    config::FileConfig,
    discovery::{DirectorySpec, DiscoveryRun},
    output::{JsonOutput, project_list},
    project::{JsonFileStore, ProjectRegistry, ProjectRoot, ProjectStore},
};
use std::process::exit;
use tracing_subscriber::EnvFilter;

/// Entry point for the project-roots application.
///
/// This function handles all errors gracefully by calling [`inner_main`] and printing
/// any errors to stderr before exiting with a non-zero status code.
fn main() {
    if let Err(err) = inner_main() {
        eprintln!("Error: {err:#}");

        exit(1);
    }
}

/// Main application logic that can return errors.
///
/// This function:
/// 1. Parses command-line arguments and loads the config file (if present)
/// 2. Installs the log subscriber
/// 3. Loads the known project list
/// 4. Either lists known projects, or runs discovery over the search paths
/// 5. Prints a summary (or a JSON document with `--json`)
///
/// # Errors
///
/// This function can return errors from:
/// - Loading an existing but unreadable project list
/// - Interactive prompts
/// - JSON serialization
fn inner_main() -> Result<()> {
    let args = Cli::parse();
    let json_mode = args.json();

    let file_config = match FileConfig::load() {
        Ok(config) => config,
        Err(e) => {
            if !json_mode {
                eprintln!("{} {e}", "Warning: Failed to load config file:".yellow());
            }
            FileConfig::default()
        }
    };

    let scan_options = args.scan_options(&file_config);
    let execution_options = args.execution_options(&file_config);

    init_tracing(scan_options.verbose, json_mode);

    let store = match args.list_file(&file_config) {
        Some(path) => JsonFileStore::new(path),
        None => JsonFileStore::at_default_location()?,
    };
    let list_path = store.path().to_path_buf();

    let mut registry = if execution_options.dry_run || execution_options.list {
        ProjectRegistry::from_roots(store.load().with_context(|| {
            format!("Failed to load project list from {}", list_path.display())
        })?)
    } else {
        ProjectRegistry::with_store(Box::new(store)).with_context(|| {
            format!("Failed to load project list from {}", list_path.display())
        })?
    };

    if execution_options.list {
        return print_known_projects(registry.roots(), json_mode);
    }

    let specs = if execution_options.interactive {
        prompt_search_path()?
    } else {
        args.search_paths(&file_config)
    };

    if specs.is_empty() && !json_mode {
        let hint = FileConfig::config_path()
            .map_or_else(|| "the config file".to_string(), |p| p.display().to_string());
        println!(
            "{}",
            format!("No search paths given. Pass a directory or add [[search_paths]] to {hint}")
                .yellow()
        );
    }

    let discovery = DiscoveryRun::new(scan_options.path_filter(), scan_options.root_detector())
        .with_quiet(json_mode || scan_options.verbose);
    let counters = discovery.run(&specs, &mut registry);
    let new_projects = registry.newest(counters.added);

    if json_mode {
        let output = JsonOutput::from_run(counters, new_projects, execution_options.dry_run);
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!(
        "Found {} projects, {} new",
        counters.found.to_string().bright_white(),
        counters.added.to_string().bright_green()
    );

    for root in new_projects {
        println!("  ➕ {}", format_root(root));
    }

    if execution_options.dry_run && counters.added > 0 {
        println!(
            "\n{}",
            "🧪 Dry run complete! Nothing was saved.".yellow()
        );
    } else if counters.added > 0 {
        println!(
            "\n{} {}",
            "✅ Project list updated:".green(),
            list_path.display()
        );
    } else {
        println!("{}", "✨ No new projects found!".green());
    }

    Ok(())
}

/// Install the stderr log subscriber; `RUST_LOG` takes precedence.
fn init_tracing(verbose: bool, json_mode: bool) {
    let level = if json_mode {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("project_roots={level}")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Ask for a single directory and depth to scan.
fn prompt_search_path() -> Result<Vec<DirectorySpec>> {
    let dir = Text::new("Directory to scan:").with_default(".").prompt()?;
    let depth = CustomType::<u32>::new("Search depth:")
        .with_default(DEFAULT_DEPTH)
        .with_error_message("Please enter a non-negative number")
        .prompt()?;

    Ok(vec![DirectorySpec::new(dir, i64::from(depth))])
}

fn print_known_projects(roots: &[ProjectRoot], json_mode: bool) -> Result<()> {
    if json_mode {
        println!("{}", serde_json::to_string_pretty(&project_list(roots))?);
        return Ok(());
    }

    if roots.is_empty() {
        println!("{}", "✨ No known projects yet!".green());
        return Ok(());
    }

    println!("{}", format!("📂 {} known projects:", roots.len()).bold());
    for root in roots {
        println!("  {}", format_root(root));
    }

    Ok(())
}

fn format_root(root: &ProjectRoot) -> String {
    match root.name() {
        Some(name) => format!("{} ({})", name.bright_white(), root),
        None => root.to_string(),
    }
}
