//! # project-roots
//!
//! Discover project roots under a set of configured directory trees and keep
//! a persistent, duplicate-free list of known projects.
//!
//! A discovery run walks each configured `(directory, depth)` pair
//! depth-first, skipping ignored and hidden directories, asks a detector
//! whether each visited directory is itself a project root, and registers new
//! roots into a [`ProjectRegistry`](project::ProjectRegistry) that commits to
//! durable storage after every insertion.

pub mod config;
pub mod detector;
pub mod discovery;
pub mod error;
pub mod filter;
pub mod lister;
pub mod output;
pub mod project;
pub mod walker;

pub use detector::{Detection, MarkerDetector, ProjectDetector, RootDetector};
pub use discovery::{DirectorySpec, DiscoveryRun, RunCounters};
pub use filter::PathFilter;
pub use project::{JsonFileStore, ProjectRegistry, ProjectRoot, ProjectStore, Registration};
