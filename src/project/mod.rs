//! Known-project bookkeeping.
//!
//! This module owns everything about a project once it has been detected:
//! how its path is canonicalized, how the set of known projects stays free of
//! duplicates, and where that set is persisted.
//!
//! ## Main Parts
//!
//! - [`ProjectRoot`] - A canonical, absolute project directory
//! - [`ProjectRegistry`] - The ordered, duplicate-free set of known roots
//! - [`ProjectStore`] - Persistence boundary, with [`JsonFileStore`] as the default

pub mod registry;
pub mod root;
pub mod store;

pub use registry::{ProjectRegistry, Registration};
pub use root::{ProjectRoot, canonicalize};
pub use store::{JsonFileStore, ProjectStore};
