//! Registry and reconciliation engine for tmng.
//!
//! The registry is the list of managed tools. Every save runs the same
//! pipeline: persist the registry file, rebuild the symlink directories and
//! the shell fragment, then patch the user's shell init files.
//!
//! # Modules
//!
//! - [`record`] - tool records and their file representation
//! - [`registry`] - the in-memory registry and its mutators
//! - [`store`] - loading and saving the registry file
//! - [`reconcile`] - materializing the registry as symlinks
//! - [`shell`] - the shell fragment and init-file patching
//! - [`stats`] - counts over the registry

pub mod error;
pub mod reconcile;
pub mod record;
pub mod registry;
pub mod shell;
pub mod stats;
pub mod store;

pub use error::{Error, Result};
pub use reconcile::{RebuildReport, RebuildWarning, Reconciler};
pub use record::{Category, Status, ToolRecord};
pub use registry::{NewTool, REGISTRY_VERSION, Registry};
pub use shell::{PatchReport, ShellInitPatcher};
pub use stats::Statistics;
pub use store::{Loaded, RegistrySource, RegistryStore, SaveReport};
