//! Filesystem layer for tmng
//!
//! Provides the managed project layout, atomic writes, symlink primitives
//! and format-agnostic loading of the registry file.

pub mod config;
pub mod constants;
pub mod error;
pub mod io;
pub mod layout;
pub mod link;
pub mod path;

pub use config::{ConfigFormat, ConfigStore};
pub use constants::{CONFIG_FILE_NAME, ManagedDir, SHELL_FRAGMENT_NAME};
pub use error::{Error, Result};
pub use layout::ProjectPaths;
pub use path::expand_home;
