//! Shared test utilities for the tmng workspace.
//!
//! Dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`project`] - [`TestProject`](project::TestProject), a temporary project
//!   root with its own fake home directory

pub mod project;

pub use project::TestProject;
