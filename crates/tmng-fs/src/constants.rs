//! Names of the files and directories tmng owns inside a project root.

use std::path::Path;

/// Default registry file name looked up during project-root discovery.
pub const CONFIG_FILE_NAME: &str = "tools.yaml";

/// Generated shell fragment sourced from the user's init files.
pub const SHELL_FRAGMENT_NAME: &str = "shell.conf";

/// Directories whose contents tmng fully manages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ManagedDir {
    /// `bin/`, added to PATH but never populated by reconciliation
    Bin,
    /// `startup/`, links executed when the shell starts
    Startup,
    /// `tool/`, links exposed on PATH only
    Tool,
}

impl ManagedDir {
    /// All managed directories, in the order they appear on PATH.
    pub const ALL: [ManagedDir; 3] = [ManagedDir::Bin, ManagedDir::Tool, ManagedDir::Startup];

    /// Directories holding symlinks owned by reconciliation.
    pub const LINKED: [ManagedDir; 2] = [ManagedDir::Startup, ManagedDir::Tool];

    /// Get the directory name relative to the project root.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bin => "bin",
            Self::Startup => "startup",
            Self::Tool => "tool",
        }
    }
}

impl AsRef<Path> for ManagedDir {
    fn as_ref(&self) -> &Path {
        Path::new(self.as_str())
    }
}

impl std::fmt::Display for ManagedDir {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
