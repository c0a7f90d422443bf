//! Managed project layout
//!
//! A project root holds the registry file, the three managed directories
//! and the generated shell fragment:
//!
//! ```text
//! <root>/
//!   tools.yaml
//!   shell.conf
//!   bin/
//!   startup/
//!   tool/
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::{CONFIG_FILE_NAME, ManagedDir, SHELL_FRAGMENT_NAME};
use crate::{Error, Result};

/// Paths every component works against.
///
/// Passed explicitly into the store, reconciler and patcher instead of
/// being looked up from process-wide state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectPaths {
    root: PathBuf,
    config_file: PathBuf,
    home: Option<PathBuf>,
}

impl ProjectPaths {
    /// Create paths for `root` with the default registry file name and the
    /// current user's home directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let config_file = root.join(CONFIG_FILE_NAME);
        Self {
            root,
            config_file,
            home: dirs::home_dir(),
        }
    }

    /// Use a registry file other than `<root>/tools.yaml`.
    pub fn with_config_file(mut self, config_file: impl Into<PathBuf>) -> Self {
        self.config_file = config_file.into();
        self
    }

    /// Override the home directory used for `~` expansion and init files.
    pub fn with_home(mut self, home: impl Into<PathBuf>) -> Self {
        self.home = Some(home.into());
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_file(&self) -> &Path {
        &self.config_file
    }

    pub fn home(&self) -> Option<&Path> {
        self.home.as_deref()
    }

    /// Path of a managed directory.
    pub fn managed_dir(&self, dir: ManagedDir) -> PathBuf {
        self.root.join(dir)
    }

    pub fn bin_dir(&self) -> PathBuf {
        self.managed_dir(ManagedDir::Bin)
    }

    pub fn startup_dir(&self) -> PathBuf {
        self.managed_dir(ManagedDir::Startup)
    }

    pub fn tool_dir(&self) -> PathBuf {
        self.managed_dir(ManagedDir::Tool)
    }

    /// Path of the generated shell fragment.
    pub fn shell_fragment(&self) -> PathBuf {
        self.root.join(SHELL_FRAGMENT_NAME)
    }

    /// Create all managed directories (and the root) if missing.
    pub fn ensure_managed_dirs(&self) -> Result<()> {
        for dir in ManagedDir::ALL {
            let path = self.managed_dir(dir);
            fs::create_dir_all(&path).map_err(|e| Error::io(&path, e))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout() {
        let paths = ProjectPaths::new("/opt/tools").with_home("/home/me");

        assert_eq!(paths.config_file(), Path::new("/opt/tools/tools.yaml"));
        assert_eq!(paths.startup_dir(), PathBuf::from("/opt/tools/startup"));
        assert_eq!(paths.tool_dir(), PathBuf::from("/opt/tools/tool"));
        assert_eq!(paths.bin_dir(), PathBuf::from("/opt/tools/bin"));
        assert_eq!(paths.shell_fragment(), PathBuf::from("/opt/tools/shell.conf"));
        assert_eq!(paths.home(), Some(Path::new("/home/me")));
    }

    #[test]
    fn test_custom_config_file_keeps_root() {
        let paths = ProjectPaths::new("/opt/tools").with_config_file("/etc/my-tools.yaml");

        assert_eq!(paths.root(), Path::new("/opt/tools"));
        assert_eq!(paths.config_file(), Path::new("/etc/my-tools.yaml"));
    }
}
