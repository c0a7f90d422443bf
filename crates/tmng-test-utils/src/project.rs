//! [`TestProject`] fixture for tmng test scenarios.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use tmng_fs::ProjectPaths;

/// A temporary project root plus a separate temporary home directory, so
/// tests never touch the real `~/.bashrc`.
///
/// # Example
///
/// ```rust,no_run
/// use tmng_test_utils::TestProject;
///
/// let project = TestProject::new().with_init_files(&[".bashrc"]);
/// let script = project.write_script("build.sh", "#!/bin/sh\necho build\n");
/// let paths = project.paths();
/// ```
pub struct TestProject {
    root: TempDir,
    home: TempDir,
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}

impl TestProject {
    /// Create an empty project root and an empty home directory.
    pub fn new() -> Self {
        Self {
            root: TempDir::new().unwrap(),
            home: TempDir::new().unwrap(),
        }
    }

    /// Create the given init files in the fake home, each with a one-line
    /// placeholder so appends are visible.
    pub fn with_init_files(self, names: &[&str]) -> Self {
        for name in names {
            self.write_home_file(name, "# existing shell setup\n");
        }
        self
    }

    /// Canonical project root path.
    pub fn root(&self) -> PathBuf {
        dunce::canonicalize(self.root.path()).unwrap()
    }

    /// Canonical fake home path.
    pub fn home(&self) -> PathBuf {
        dunce::canonicalize(self.home.path()).unwrap()
    }

    /// Project paths rooted here, with the fake home injected.
    pub fn paths(&self) -> ProjectPaths {
        ProjectPaths::new(self.root()).with_home(self.home())
    }

    /// Create a script outside the managed directories and return its
    /// canonical path.
    pub fn write_script(&self, name: &str, content: &str) -> PathBuf {
        let dir = self.root().join("sources");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        dunce::canonicalize(&path).unwrap()
    }

    pub fn write_home_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.home().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    pub fn read_home_file(&self, name: &str) -> String {
        fs::read_to_string(self.home().join(name))
            .unwrap_or_else(|_| panic!("Could not read home file: {name}"))
    }

    /// Read a file relative to the project root.
    pub fn read(&self, rel: &str) -> String {
        let path = self.root().join(rel);
        fs::read_to_string(&path).unwrap_or_else(|_| panic!("Could not read file: {}", path.display()))
    }

    /// Sorted names of the symlinks directly inside `dir` (relative to root).
    pub fn symlinks_in(&self, dir: &str) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(self.root().join(dir))
            .unwrap()
            .map(|e| e.unwrap())
            .filter(|e| e.file_type().unwrap().is_symlink())
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    /// Assert that `rel` is a symlink pointing at `target`.
    ///
    /// # Panics
    /// Panics if `rel` is not a symlink or points elsewhere.
    pub fn assert_symlink_to(&self, rel: &str, target: &Path) {
        let link = self.root().join(rel);
        let actual = fs::read_link(&link)
            .unwrap_or_else(|_| panic!("Expected symlink: {}", link.display()));
        assert_eq!(
            actual,
            target,
            "Symlink {} points to the wrong target",
            link.display()
        );
    }

    /// Assert that nothing, not even a dangling link, exists at `rel`.
    ///
    /// # Panics
    /// Panics if the slot is occupied.
    pub fn assert_no_entry(&self, rel: &str) {
        let path = self.root().join(rel);
        assert!(
            fs::symlink_metadata(&path).is_err(),
            "Expected nothing at: {}",
            path.display()
        );
    }
}
