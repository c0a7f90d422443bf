//! Idempotent patching of the user's shell init files
//!
//! The "already sourced" check is a plain substring test for the absolute
//! fragment path. If the project root moves, the old line stays and a
//! second one is appended for the new location.

use std::path::{Path, PathBuf};

use tmng_fs::{ProjectPaths, io};

use crate::Result;
use crate::shell::fragment;

/// Init files looked up in the home directory.
pub const INIT_FILE_NAMES: [&str; 2] = [".bashrc", ".zshrc"];

/// Line appended to an init file to source `fragment`.
pub fn source_line(fragment: &Path) -> String {
    format!("\nsource \"{}\"\n", fragment.display())
}

/// An init file that exists but could not be read or appended to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchFailure {
    pub file: PathBuf,
    pub reason: String,
}

/// Outcome of [`ShellInitPatcher::apply`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatchReport {
    /// Absolute fragment path that init files source
    pub fragment: PathBuf,
    /// Files that received a new source line
    pub updated: Vec<PathBuf>,
    /// Files that already referenced the fragment
    pub already_sourced: Vec<PathBuf>,
    /// Files that do not exist and were left alone
    pub missing: Vec<PathBuf>,
    pub failed: Vec<PatchFailure>,
}

/// Appends a `source` line for the shell fragment to known init files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellInitPatcher {
    init_files: Vec<PathBuf>,
}

impl ShellInitPatcher {
    /// Patcher for `~/.bashrc` and `~/.zshrc` under `home`.
    pub fn for_home(home: &Path) -> Self {
        Self {
            init_files: INIT_FILE_NAMES.iter().map(|n| home.join(n)).collect(),
        }
    }

    /// Patcher for the home directory recorded in `paths`.
    ///
    /// Without a known home directory there is nothing to patch.
    pub fn from_paths(paths: &ProjectPaths) -> Self {
        match paths.home() {
            Some(home) => Self::for_home(home),
            None => {
                tracing::warn!("No home directory found; shell init files will not be patched");
                Self::with_init_files(Vec::new())
            }
        }
    }

    pub fn with_init_files(init_files: Vec<PathBuf>) -> Self {
        Self { init_files }
    }

    pub fn init_files(&self) -> &[PathBuf] {
        &self.init_files
    }

    /// Write the fragment, then make each existing init file source it.
    ///
    /// Missing init files are never created. A file that cannot be read or
    /// appended to is recorded in the report and the others are still
    /// processed.
    ///
    /// # Errors
    ///
    /// Returns an error only if the fragment itself cannot be written.
    pub fn apply(&self, paths: &ProjectPaths) -> Result<PatchReport> {
        paths.ensure_managed_dirs()?;
        fragment::write(paths)?;
        Ok(self.patch(paths))
    }

    /// Make each existing init file source the fragment, without writing
    /// the fragment itself.
    ///
    /// For callers that have just written it, such as a rebuild.
    pub fn patch(&self, paths: &ProjectPaths) -> PatchReport {
        let fragment_path = fragment::resolved_path(paths);
        let needle = fragment_path.to_string_lossy().into_owned();
        let line = source_line(&fragment_path);

        let mut report = PatchReport {
            fragment: fragment_path,
            ..PatchReport::default()
        };

        for file in &self.init_files {
            if !file.exists() {
                report.missing.push(file.clone());
                continue;
            }

            let outcome = io::read_text(file).and_then(|content| {
                if content.contains(&needle) {
                    Ok(false)
                } else {
                    io::append_text(file, &line).map(|()| true)
                }
            });

            match outcome {
                Ok(true) => {
                    tracing::info!(file = %file.display(), "Added source line");
                    report.updated.push(file.clone());
                }
                Ok(false) => report.already_sourced.push(file.clone()),
                Err(e) => {
                    tracing::warn!(file = %file.display(), error = %e, "Could not patch init file");
                    report.failed.push(PatchFailure {
                        file: file.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        report
    }
}
