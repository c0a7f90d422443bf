//! Loading and saving the registry file
//!
//! Saving is never done on its own: every successful write is followed by a
//! rebuild of the managed directories and a pass of the shell-init patcher.

use std::fs;
use std::path::{Path, PathBuf};

use tmng_fs::{ConfigFormat, ConfigStore, ProjectPaths, io};

use crate::reconcile::{RebuildReport, Reconciler};
use crate::registry::{Registry, validate_alias};
use crate::shell::{PatchReport, ShellInitPatcher};
use crate::Result;

/// Suffix of the copy kept when an unparsable registry file is replaced.
pub const CORRUPT_SUFFIX: &str = "corrupt";

/// Where a loaded registry came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrySource {
    /// Parsed from the existing file
    File,
    /// No file existed; an empty registry was written
    Created,
    /// The file could not be parsed and was replaced by an empty registry
    Recovered {
        reason: String,
        /// Copy of the unparsable content, when it could be kept
        backup: Option<PathBuf>,
    },
}

/// Result of [`RegistryStore::load`].
#[derive(Debug, Clone)]
pub struct Loaded {
    pub registry: Registry,
    pub source: RegistrySource,
    /// Present when loading had to write a fresh file
    pub save: Option<SaveReport>,
}

/// Everything that happened during a save.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SaveReport {
    pub rebuild: RebuildReport,
    pub patch: PatchReport,
}

/// Persists the registry and keeps the filesystem in step with it.
#[derive(Debug, Clone)]
pub struct RegistryStore {
    paths: ProjectPaths,
    config: ConfigStore,
    patcher: ShellInitPatcher,
}

impl RegistryStore {
    pub fn new(paths: ProjectPaths) -> Self {
        let patcher = ShellInitPatcher::from_paths(&paths);
        Self {
            paths,
            config: ConfigStore::new(),
            patcher,
        }
    }

    /// Replace the set of init files that get patched.
    pub fn with_patcher(mut self, patcher: ShellInitPatcher) -> Self {
        self.patcher = patcher;
        self
    }

    pub fn paths(&self) -> &ProjectPaths {
        &self.paths
    }

    /// Load the registry file.
    ///
    /// A missing file is created empty and a file that cannot be parsed, or
    /// is not UTF-8 text, is replaced by an empty registry; both cases go
    /// through [`save`](Self::save).
    ///
    /// # Errors
    ///
    /// Fails when the file exists but cannot be read, has an unsupported
    /// extension, or when writing the replacement fails.
    pub fn load(&self) -> Result<Loaded> {
        let path = self.paths.config_file();
        let format = ConfigFormat::from_path(path)?;

        let content = match io::read_text(path) {
            Ok(content) => content,
            Err(e) if e.is_not_found() => {
                tracing::info!(path = %path.display(), "Config file not found, creating default");
                return self.reinitialize(RegistrySource::Created);
            }
            Err(e) if e.is_invalid_data() => return self.recover(path, e.to_string()),
            Err(e) => return Err(e.into()),
        };

        if content.trim().is_empty() {
            return Ok(Loaded {
                registry: Registry::default(),
                source: RegistrySource::File,
                save: None,
            });
        }

        match self.config.parse::<Registry>(path, format, &content) {
            Ok(registry) => {
                warn_invalid_aliases(&registry);
                Ok(Loaded {
                    registry,
                    source: RegistrySource::File,
                    save: None,
                })
            }
            Err(e) if e.is_parse() => self.recover(path, e.to_string()),
            Err(e) => Err(e.into()),
        }
    }

    fn recover(&self, path: &Path, reason: String) -> Result<Loaded> {
        tracing::warn!(error = %reason, "Registry file is unreadable; starting with an empty registry");
        let backup = keep_corrupt_copy(path);
        self.reinitialize(RegistrySource::Recovered { reason, backup })
    }

    fn reinitialize(&self, source: RegistrySource) -> Result<Loaded> {
        let registry = Registry::default();
        let save = self.save(&registry)?;
        Ok(Loaded {
            registry,
            source,
            save: Some(save),
        })
    }

    /// Write the registry file, then rebuild and patch.
    ///
    /// If the write fails nothing else runs and the previous file is left
    /// as it was.
    pub fn save(&self, registry: &Registry) -> Result<SaveReport> {
        self.config.save(self.paths.config_file(), registry)?;
        tracing::debug!(
            path = %self.paths.config_file().display(),
            tools = registry.len(),
            "Saved registry"
        );
        self.refresh(registry)
    }

    /// Rebuild and patch without rewriting the registry file.
    pub fn refresh(&self, registry: &Registry) -> Result<SaveReport> {
        let rebuild = Reconciler::new(&self.paths).rebuild(&registry.tools)?;
        // The rebuild already wrote the fragment
        let patch = self.patcher.patch(&self.paths);
        Ok(SaveReport { rebuild, patch })
    }
}

/// Records are kept as written; the reconciler skips the ones it cannot link.
fn warn_invalid_aliases(registry: &Registry) {
    for tool in &registry.tools {
        if let Err(e) = validate_alias(&tool.alias) {
            tracing::warn!(name = %tool.name, error = %e, "Registry entry has an unusable alias");
        }
    }
}

fn keep_corrupt_copy(path: &Path) -> Option<PathBuf> {
    let mut name = path.file_name()?.to_os_string();
    name.push(format!(".{CORRUPT_SUFFIX}"));
    let backup = path.with_file_name(name);

    match fs::copy(path, &backup) {
        Ok(_) => Some(backup),
        Err(e) => {
            tracing::warn!(
                path = %backup.display(),
                error = %e,
                "Could not keep a copy of the unreadable registry"
            );
            None
        }
    }
}
