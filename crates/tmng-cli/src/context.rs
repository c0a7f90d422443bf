//! Project-root discovery and the per-invocation session
//!
//! The project root is found in this order:
//!
//! 1. the parent directory of `--config`, if that directory exists
//! 2. the current directory, if it holds `tools.yaml`
//! 3. the directory of the running executable, or its parent, if either
//!    holds `tools.yaml`
//! 4. the current directory
//!
//! This lets an installed `tmng` find its registry from anywhere.

use std::path::{Path, PathBuf};

use colored::Colorize;
use tmng_core::{Registry, RegistrySource, RegistryStore};
use tmng_fs::{CONFIG_FILE_NAME, ProjectPaths, expand_home, path};

use crate::commands::print_save_report;
use crate::error::Result;

/// Where the registry lives for this invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Discovery {
    pub root: PathBuf,
    pub config_file: PathBuf,
}

/// Resolve the project root and registry file.
///
/// `explicit` is the `--config` argument, already home-expanded.
pub fn discover(explicit: Option<&Path>, cwd: &Path, exe_dir: Option<&Path>) -> Discovery {
    if let Some(config_file) = explicit {
        let root = match config_file.parent() {
            Some(parent) if parent.as_os_str().is_empty() => Some(cwd.to_path_buf()),
            Some(parent) if parent.is_dir() => Some(parent.to_path_buf()),
            _ => None,
        };
        let root = root.unwrap_or_else(|| search(cwd, exe_dir));
        return Discovery {
            config_file: config_file.to_path_buf(),
            root,
        };
    }

    let root = search(cwd, exe_dir);
    Discovery {
        config_file: root.join(CONFIG_FILE_NAME),
        root,
    }
}

fn search(cwd: &Path, exe_dir: Option<&Path>) -> PathBuf {
    let mut candidates = vec![cwd.to_path_buf()];
    if let Some(exe_dir) = exe_dir {
        candidates.push(exe_dir.to_path_buf());
        if let Some(parent) = exe_dir.parent() {
            candidates.push(parent.to_path_buf());
        }
    }

    candidates
        .into_iter()
        .find(|dir| dir.join(CONFIG_FILE_NAME).is_file())
        .unwrap_or_else(|| cwd.to_path_buf())
}

/// Build [`ProjectPaths`] for this process from the `--config` argument.
pub fn project_paths(config: Option<&Path>) -> Result<ProjectPaths> {
    let cwd = std::env::current_dir()?;
    let home = dirs::home_dir();
    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|exe| path::resolve(&exe).ok())
        .and_then(|exe| exe.parent().map(Path::to_path_buf));

    let explicit = config.map(|c| {
        let expanded = expand_home(&c.to_string_lossy(), home.as_deref());
        cwd.join(expanded)
    });

    let found = discover(explicit.as_deref(), &cwd, exe_dir.as_deref());
    tracing::debug!(root = %found.root.display(), config = %found.config_file.display(), "Discovered project");

    Ok(ProjectPaths::new(path::resolve_lenient(&found.root))
        .with_config_file(path::resolve_lenient(&found.config_file)))
}

/// The loaded registry plus the store that persists it.
pub struct Session {
    pub store: RegistryStore,
    pub registry: Registry,
}

impl Session {
    /// Discover the project, load the registry and report where it came from.
    pub fn open(config: Option<&Path>) -> Result<Self> {
        let paths = project_paths(config)?;
        println!("{}", format!("Project root: {}", paths.root().display()).dimmed());
        println!("{}", format!("Config path: {}", paths.config_file().display()).dimmed());

        let store = RegistryStore::new(paths);
        let loaded = store.load()?;

        match &loaded.source {
            RegistrySource::File => {}
            RegistrySource::Created => println!(
                "{}",
                format!(
                    "Config file not found, created default at: {}",
                    store.paths().config_file().display()
                )
                .yellow()
            ),
            RegistrySource::Recovered { reason, backup } => {
                eprintln!("{} {}", "Error loading config:".red().bold(), reason);
                if let Some(backup) = backup {
                    eprintln!("{} {}", "Unreadable content kept at:".yellow(), backup.display());
                }
                println!("{}", "Started with an empty registry.".yellow());
            }
        }
        if let Some(report) = &loaded.save {
            print_save_report(report);
        }

        Ok(Self {
            store,
            registry: loaded.registry,
        })
    }
}
