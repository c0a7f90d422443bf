//! Symlink primitives for the managed directories
//!
//! Everything here works on the link itself (`symlink_metadata`), never on
//! the file it points to.

use std::fs;
use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// A symlink that could not be removed while clearing a directory.
#[derive(Debug)]
pub struct ClearFailure {
    pub path: PathBuf,
    pub error: Error,
}

/// Outcome of [`clear_symlinks`].
#[derive(Debug, Default)]
pub struct ClearOutcome {
    /// Number of links removed
    pub removed: usize,
    /// Links that could not be removed
    pub failures: Vec<ClearFailure>,
}

/// Check whether `path` is a symlink, dangling or not.
pub fn is_symlink(path: &Path) -> bool {
    fs::symlink_metadata(path)
        .map(|m| m.file_type().is_symlink())
        .unwrap_or(false)
}

/// Check whether anything occupies `path`, including a dangling symlink.
pub fn slot_occupied(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok()
}

/// Remove every symlink directly inside `dir`.
///
/// Regular files and subdirectories are left alone. A link that cannot be
/// removed is reported and the scan continues.
pub fn clear_symlinks(dir: &Path) -> Result<ClearOutcome> {
    let mut outcome = ClearOutcome::default();

    let entries = fs::read_dir(dir).map_err(|e| Error::io(dir, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| Error::io(dir, e))?;
        let path = entry.path();
        if !is_symlink(&path) {
            continue;
        }
        match fs::remove_file(&path) {
            Ok(()) => {
                tracing::debug!(link = %path.display(), "Removed symlink");
                outcome.removed += 1;
            }
            Err(e) => outcome.failures.push(ClearFailure {
                error: Error::io(&path, e),
                path,
            }),
        }
    }

    Ok(outcome)
}

/// Create a symlink at `link` pointing to `target`, replacing whatever file
/// or link currently sits at `link`.
///
/// A real directory in the slot is not removed; the call fails instead.
pub fn replace_symlink(target: &Path, link: &Path) -> Result<()> {
    if slot_occupied(link) {
        fs::remove_file(link).map_err(|e| Error::io(link, e))?;
    }
    create_symlink(target, link).map_err(|e| Error::io(link, e))
}

#[cfg(unix)]
fn create_symlink(target: &Path, link: &Path) -> std::io::Result<()> {
    std::os::unix::fs::symlink(target, link)
}

#[cfg(windows)]
fn create_symlink(target: &Path, link: &Path) -> std::io::Result<()> {
    if target.is_dir() {
        std::os::windows::fs::symlink_dir(target, link)
    } else {
        std::os::windows::fs::symlink_file(target, link)
    }
}

/// Set `path` to mode 0755.
#[cfg(unix)]
pub fn set_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, fs::Permissions::from_mode(0o755)).map_err(|e| Error::io(path, e))
}

/// Executable bits do not exist on this platform.
#[cfg(not(unix))]
pub fn set_executable(_path: &Path) -> Result<()> {
    Ok(())
}
