//! Path helpers for user-supplied tool paths

use std::path::{Path, PathBuf};

/// Expand a leading home shorthand (`~` or `~/...`).
///
/// Other forms, including `~user`, are returned unchanged. When no home
/// directory is known the input is returned as-is.
pub fn expand_home(raw: &str, home: Option<&Path>) -> PathBuf {
    let Some(home) = home else {
        return PathBuf::from(raw);
    };

    if raw == "~" {
        return home.to_path_buf();
    }
    match raw.strip_prefix("~/").or_else(|| raw.strip_prefix("~\\")) {
        Some(rest) => home.join(rest),
        None => PathBuf::from(raw),
    }
}

/// Resolve a path to its absolute, symlink-free form.
///
/// Uses `dunce` so Windows paths stay in their familiar form.
pub fn resolve(path: &Path) -> std::io::Result<PathBuf> {
    dunce::canonicalize(path)
}

/// Resolve `path` if it exists, otherwise make it absolute against the
/// current directory without touching the filesystem.
pub fn resolve_lenient(path: &Path) -> PathBuf {
    resolve(path)
        .or_else(|_| std::path::absolute(path))
        .unwrap_or_else(|_| path.to_path_buf())
}

/// Check whether `path` carries a script extension that should be marked
/// executable when linked.
pub fn has_script_extension(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("sh") | Some("py")
    )
}
