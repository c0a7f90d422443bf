//! The generated shell fragment
//!
//! `shell.conf` extends PATH with the managed directories and runs every
//! executable entry in `startup/`. It is regenerated on every rebuild, so
//! hand edits are lost.

use std::path::PathBuf;

use tmng_fs::{ProjectPaths, io, link, path};

use crate::Result;

/// Absolute path of the fragment, resolved through symlinks when it exists.
pub fn resolved_path(paths: &ProjectPaths) -> PathBuf {
    path::resolve_lenient(&paths.shell_fragment())
}

/// Render the fragment for `paths`.
pub fn render(paths: &ProjectPaths) -> String {
    let bin = path::resolve_lenient(&paths.bin_dir());
    let tool = path::resolve_lenient(&paths.tool_dir());
    let startup = path::resolve_lenient(&paths.startup_dir());
    let (bin, tool, startup) = (bin.display(), tool.display(), startup.display());

    [
        "# tmng shell configuration - DO NOT EDIT MANUALLY".to_string(),
        "# Generated automatically by tmng tool manager".to_string(),
        String::new(),
        "# Add tmng directories to PATH".to_string(),
        format!("export PATH=\"$PATH:{bin}:{tool}:{startup}\""),
        String::new(),
        "# Execute startup scripts".to_string(),
        format!("if [ -d \"{startup}\" ]; then"),
        format!("  for script in \"{startup}\"/*; do"),
        "    if [ -x \"$script\" ]; then".to_string(),
        "      \"$script\"".to_string(),
        "    fi".to_string(),
        "  done".to_string(),
        "fi".to_string(),
        String::new(),
    ]
    .join("\n")
}

/// Write the fragment and mark it executable.
pub fn write(paths: &ProjectPaths) -> Result<PathBuf> {
    let fragment = paths.shell_fragment();
    io::write_text(&fragment, &render(paths))?;
    link::set_executable(&fragment)?;
    tracing::debug!(path = %fragment.display(), "Wrote shell fragment");
    Ok(fragment)
}
