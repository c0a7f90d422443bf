//! Registry-to-filesystem reconciliation
//!
//! A rebuild is a full clear followed by a full recreate, never a diff:
//!
//! 1. ensure `bin/`, `startup/` and `tool/` exist (failure aborts)
//! 2. remove every symlink in `startup/` and `tool/`
//! 3. link each enabled tool, in registry order, into its category's directory
//! 4. write the shell fragment
//!
//! Problems with a single tool in step 3 become warnings on the report and
//! the next tool is processed. That includes aliases that are not a plain
//! file name: nothing outside `startup/` and `tool/` is ever removed or
//! replaced.

mod report;

use std::path::{Path, PathBuf};

use tmng_fs::{ManagedDir, ProjectPaths, expand_home, link, path};

pub use report::{CreatedLink, RebuildReport, RebuildWarning};

use crate::Result;
use crate::record::ToolRecord;
use crate::registry::validate_alias;
use crate::shell::fragment;

/// Rebuilds the managed directories from a list of tool records.
#[derive(Debug, Clone)]
pub struct Reconciler<'a> {
    paths: &'a ProjectPaths,
}

impl<'a> Reconciler<'a> {
    pub fn new(paths: &'a ProjectPaths) -> Self {
        Self { paths }
    }

    /// Make the managed directories and the shell fragment match `tools`.
    ///
    /// # Errors
    ///
    /// Only failures that affect the whole rebuild are returned: creating
    /// the managed directories, listing them, or writing the fragment.
    pub fn rebuild(&self, tools: &[ToolRecord]) -> Result<RebuildReport> {
        let mut report = RebuildReport::default();

        self.paths.ensure_managed_dirs()?;
        self.clear_links(&mut report)?;

        for tool in tools.iter().filter(|t| t.enabled) {
            self.link_tool(tool, &mut report);
        }

        fragment::write(self.paths)?;

        tracing::debug!(
            created = report.links_created(),
            removed = report.removed,
            warnings = report.warnings.len(),
            "Rebuild finished"
        );
        Ok(report)
    }

    fn clear_links(&self, report: &mut RebuildReport) -> Result<()> {
        for dir in ManagedDir::LINKED {
            let outcome = link::clear_symlinks(&self.paths.managed_dir(dir))?;
            report.removed += outcome.removed;
            for failure in outcome.failures {
                let name = failure
                    .path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                report.warn(name, format!("could not remove stale link: {}", failure.error));
            }
        }
        Ok(())
    }

    fn link_tool(&self, tool: &ToolRecord, report: &mut RebuildReport) {
        // Records read from a hand-edited file never went through `add`
        let alias = match validate_alias(&tool.alias) {
            Ok(alias) => alias,
            Err(e) => {
                report.warn(&tool.alias, e.to_string());
                return;
            }
        };

        let raw = tool.path.trim();
        if raw.is_empty() {
            report.warn(&tool.alias, "no path configured");
            return;
        }

        let expanded = expand_home(raw, self.paths.home());
        let target = match resolve_target(&expanded) {
            Some(target) => target,
            None => {
                report.warn(
                    &tool.alias,
                    format!("tool path does not exist: {}", expanded.display()),
                );
                return;
            }
        };

        let category_dir = self.paths.managed_dir(tool.category.managed_dir());
        let link_path = category_dir.join(&alias);
        if link_path.parent() != Some(category_dir.as_path()) {
            report.warn(&tool.alias, "symlink would be created outside its managed directory");
            return;
        }

        if let Err(e) = link::replace_symlink(&target, &link_path) {
            report.warn(&tool.alias, format!("could not create symlink: {e}"));
            return;
        }

        if path::has_script_extension(&target) {
            if let Err(e) = link::set_executable(&target) {
                report.warn(&tool.alias, format!("could not make target executable: {e}"));
            }
        }

        report.created.push(CreatedLink {
            alias,
            link: link_path,
            target,
        });
    }
}

fn resolve_target(expanded: &Path) -> Option<PathBuf> {
    if !expanded.exists() {
        return None;
    }
    path::resolve(expanded).ok()
}
