//! Reports produced by a rebuild

use std::path::PathBuf;

/// A symlink created during a rebuild.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedLink {
    pub alias: String,
    /// Location of the symlink inside a managed directory
    pub link: PathBuf,
    /// Absolute path the link points at
    pub target: PathBuf,
}

/// A problem with a single tool or stale link; the rebuild carried on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RebuildWarning {
    /// Alias of the affected tool, or the file name of a stale link
    pub alias: String,
    pub reason: String,
}

/// Outcome of [`Reconciler::rebuild`](super::Reconciler::rebuild).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RebuildReport {
    pub created: Vec<CreatedLink>,
    /// Links removed by the initial clear
    pub removed: usize,
    pub warnings: Vec<RebuildWarning>,
}

impl RebuildReport {
    pub fn links_created(&self) -> usize {
        self.created.len()
    }

    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }

    pub(crate) fn warn(&mut self, alias: impl Into<String>, reason: impl Into<String>) {
        let warning = RebuildWarning {
            alias: alias.into(),
            reason: reason.into(),
        };
        tracing::debug!(alias = %warning.alias, reason = %warning.reason, "Skipped during rebuild");
        self.warnings.push(warning);
    }

    /// Warnings attached to `alias`.
    pub fn warnings_for<'a>(&'a self, alias: &'a str) -> impl Iterator<Item = &'a RebuildWarning> + 'a {
        self.warnings.iter().filter(move |w| w.alias == alias)
    }
}
