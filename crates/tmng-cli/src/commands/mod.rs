//! Command implementations for tmng

pub mod add;
pub mod list;
pub mod manage;
pub mod shell;
pub mod stats;

pub use add::run_add;
pub use list::run_list;
pub use shell::run_update_shell;
pub use stats::run_stats;

use colored::Colorize;
use tmng_core::SaveReport;

/// Print what a save changed on disk.
pub fn print_save_report(report: &SaveReport) {
    let rebuild = &report.rebuild;
    tracing::debug!(
        created = rebuild.links_created(),
        removed = rebuild.removed,
        warnings = rebuild.warnings.len(),
        "Rebuild finished"
    );

    for warning in &rebuild.warnings {
        eprintln!(
            "{} {}: {}",
            "warning:".yellow().bold(),
            warning.alias,
            warning.reason
        );
    }

    let patch = &report.patch;
    for file in &patch.updated {
        println!(
            "{} Added tmng to {}",
            "OK".green().bold(),
            file.display()
        );
    }
    for failure in &patch.failed {
        eprintln!(
            "{} Could not update {}: {}",
            "warning:".yellow().bold(),
            failure.file.display(),
            failure.reason
        );
    }
}
