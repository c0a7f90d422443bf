//! Manual shell refresh

use colored::Colorize;

use crate::commands::print_save_report;
use crate::context::Session;
use crate::error::Result;

/// Run `tmng --update-shell`.
///
/// Rebuilds links and the shell fragment and patches init files without
/// rewriting the registry.
pub fn run_update_shell(session: &Session) -> Result<()> {
    println!("{}", "Updating shell configuration...".cyan().bold());
    let report = session.store.refresh(&session.registry)?;
    print_save_report(&report);

    println!("{} Shell configuration updated", "✓".green());
    println!("{}", "You may need to restart your shell or run:".cyan());
    println!(
        "{} (or {})",
        "source ~/.bashrc".bold(),
        "source ~/.zshrc".bold()
    );
    Ok(())
}
