//! Interactive tool registration

use colored::Colorize;

use crate::commands::manage;
use crate::commands::print_save_report;
use crate::context::Session;
use crate::error::Result;
use crate::interactive;

/// Run `tmng --add`.
///
/// Asks for a group once, then adds tools to it until the user stops.
/// Each accepted tool is saved straight away.
pub fn run_add(session: &mut Session) -> Result<()> {
    interactive::require_terminal()?;
    loop {
        interactive::clear_screen();
        println!("{}", "Add New Tool".cyan().bold());
        println!();

        let group = interactive::prompt_group()?;
        if let Some(group) = &group {
            let existing = session.registry.count_in_group(group);
            if existing > 0 {
                println!(
                    "{}",
                    format!("Found {existing} existing tools in group '{group}'").cyan()
                );
            }
        }

        loop {
            add_one(session, group.as_deref())?;

            let Some(group) = &group else {
                break;
            };
            if !interactive::confirm(&format!("Add another tool to group '{group}'?"), true)? {
                break;
            }
        }

        if !interactive::confirm("Add another tool?", false)? {
            break;
        }
    }
    Ok(())
}

fn add_one(session: &mut Session, group: Option<&str>) -> Result<()> {
    interactive::clear_screen();
    let home = session.store.paths().home().map(|h| h.to_path_buf());
    let Some(tool) = interactive::prompt_new_tool(&session.registry, group, home.as_deref())? else {
        return Ok(());
    };

    let applied = manage::add_tool(&session.store, &mut session.registry, tool)?;
    print_save_report(&applied.report);
    println!(
        "{} Tool '{}' added successfully",
        "✓".green(),
        applied.value.alias
    );
    Ok(())
}
