//! Interactive list view

use colored::Colorize;
use tmng_core::{Category, Registry, ToolRecord};

use crate::commands::manage::{self, ManageAction};
use crate::commands::print_save_report;
use crate::context::Session;
use crate::error::Result;
use crate::interactive;

/// Heading for tools without a group.
pub const UNGROUPED: &str = "Ungrouped";

/// Tools bucketed by group.
///
/// Named groups come first in name order, then the ungrouped bucket. Tools
/// within a bucket are sorted by name.
pub fn grouped(registry: &Registry) -> Vec<(Option<&str>, Vec<&ToolRecord>)> {
    let mut buckets: Vec<(Option<&str>, Vec<&ToolRecord>)> = registry
        .groups()
        .into_iter()
        .map(|group| (Some(group), Vec::new()))
        .collect();
    let mut ungrouped = Vec::new();

    for tool in &registry.tools {
        match tool.group.as_deref() {
            Some(group) => {
                if let Some((_, tools)) = buckets.iter_mut().find(|(g, _)| *g == Some(group)) {
                    tools.push(tool);
                }
            }
            None => ungrouped.push(tool),
        }
    }
    if !ungrouped.is_empty() {
        buckets.push((None, ungrouped));
    }

    for (_, tools) in &mut buckets {
        tools.sort_by(|a, b| a.name.cmp(&b.name));
    }
    buckets
}

fn tool_line(tool: &ToolRecord) -> String {
    let status = if tool.enabled { "●".green() } else { "●".red() };
    let icon = match tool.category {
        Category::Startup => "⚡",
        Category::Tool => "🛠",
    };
    let alias = if tool.enabled {
        tool.alias.green().bold()
    } else {
        tool.alias.red().dimmed()
    };
    format!(
        "{} {} {} {}{}{} - {}",
        status,
        icon,
        alias,
        "(".dimmed(),
        tool.name.cyan().dimmed(),
        ")".dimmed(),
        tool.description
    )
}

/// Render the registry as a tree.
pub fn render_tree(registry: &Registry) -> String {
    let mut out = format!("{}\n", "Managed Tools".cyan().bold());
    let buckets = grouped(registry);
    let last_bucket = buckets.len().saturating_sub(1);

    for (i, (group, tools)) in buckets.iter().enumerate() {
        let (branch, indent) = if i == last_bucket {
            ("└── ", "    ")
        } else {
            ("├── ", "│   ")
        };
        let heading = match group {
            Some(group) => group.blue().bold(),
            None => UNGROUPED.dimmed(),
        };
        out.push_str(&format!("{}{}\n", branch.cyan(), heading));

        let last_tool = tools.len().saturating_sub(1);
        for (j, tool) in tools.iter().enumerate() {
            let leaf = if j == last_tool { "└── " } else { "├── " };
            out.push_str(&format!("{}{}{}\n", indent.cyan(), leaf.cyan(), tool_line(tool)));
        }
    }
    out
}

/// Run `tmng --list`.
pub fn run_list(session: &mut Session) -> Result<()> {
    if session.registry.is_empty() {
        println!("{}", "No tools managed yet. Use 'tmng -a' to add some.".yellow());
        return Ok(());
    }
    interactive::require_terminal()?;

    loop {
        interactive::clear_screen();
        println!("{}", render_tree(&session.registry));

        let Some(action) = interactive::select_action()? else {
            break;
        };
        let outcome = match action {
            ManageAction::Exit => break,
            ManageAction::Refresh => continue,
            ManageAction::ToggleTool => toggle_tool(session),
            ManageAction::ToggleGroup => toggle_group(session),
            ManageAction::DeleteTool => delete_tool(session),
            ManageAction::DeleteGroup => delete_group(session),
        };

        match outcome {
            Ok(()) => {}
            Err(e) if e.is_cancelled() => println!("{}", "Operation cancelled.".yellow()),
            Err(e) => eprintln!("{}: {}", "error".red().bold(), e),
        }
        interactive::pause()?;

        if session.registry.is_empty() {
            println!("{}", "No tools left to manage.".yellow());
            break;
        }
    }
    Ok(())
}

fn toggle_tool(session: &mut Session) -> Result<()> {
    let Some(name) = interactive::select_tool(&session.registry, "Select tool to toggle", true)? else {
        return Ok(());
    };
    let applied = manage::toggle_tool(&session.store, &mut session.registry, &name)?;
    print_save_report(&applied.report);

    let alias = session.registry.get(&name).map_or(name.as_str(), |t| t.alias.as_str());
    let state = if applied.value { "enabled" } else { "disabled" };
    println!("{} Tool '{}' {}", "✓".green(), alias, state);
    Ok(())
}

fn toggle_group(session: &mut Session) -> Result<()> {
    let groups = session.registry.groups();
    if groups.is_empty() {
        println!("{}", "No groups defined.".yellow());
        return Ok(());
    }
    let Some(group) = interactive::select_group(&groups, "Select group to toggle")? else {
        return Ok(());
    };
    let applied = manage::toggle_group(&session.store, &mut session.registry, &group)?;
    print_save_report(&applied.report);
    println!("{} Toggled {} tools in group '{}'", "✓".green(), applied.value, group);
    Ok(())
}

fn delete_tool(session: &mut Session) -> Result<()> {
    let Some(name) = interactive::select_tool(&session.registry, "Select tool to delete", false)? else {
        return Ok(());
    };
    if !interactive::confirm(&format!("Are you sure you want to delete tool '{name}'?"), false)? {
        return Ok(());
    }
    let applied = manage::delete_tool(&session.store, &mut session.registry, &name)?;
    print_save_report(&applied.report);
    println!("{} Tool '{}' deleted", "✓".green(), applied.value.name);
    Ok(())
}

fn delete_group(session: &mut Session) -> Result<()> {
    let groups = session.registry.groups();
    if groups.is_empty() {
        println!("{}", "No groups defined.".yellow());
        return Ok(());
    }
    let Some(group) = interactive::select_group(&groups, "Select group to delete")? else {
        return Ok(());
    };
    let count = session.registry.count_in_group(&group);
    let prompt = format!("Are you sure? This will delete ALL {count} tools in group '{group}'.");
    if !interactive::confirm(&prompt, false)? {
        return Ok(());
    }
    let applied = manage::delete_group(&session.store, &mut session.registry, &group)?;
    print_save_report(&applied.report);
    println!("{} Deleted {} tools in group '{}'", "✓".green(), applied.value, group);
    Ok(())
}
