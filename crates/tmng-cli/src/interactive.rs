//! Interactive prompts for CLI commands
//!
//! Uses dialoguer for terminal-based selection. Backing out of a menu
//! (Esc or `q`) yields `None`; Ctrl-C yields [`CliError::Cancelled`]
//! through the `From<dialoguer::Error>` conversion.
//!
//! [`CliError::Cancelled`]: crate::error::CliError::Cancelled

use std::io::IsTerminal;
use std::path::Path;

use colored::Colorize;
use dialoguer::console::Term;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, Select};
use tmng_core::registry::validate_alias;
use tmng_core::{Category, NewTool, Registry};
use tmng_fs::expand_home;

use crate::commands::manage::ManageAction;
use crate::error::{CliError, Result};

/// Fail early when prompts cannot be shown.
pub fn require_terminal() -> Result<()> {
    if std::io::stdin().is_terminal() && std::io::stdout().is_terminal() {
        Ok(())
    } else {
        Err(CliError::user("Interactive mode requires a terminal"))
    }
}

/// Select the next action in the list view.
pub fn select_action() -> Result<Option<ManageAction>> {
    let labels: Vec<&str> = ManageAction::ALL.iter().map(|a| a.label()).collect();
    let choice = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Select action")
        .items(&labels)
        .default(0)
        .interact_opt()?;
    Ok(choice.map(|i| ManageAction::ALL[i]))
}

/// Pick a tool; returns its name.
pub fn select_tool(registry: &Registry, prompt: &str, with_status: bool) -> Result<Option<String>> {
    let items: Vec<String> = registry
        .tools
        .iter()
        .map(|tool| {
            let group = tool
                .group
                .as_deref()
                .map(|g| format!(" ({g})"))
                .unwrap_or_default();
            let status = if with_status {
                format!(" [{}]", tool.status())
            } else {
                String::new()
            };
            format!("{} - {}{}{}", tool.alias, tool.description, group, status)
        })
        .collect();

    let choice = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .items(&items)
        .default(0)
        .interact_opt()?;
    Ok(choice.map(|i| registry.tools[i].name.clone()))
}

/// Pick one of `groups`.
pub fn select_group(groups: &[&str], prompt: &str) -> Result<Option<String>> {
    let choice = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .items(groups)
        .default(0)
        .interact_opt()?;
    Ok(choice.map(|i| groups[i].to_string()))
}

/// Yes/no question.
pub fn confirm(prompt: &str, default: bool) -> Result<bool> {
    Ok(Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}

/// Ask which group new tools go into.
///
/// Blank input or `none` means no group.
pub fn prompt_group() -> Result<Option<String>> {
    let input: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Enter group name (leave empty or 'none' for no group)")
        .allow_empty(true)
        .interact_text()?;
    Ok(parse_group_input(&input))
}

pub(crate) fn parse_group_input(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("none") {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Collect the fields of a new tool, show a summary and confirm.
///
/// Returns `None` if the user backs out or declines.
pub fn prompt_new_tool(
    registry: &Registry,
    group: Option<&str>,
    home: Option<&Path>,
) -> Result<Option<NewTool>> {
    let theme = ColorfulTheme::default();
    println!("{}", "Add New Tool".cyan().bold());
    println!();

    let categories = [
        "Startup (runs on shell startup)",
        "Tool (manual execution)",
    ];
    let Some(category_idx) = Select::with_theme(&theme)
        .with_prompt("Select tool category")
        .items(&categories)
        .default(1)
        .interact_opt()?
    else {
        return Ok(None);
    };
    let category = Category::ALL[category_idx];

    let path: String = Input::with_theme(&theme)
        .with_prompt("Enter tool path")
        .validate_with(|input: &String| -> std::result::Result<(), String> {
            let expanded = expand_home(input.trim(), home);
            if expanded.exists() {
                Ok(())
            } else {
                Err(format!("Path does not exist: {}", expanded.display()))
            }
        })
        .interact_text()?;

    let alias: String = Input::with_theme(&theme)
        .with_prompt("Enter tool alias (name in PATH)")
        .validate_with(|input: &String| -> std::result::Result<(), String> {
            let alias = validate_alias(input).map_err(|e| e.to_string())?;
            if registry.find_alias(&alias).is_some() {
                return Err(format!("Alias '{alias}' already exists"));
            }
            Ok(())
        })
        .interact_text()?;

    let description: String = Input::with_theme(&theme)
        .with_prompt("Enter tool description")
        .allow_empty(true)
        .interact_text()?;

    let tool = NewTool {
        alias: alias.trim().to_string(),
        category,
        group: group.map(str::to_string),
        path: path.trim().to_string(),
        description: description.trim().to_string(),
    };

    println!();
    println!("{}", "Tool Summary".cyan().bold());
    println!("  {}: {}", "Name".dimmed(), registry.derive_name(&tool.alias));
    println!("  {}: {}", "Alias".dimmed(), tool.alias.cyan());
    println!("  {}: {}", "Category".dimmed(), tool.category);
    println!(
        "  {}: {}",
        "Group".dimmed(),
        tool.group.as_deref().unwrap_or("None")
    );
    println!("  {}: {}", "Path".dimmed(), tool.path);
    println!("  {}: {}", "Description".dimmed(), tool.description);
    println!();

    if !confirm("Add this tool?", true)? {
        return Ok(None);
    }
    Ok(Some(tool))
}

/// Wait for Enter before redrawing the screen.
///
/// Reads through the terminal like the prompts do, so Ctrl-C here is a
/// cancellation too.
pub fn pause() -> Result<()> {
    println!();
    println!("{}", "Press Enter to continue...".dimmed());
    Term::stdout().read_line().map_err(CliError::from_terminal)?;
    Ok(())
}

/// Clear the terminal.
pub fn clear_screen() {
    let _ = Term::stdout().clear_screen();
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", None)]
    #[case("   ", None)]
    #[case("none", None)]
    #[case("None", None)]
    #[case(" db ", Some("db"))]
    #[case("web tools", Some("web tools"))]
    fn test_parse_group_input(#[case] input: &str, #[case] expected: Option<&str>) {
        assert_eq!(parse_group_input(input).as_deref(), expected);
    }
}
