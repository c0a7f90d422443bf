//! Registry statistics

use colored::Colorize;
use tmng_core::{Registry, Statistics};

use crate::error::Result;

/// Format one table row.
fn row(metric: &str, count: impl ToString, percentage: &str) -> String {
    format!("  {:<16} {:>6} {:>10}", metric, count.to_string(), percentage)
}

/// Render the statistics table and the group breakdown.
pub fn render(stats: &Statistics) -> String {
    let mut lines = vec![
        format!("{}", "tmng Statistics".cyan().bold()),
        row("Metric", "Count", "Percentage").dimmed().to_string(),
        row("Total Tools", stats.total, "100%"),
    ];
    let percent = |count: usize| format!("{:.1}%", stats.percentage(count));
    for (metric, count) in [
        ("Enabled Tools", stats.enabled),
        ("Disabled Tools", stats.disabled),
        ("Startup Tools", stats.startup),
        ("Regular Tools", stats.tool),
    ] {
        lines.push(row(metric, count, &percent(count)));
    }
    lines.push(row("Tool Groups", stats.groups.len(), ""));

    if !stats.groups.is_empty() {
        lines.push(String::new());
        lines.push(format!("{}", "Groups Breakdown:".cyan().bold()));
        let width = stats.groups.keys().map(String::len).max().unwrap_or(0).max(5);
        lines.push(format!("  {:<width$} {:>10}", "Group", "Tool Count").dimmed().to_string());
        for (group, count) in &stats.groups {
            lines.push(format!("  {:<width$} {:>10}", group.blue(), count));
        }
    }

    lines.join("\n")
}

/// Run `tmng --stats`.
pub fn run_stats(registry: &Registry) -> Result<()> {
    if registry.is_empty() {
        println!("{}", "No tools managed yet. Use 'tmng -a' to add some.".yellow());
        return Ok(());
    }
    println!("{}", render(&Statistics::from_tools(&registry.tools)));
    Ok(())
}
