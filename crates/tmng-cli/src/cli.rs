//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{ArgGroup, Parser};

const EXAMPLES: &str = "\
Examples:
  tmng -l                         List and manage tools
  tmng -a                         Add new tool
  tmng --stats                    Show tool statistics
  tmng --config ~/my-tools.yaml   Use custom config file";

/// tmng - Tool Manager for organizing scripts and binaries
///
/// Keeps a registry of scripts and binaries, exposes them on PATH through
/// generated symlinks and runs startup tools when a shell starts.
#[derive(Parser, Debug)]
#[command(name = "tmng")]
#[command(author, version, about, long_about = None, after_help = EXAMPLES)]
#[command(group(ArgGroup::new("action").args(["list", "add", "stats", "update_shell"])))]
pub struct Cli {
    /// List all tools with interactive management
    #[arg(short, long)]
    pub list: bool,

    /// Add new tool(s) to the manager
    #[arg(short, long)]
    pub add: bool,

    /// Show statistics about managed tools
    #[arg(short, long)]
    pub stats: bool,

    /// Rebuild symlinks and shell configuration manually
    #[arg(long)]
    pub update_shell: bool,

    /// Use alternative config file
    #[arg(long, value_name = "PATH", env = "TMNG_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// What the invocation asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    List,
    Add,
    Stats,
    UpdateShell,
}

impl Cli {
    /// The requested action, or `None` when only help should be shown.
    pub fn action(&self) -> Option<Action> {
        if self.list {
            Some(Action::List)
        } else if self.add {
            Some(Action::Add)
        } else if self.stats {
            Some(Action::Stats)
        } else if self.update_shell {
            Some(Action::UpdateShell)
        } else {
            None
        }
    }
}
