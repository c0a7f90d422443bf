//! tmng - Tool Manager CLI
//!
//! Registers scripts and binaries, exposes them on PATH through symlinks and
//! wires a generated shell fragment into the user's shell.

mod cli;
mod commands;
mod context;
mod error;
mod interactive;

use clap::{CommandFactory, Parser};
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use cli::{Action, Cli};
use context::Session;
use error::Result;

fn main() {
    match run() {
        Ok(()) => {}
        Err(e) if e.is_cancelled() => {
            println!();
            println!("{}", "Operation cancelled by user.".yellow());
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            std::process::exit(1);
        }
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let Some(action) = cli.action() else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let mut session = Session::open(cli.config.as_deref())?;
    match action {
        Action::List => commands::run_list(&mut session),
        Action::Add => commands::run_add(&mut session),
        Action::Stats => commands::run_stats(&session.registry),
        Action::UpdateShell => commands::run_update_shell(&session),
    }
}

/// Log to stderr; `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .try_init();
    tracing::debug!("Verbose mode enabled");
}
