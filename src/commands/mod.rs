//! Command implementations for spicfg.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations. Every command talks to the configuration through a
//! [`ConfigTool`], which is `dbspicfg` outside of tests.

mod apply;
mod edit;
mod list;
mod render;
mod run;

#[cfg(test)]
mod tests;

use crate::cli::{Cli, Command};
use spicfg::config::{DEFAULT_SETTINGS_FILE, Settings};
use spicfg::error::Result;
use spicfg::gateway::{ConfigTool, DbspiCfg};
use tracing::debug;

/// Load settings and route the command to its handler.
pub fn dispatch(cli: Cli) -> Result<()> {
    let settings = match &cli.config {
        Some(path) => Settings::load(path)?,
        None => Settings::load_or_default(DEFAULT_SETTINGS_FILE)?,
    };
    debug!(tool = %settings.tool_command, "loaded settings");

    let tool = DbspiCfg::from_settings(&settings)?;
    run_command(cli.command, &tool, &settings)
}

fn run_command<T: ConfigTool + ?Sized>(
    command: Command,
    tool: &T,
    settings: &Settings,
) -> Result<()> {
    match command {
        Command::List => list::cmd_list(tool),
        Command::Render(args) => render::cmd_render(tool, args),
        Command::Apply(args) => apply::cmd_apply(tool, settings, args),
        Command::Set(args) => edit::cmd_set(tool, settings, args),
        Command::Remove(args) => edit::cmd_remove(tool, settings, args),
    }
}

/// Print parse or render diagnostics the way every command reports them.
fn print_warnings<D: std::fmt::Display>(diagnostics: &[D]) {
    for diagnostic in diagnostics {
        eprintln!("Warning: {}", diagnostic);
    }
}
