//! spicfg: manage DB Smart Plug-in database entries from desired state.
//!
//! This is the entry point for the `spicfg` CLI. It parses arguments,
//! dispatches to the command handler, and maps errors to exit codes.

mod cli;
mod commands;

use cli::Cli;
use spicfg::{exit_codes, logging};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse_args();
    logging::init_logging();

    match commands::dispatch(cli) {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::from(err.exit_code() as u8)
        }
    }
}
