//! Implementation of the `spicfg apply` command.

use super::run::run_deltas;
use crate::cli::ApplyArgs;
use spicfg::config::Settings;
use spicfg::error::Result;
use spicfg::gateway::ConfigTool;
use spicfg::manifest::Manifest;

/// Execute the `spicfg apply` command.
///
/// A manifest that cannot be read or parsed stops before anything is
/// exported. An entry that fails validation is rejected on its own.
pub fn cmd_apply<T: ConfigTool + ?Sized>(
    tool: &T,
    settings: &Settings,
    args: ApplyArgs,
) -> Result<()> {
    let manifest = Manifest::load(&args.manifest)?;
    if manifest.is_empty() {
        println!("Manifest lists no databases.");
        return Ok(());
    }

    let deltas = manifest
        .databases
        .iter()
        .map(|entry| entry.to_desired())
        .collect();

    run_deltas(tool, settings, deltas, args.dry_run)?.finish()
}
