//! Implementation of the `spicfg render` command.
//!
//! Normalizes a configuration without changing it: parse, then serialize.

use super::print_warnings;
use crate::cli::RenderArgs;
use spicfg::error::{Result, SpiError};
use spicfg::format::{parse, serialize};
use spicfg::fs::atomic_write_file;
use spicfg::gateway::ConfigTool;

/// Execute the `spicfg render` command.
pub fn cmd_render<T: ConfigTool + ?Sized>(tool: &T, args: RenderArgs) -> Result<()> {
    let input = match &args.input {
        Some(path) => std::fs::read_to_string(path).map_err(|e| {
            SpiError::UserError(format!("failed to read '{}': {}", path.display(), e))
        })?,
        None => tool.export()?,
    };

    let parsed = parse(&input);
    print_warnings(&parsed.diagnostics);

    let rendered = serialize(&parsed.model);
    print_warnings(&rendered.diagnostics);

    match &args.output {
        Some(path) => {
            atomic_write_file(path, &rendered.text)?;
            println!("Wrote {}", path.display());
        }
        None => print!("{}", rendered.text),
    }
    Ok(())
}
