//! Export and import through the owning tool.
//!
//! The live configuration is only ever read with [`ConfigTool::export`] and
//! written with [`commit`], which stages the full text in a temporary file
//! that exists only for the duration of the import call.

mod dbspicfg;

#[cfg(test)]
mod tests;

pub use dbspicfg::{DbspiCfg, ToolOutput};

use crate::error::{Result, SpiError};
use std::io::Write;
use std::path::Path;
use tracing::debug;

/// Prefix of the temporary file handed to the import.
const TEMP_PREFIX: &str = "dbspi";

/// Something that can export and import the full configuration text.
pub trait ConfigTool {
    /// Current configuration as text.
    fn export(&self) -> Result<String>;

    /// Replace the configuration with the contents of `source`.
    fn import(&self, source: &Path) -> Result<()>;
}

/// Apply `text` through `tool`.
///
/// The text is written to a temporary file (in `temp_dir`, or the system
/// default) which is removed again before this returns, whether the import
/// succeeded or not. There is no retry.
pub fn commit<T: ConfigTool + ?Sized>(tool: &T, text: &str, temp_dir: Option<&Path>) -> Result<()> {
    let mut builder = tempfile::Builder::new();
    builder.prefix(TEMP_PREFIX);
    let mut staged = match temp_dir {
        Some(dir) => builder.tempfile_in(dir),
        None => builder.tempfile(),
    }
    .map_err(|e| SpiError::UserError(format!("failed to create temporary file: {}", e)))?;

    staged
        .write_all(text.as_bytes())
        .and_then(|_| staged.as_file().sync_all())
        .map_err(|e| {
            SpiError::UserError(format!(
                "failed to write temporary file '{}': {}",
                staged.path().display(),
                e
            ))
        })?;

    debug!(path = %staged.path().display(), bytes = text.len(), "importing configuration");
    let result = tool.import(staged.path());
    let removed = staged.close();

    result?;
    removed.map_err(|e| SpiError::UserError(format!("failed to remove temporary file: {}", e)))
}
