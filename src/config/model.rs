//! Settings struct definition and default implementation.

use super::types::*;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Settings for talking to the dbspicfg tool.
///
/// This struct represents the contents of `spicfg.yaml`.
/// Unknown fields in the YAML are ignored for forward compatibility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // =========================================================================
    // Tool settings
    // =========================================================================
    /// Command that runs dbspicfg (shell-words split, no shell).
    #[serde(default = "default_tool_command")]
    pub tool_command: String,

    /// Arguments that make the tool print its configuration.
    #[serde(default = "default_export_args")]
    pub export_args: Vec<String>,

    /// Arguments that make the tool read a configuration from stdin.
    #[serde(default = "default_import_args")]
    pub import_args: Vec<String>,

    // =========================================================================
    // Local files
    // =========================================================================
    /// Directory for the temporary import file (system default if unset).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temp_dir: Option<PathBuf>,

    /// NDJSON audit log of applied changes (disabled if unset).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub events_file: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tool_command: default_tool_command(),
            export_args: default_export_args(),
            import_args: default_import_args(),
            temp_dir: None,
            events_file: None,
        }
    }
}
