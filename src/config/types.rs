//! Constants and default value functions used by [`Settings`](super::Settings).

/// Settings file looked up in the working directory when `--config` is not given.
pub const DEFAULT_SETTINGS_FILE: &str = "spicfg.yaml";

/// Where the DB SPI instrumentation installs its configuration tool.
pub const DEFAULT_TOOL_COMMAND: &str = "/var/opt/OV/bin/instrumentation/dbspicfg";

// Default value functions for serde
pub(crate) fn default_tool_command() -> String {
    DEFAULT_TOOL_COMMAND.to_string()
}
pub(crate) fn default_export_args() -> Vec<String> {
    vec!["-e".to_string()]
}
pub(crate) fn default_import_args() -> Vec<String> {
    vec!["-i".to_string()]
}
