//! Settings loading and validation.

use super::model::Settings;
use crate::error::{Result, SpiError};
use std::path::Path;

impl Settings {
    /// Load settings from a YAML file.
    ///
    /// Unknown fields in the YAML are silently ignored for forward compatibility.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            SpiError::UserError(format!(
                "failed to read settings file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Load settings from `path`, or use the defaults if the file does not exist.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse settings from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        // serde_yaml reads an empty document as null rather than an empty map.
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }

        let settings: Settings = serde_yaml::from_str(yaml).map_err(|e| {
            SpiError::UserError(format!("failed to parse settings YAML: {}", e))
        })?;

        settings.validate()?;
        Ok(settings)
    }

    /// Validate settings values.
    ///
    /// Validation rules:
    /// - `tool_command` must be non-empty and parse as a command line
    /// - `export_args` and `import_args` must be non-empty
    pub fn validate(&self) -> Result<()> {
        let command = self.tool_command.trim();
        if command.is_empty() {
            return Err(SpiError::UserError(
                "settings validation failed: tool_command must not be empty".to_string(),
            ));
        }
        if let Err(e) = shell_words::split(command) {
            return Err(SpiError::UserError(format!(
                "settings validation failed: tool_command cannot be parsed ({}): {}",
                e, command
            )));
        }

        if self.export_args.is_empty() {
            return Err(SpiError::UserError(
                "settings validation failed: export_args must not be empty".to_string(),
            ));
        }
        if self.import_args.is_empty() {
            return Err(SpiError::UserError(
                "settings validation failed: import_args must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}
