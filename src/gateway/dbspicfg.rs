//! Process runner for the `dbspicfg` command.
//!
//! `dbspicfg -e` prints the configuration on stdout; `dbspicfg -i` reads a
//! replacement configuration on stdin. Both run without a shell.

use super::ConfigTool;
use crate::config::Settings;
use crate::error::{Result, SpiError};
use std::fs::File;
use std::path::Path;
use std::process::{Command, Output, Stdio};
use tracing::debug;

/// Captured output of a finished tool invocation.
#[derive(Debug, Clone)]
pub struct ToolOutput {
    /// Standard output, untrimmed (it is configuration text).
    pub stdout: String,
    /// Standard error, trimmed.
    pub stderr: String,
}

impl ToolOutput {
    fn from_output(output: &Output) -> Self {
        Self {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        }
    }
}

/// The real export/import tool.
#[derive(Debug, Clone)]
pub struct DbspiCfg {
    program: String,
    base_args: Vec<String>,
    export_args: Vec<String>,
    import_args: Vec<String>,
}

impl DbspiCfg {
    /// Build the runner from settings.
    ///
    /// `tool_command` is split with shell quoting rules, so it may carry a
    /// wrapper such as `sudo -u oracle /path/to/dbspicfg`.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let command = settings.tool_command.trim();
        let mut words = shell_words::split(command).map_err(|e| {
            SpiError::UserError(format!(
                "failed to parse tool_command: {}\nCommand: {}\nFix: check for unmatched quotes.",
                e, command
            ))
        })?;

        if words.is_empty() {
            return Err(SpiError::UserError("tool_command is empty".to_string()));
        }
        let program = words.remove(0);

        Ok(Self {
            program,
            base_args: words,
            export_args: settings.export_args.clone(),
            import_args: settings.import_args.clone(),
        })
    }

    /// Full command line for an invocation, for messages.
    fn describe(&self, args: &[String]) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.base_args.iter().map(String::as_str))
            .chain(args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn run(&self, args: &[String], stdin: Stdio) -> Result<ToolOutput> {
        let command_line = self.describe(args);
        debug!(command = %command_line, "running dbspicfg");

        let output = Command::new(&self.program)
            .args(&self.base_args)
            .args(args)
            .stdin(stdin)
            .output()
            .map_err(|e| {
                SpiError::ToolError(format!(
                    "failed to execute {}: {}\nFix: check tool_command in the settings file.",
                    command_line, e
                ))
            })?;

        let tool_output = ToolOutput::from_output(&output);

        if output.status.success() {
            Ok(tool_output)
        } else {
            let exit_code = output.status.code().unwrap_or(-1);
            let message = if tool_output.stderr.is_empty() {
                tool_output.stdout.trim().to_string()
            } else {
                tool_output.stderr
            };
            Err(SpiError::ToolError(format!(
                "{} failed (exit code {}): {}",
                command_line, exit_code, message
            )))
        }
    }
}

impl ConfigTool for DbspiCfg {
    fn export(&self) -> Result<String> {
        Ok(self.run(&self.export_args, Stdio::null())?.stdout)
    }

    fn import(&self, source: &Path) -> Result<()> {
        let stdin = File::open(source).map_err(|e| {
            SpiError::ToolError(format!(
                "failed to open '{}' for import: {}",
                source.display(),
                e
            ))
        })?;
        self.run(&self.import_args, Stdio::from(stdin))?;
        Ok(())
    }
}
