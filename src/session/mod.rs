//! One reconciliation run against the live configuration.
//!
//! A run exports the current configuration once, applies any number of
//! deltas to the parsed model in order, and commits the whole model at most
//! once at the end. Nothing is written when no delta changed anything.
//!
//! Runs do not coordinate with each other: each commit replaces the entire
//! configuration, so the last run to commit wins.


use crate::error::Result;
use crate::format::{RenderOutput, parse, serialize};
use crate::gateway::{ConfigTool, commit};
use crate::model::{Diagnostic, Model};
use crate::reconcile::{Change, DesiredState, reconcile};
use std::path::PathBuf;
use tracing::{debug, info};

/// A change that made it into the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedChange {
    pub name: String,
    pub change: Change,
}

/// Outcome of [`Session::commit`].
#[derive(Debug, Clone, PartialEq)]
pub struct CommitReport {
    /// Whether the tool was invoked at all.
    pub committed: bool,
    pub changes: Vec<AppliedChange>,
    /// Records left out of the committed text.
    pub diagnostics: Vec<Diagnostic>,
}

/// A reconciliation run.
pub struct Session<'t, T: ConfigTool + ?Sized> {
    tool: &'t T,
    model: Model,
    diagnostics: Vec<Diagnostic>,
    changes: Vec<AppliedChange>,
    temp_dir: Option<PathBuf>,
}

impl<'t, T: ConfigTool + ?Sized> Session<'t, T> {
    /// Export and parse the current configuration.
    pub fn open(tool: &'t T) -> Result<Self> {
        let exported = tool.export()?;
        let parsed = parse(&exported);
        for diagnostic in &parsed.diagnostics {
            debug!("{}", diagnostic);
        }
        debug!(records = parsed.model.len(), "opened session");

        Ok(Self {
            tool,
            model: parsed.model,
            diagnostics: parsed.diagnostics,
            changes: Vec::new(),
            temp_dir: None,
        })
    }

    /// Stage the import file in `dir` instead of the system temp directory.
    pub fn with_temp_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.temp_dir = dir;
        self
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    /// Diagnostics from parsing the exported configuration.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn changes(&self) -> &[AppliedChange] {
        &self.changes
    }

    /// True once any applied delta changed the model.
    pub fn is_dirty(&self) -> bool {
        !self.changes.is_empty()
    }

    /// Apply one delta. A rejected delta leaves the model untouched and the
    /// session usable.
    pub fn apply(&mut self, desired: &DesiredState) -> Result<Change> {
        let change = reconcile(&mut self.model, desired)?;
        if change.is_change() {
            info!(database = %desired.name, %change, "applied change");
            self.changes.push(AppliedChange {
                name: desired.name.clone(),
                change,
            });
        }
        Ok(change)
    }

    /// Canonical text for the current model, without committing it.
    pub fn render(&self) -> RenderOutput {
        serialize(&self.model)
    }

    /// Write the whole model back through the tool if anything changed.
    pub fn commit(self) -> Result<CommitReport> {
        if !self.is_dirty() {
            debug!("nothing changed, skipping import");
            return Ok(CommitReport {
                committed: false,
                changes: self.changes,
                diagnostics: Vec::new(),
            });
        }

        let rendered = serialize(&self.model);
        commit(self.tool, &rendered.text, self.temp_dir.as_deref())?;
        info!(changes = self.changes.len(), "committed configuration");

        Ok(CommitReport {
            committed: true,
            changes: self.changes,
            diagnostics: rendered.diagnostics,
        })
    }
}
