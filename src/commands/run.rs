//! Applying a batch of deltas in one session.
//!
//! Shared by `apply`, `set` and `remove`. A rejected delta is reported and
//! skipped; the rest of the batch still goes through and is committed once.

use super::print_warnings;
use serde_json::json;
use spicfg::config::Settings;
use spicfg::error::{Result, SpiError};
use spicfg::events::{Event, EventAction, append_event};
use spicfg::gateway::ConfigTool;
use spicfg::reconcile::DesiredState;
use spicfg::session::Session;
use std::path::Path;
use tracing::{debug, warn};

/// What happened to a batch.
#[derive(Debug)]
pub(super) struct RunOutcome {
    pub committed: bool,
    pub rejected: Vec<SpiError>,
}

impl RunOutcome {
    /// Turn rejections into the command result. Every rejection is printed
    /// once; the last one becomes the returned error.
    pub fn finish(mut self) -> Result<()> {
        debug!(
            committed = self.committed,
            rejected = self.rejected.len(),
            "run finished"
        );
        let last = self.rejected.pop();
        for err in &self.rejected {
            eprintln!("Error: {}", err);
        }
        match last {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

/// Apply `deltas` in order against the live configuration.
///
/// Entries that already failed conversion are counted as rejections. With
/// `dry_run` the resulting configuration is printed instead of imported
/// and no events are recorded.
pub(super) fn run_deltas<T: ConfigTool + ?Sized>(
    tool: &T,
    settings: &Settings,
    deltas: Vec<Result<DesiredState>>,
    dry_run: bool,
) -> Result<RunOutcome> {
    let events_file = if dry_run {
        None
    } else {
        settings.events_file.as_deref()
    };

    let mut session = Session::open(tool)?.with_temp_dir(settings.temp_dir.clone());
    print_warnings(session.diagnostics());

    let mut rejected = Vec::new();
    for delta in deltas {
        let result = delta.and_then(|desired| {
            let change = session.apply(&desired)?;
            Ok((desired.name, change))
        });

        match result {
            Ok((name, change)) => println!("{}: {}", name, change),
            Err(err) => {
                record_event(events_file, rejection_event(&err));
                rejected.push(err);
            }
        }
    }

    if dry_run {
        let rendered = session.render();
        print_warnings(&rendered.diagnostics);
        print!("{}", rendered.text);
        return Ok(RunOutcome {
            committed: false,
            rejected,
        });
    }

    let report = session.commit()?;
    print_warnings(&report.diagnostics);

    if report.committed {
        for applied in &report.changes {
            if let Some(action) = EventAction::for_change(applied.change) {
                record_event(events_file, Event::new(action).with_database(&applied.name));
            }
        }
        record_event(
            events_file,
            Event::new(EventAction::Commit).with_details(json!({
                "changes": report.changes.len(),
                "rejected": rejected.len(),
            })),
        );
        println!("Committed {} change(s).", report.changes.len());
    } else {
        println!("No changes.");
    }

    Ok(RunOutcome {
        committed: report.committed,
        rejected,
    })
}

fn rejection_event(err: &SpiError) -> Event {
    match err {
        SpiError::InvalidDelta { name, reason } => Event::new(EventAction::Reject)
            .with_database(name)
            .with_details(json!({ "reason": reason })),
        other => Event::new(EventAction::Reject)
            .with_details(json!({ "reason": other.to_string() })),
    }
}

/// The configuration is already written by the time most events are
/// recorded, so a failing audit log only warns.
fn record_event(events_file: Option<&Path>, event: Event) {
    let Some(path) = events_file else {
        return;
    };
    if let Err(err) = append_event(path, &event) {
        warn!(error = %err, "failed to record event");
        eprintln!("Warning: {}", err);
    }
}
