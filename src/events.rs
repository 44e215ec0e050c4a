//! Audit log of configuration changes.
//!
//! Events are appended in NDJSON format (one JSON object per line) to the
//! file named by `events_file` in the settings. Each event carries:
//! - `ts`: RFC3339 timestamp
//! - `action`: what happened (`create`, `update`, `remove`, `reject`, `commit`)
//! - `actor`: `user@HOST`
//! - `database`: the database name, for per-database events
//! - `details`: freeform object with action-specific details
//!
//! ```no_run
//! use spicfg::events::{Event, EventAction, append_event};
//! use serde_json::json;
//! use std::path::Path;
//!
//! let event = Event::new(EventAction::Commit).with_details(json!({"changes": 2}));
//! append_event(Path::new("/var/log/spicfg/events.ndjson"), &event)?;
//! # Ok::<(), spicfg::error::SpiError>(())
//! ```

use crate::error::{Result, SpiError};
use crate::reconcile::Change;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

/// Actions that can be logged as events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventAction {
    /// Database entry added
    Create,
    /// Database entry changed
    Update,
    /// Database entry removed
    Remove,
    /// Delta refused by validation or reconciliation
    Reject,
    /// Configuration imported through dbspicfg
    Commit,
}

impl EventAction {
    /// Event for an applied change, or `None` if nothing changed.
    pub fn for_change(change: Change) -> Option<Self> {
        match change {
            Change::Unchanged => None,
            Change::Created => Some(Self::Create),
            Change::Updated => Some(Self::Update),
            Change::Removed => Some(Self::Remove),
        }
    }
}

impl std::fmt::Display for EventAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventAction::Create => write!(f, "create"),
            EventAction::Update => write!(f, "update"),
            EventAction::Remove => write!(f, "remove"),
            EventAction::Reject => write!(f, "reject"),
            EventAction::Commit => write!(f, "commit"),
        }
    }
}

/// An event record for the audit log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub ts: DateTime<Utc>,

    pub action: EventAction,

    /// `user@HOST` of whoever ran the command.
    pub actor: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,

    pub details: Value,
}

impl Event {
    /// Create an event stamped with the current time and actor.
    pub fn new(action: EventAction) -> Self {
        Self {
            ts: Utc::now(),
            action,
            actor: get_actor_string(),
            database: None,
            details: Value::Object(serde_json::Map::new()),
        }
    }

    pub fn with_database(mut self, name: impl Into<String>) -> Self {
        self.database = Some(name.into());
        self
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = details;
        self
    }

    /// Serialize the event to a single-line JSON string.
    pub fn to_ndjson_line(&self) -> Result<String> {
        serde_json::to_string(self)
            .map_err(|e| SpiError::UserError(format!("failed to serialize event to JSON: {}", e)))
    }
}

fn get_actor_string() -> String {
    let user = std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_else(|_| "unknown".to_string());

    let host = hostname::get()
        .map(|h| h.to_string_lossy().to_string())
        .unwrap_or_else(|_| "unknown".to_string());

    format!("{}@{}", user, host)
}

/// Append one event as a line to `path`, creating the file and its parent
/// directory if needed.
pub fn append_event(path: &Path, event: &Event) -> Result<()> {
    let json_line = event.to_ndjson_line()?;

    if let Some(dir) = path.parent()
        && !dir.as_os_str().is_empty()
        && !dir.exists()
    {
        fs::create_dir_all(dir).map_err(|e| {
            SpiError::UserError(format!(
                "failed to create events directory '{}': {}",
                dir.display(),
                e
            ))
        })?;
    }

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| {
            SpiError::UserError(format!(
                "failed to open events file '{}': {}",
                path.display(),
                e
            ))
        })?;

    writeln!(file, "{}", json_line).map_err(|e| {
        SpiError::UserError(format!(
            "failed to write event to '{}': {}",
            path.display(),
            e
        ))
    })?;

    file.sync_all().map_err(|e| {
        SpiError::UserError(format!(
            "failed to sync events file '{}': {}",
            path.display(),
            e
        ))
    })?;

    Ok(())
}
