//! Applying a [`DesiredState`] to a [`Model`].

use super::delta::{DesiredState, Ensure, FilterMembership};
use crate::error::{Result, SpiError};
use crate::model::{Model, Record};
use std::fmt;
use tracing::debug;

/// What a reconcile call did to the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    /// The model already matched.
    Unchanged,
    Created,
    Updated,
    Removed,
}

impl Change {
    pub fn is_change(&self) -> bool {
        *self != Change::Unchanged
    }
}

impl fmt::Display for Change {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Change::Unchanged => write!(f, "unchanged"),
            Change::Created => write!(f, "created"),
            Change::Updated => write!(f, "updated"),
            Change::Removed => write!(f, "removed"),
        }
    }
}

/// Merge one desired-state delta into `model`.
///
/// Only the record named by the delta is touched. The delta is fully
/// validated and the new record fully built before the model is written,
/// so an `Err` leaves the model exactly as it was.
pub fn reconcile(model: &mut Model, desired: &DesiredState) -> Result<Change> {
    desired.validate()?;

    let change = match desired.ensure {
        Ensure::Absent => match model.remove(&desired.name) {
            Some(_) => Change::Removed,
            None => Change::Unchanged,
        },
        Ensure::Present => {
            let (record, change) = match model.get(&desired.name) {
                Some(existing) => {
                    let updated = apply_fields(existing.clone(), desired);
                    let change = if &updated == existing {
                        Change::Unchanged
                    } else {
                        Change::Updated
                    };
                    (updated, change)
                }
                None => (create(desired)?, Change::Created),
            };
            if change.is_change() {
                model.insert(record);
            }
            change
        }
    };

    debug!(database = %desired.name, %change, "reconciled");
    Ok(change)
}

fn create(desired: &DesiredState) -> Result<Record> {
    let home = desired.home.clone().ok_or_else(|| {
        SpiError::invalid_delta(&desired.name, "home must be set to create a database")
    })?;

    let mut record = Record::new(&desired.name);
    record.record_type = Some(desired.record_type.unwrap_or_default());
    record.home = Some(home);
    Ok(apply_fields(record, desired))
}

fn apply_fields(mut record: Record, desired: &DesiredState) -> Record {
    if let Some(record_type) = desired.record_type {
        record.record_type = Some(record_type);
    }
    if let Some(home) = &desired.home {
        record.home = Some(home.clone());
    }
    if let Some(connect) = &desired.connect {
        record.connect = Some(connect.clone());
    }
    if let Some(logfile) = &desired.logfile {
        record.logfile = Some(logfile.clone());
    }

    if let Some(filters) = &desired.filters {
        match desired.filter_membership {
            FilterMembership::Inclusive => record.filters = filters.clone(),
            FilterMembership::Minimum => record
                .filters
                .extend(filters.iter().map(|(k, v)| (k.clone(), v.clone()))),
        }
    }

    record
}
