//! Desired-state manifests.
//!
//! A manifest lists the databases a caller wants configured:
//!
//! ```yaml
//! databases:
//!   - name: OMLE
//!     ensure: present
//!     home: /u01/app/oracle/product/11.2.0/dbhome_1
//!     connect: itouser/secret@host:1521/OMLE
//!     filter:
//!       - "16:tablespace_name not in ('UNDOTBS1')"
//!     filter_membership: minimum
//!   - name: OLD
//!     ensure: absent
//! ```
//!
//! Entries are applied in the order they appear.


use crate::error::{Result, SpiError};
use crate::model::DbType;
use crate::reconcile::{DesiredState, Ensure, FilterMembership, parse_filter_entries};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// A parsed manifest file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    #[serde(default)]
    pub databases: Vec<DatabaseEntry>,
}

/// One `databases:` entry, as written by the caller.
///
/// Enumerated values stay strings here so that a bad value rejects only
/// its own entry when converted with [`DatabaseEntry::to_desired`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatabaseEntry {
    pub name: String,

    /// `present` or `absent`; required.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ensure: Option<String>,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub record_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub home: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connect: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logfile: Option<String>,

    /// `"<metric>:<where clause>"` strings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<Vec<String>>,

    /// `inclusive` (default) or `minimum`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter_membership: Option<String>,
}

impl DatabaseEntry {
    /// Convert to a validated delta.
    pub fn to_desired(&self) -> Result<DesiredState> {
        let reject = |reason: String| SpiError::invalid_delta(&self.name, reason);

        let ensure = match self.ensure.as_deref() {
            Some(value) => Ensure::from_str(value).ok_or_else(|| {
                reject(format!(
                    "invalid ensure '{}': expected present or absent",
                    value
                ))
            })?,
            None => return Err(reject("ensure is required".to_string())),
        };

        let record_type = match self.record_type.as_deref() {
            Some(value) => Some(DbType::from_str(value).ok_or_else(|| {
                let known: Vec<&str> = DbType::ALL.iter().map(|t| t.as_str()).collect();
                reject(format!(
                    "invalid type '{}': expected one of {}",
                    value,
                    known.join(", ")
                ))
            })?),
            None => None,
        };

        let filter_membership = match self.filter_membership.as_deref() {
            Some(value) => FilterMembership::from_str(value).ok_or_else(|| {
                reject(format!(
                    "invalid filter_membership '{}': expected inclusive or minimum",
                    value
                ))
            })?,
            None => FilterMembership::default(),
        };

        let filters = match &self.filter {
            Some(entries) => Some(parse_filter_entries(&self.name, entries)?),
            None => None,
        };

        let desired = DesiredState {
            name: self.name.clone(),
            ensure,
            record_type,
            home: self.home.clone(),
            connect: self.connect.clone(),
            logfile: self.logfile.clone(),
            filters,
            filter_membership,
        };
        desired.validate()?;
        Ok(desired)
    }
}

impl Manifest {
    /// Load a manifest from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            SpiError::UserError(format!(
                "failed to read manifest '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content).map_err(|e| match e {
            SpiError::UserError(msg) => {
                SpiError::UserError(format!("{}: {}", path.display(), msg))
            }
            other => other,
        })
    }

    /// Parse a manifest from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }

        let manifest: Manifest = serde_yaml::from_str(yaml)
            .map_err(|e| SpiError::UserError(format!("failed to parse manifest YAML: {}", e)))?;

        let mut seen = HashSet::new();
        for entry in &manifest.databases {
            if !seen.insert(entry.name.as_str()) {
                return Err(SpiError::UserError(format!(
                    "manifest lists database '{}' more than once",
                    entry.name
                )));
            }
        }

        Ok(manifest)
    }

    pub fn is_empty(&self) -> bool {
        self.databases.is_empty()
    }
}
