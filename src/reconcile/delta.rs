//! Desired state for a single database entry.

use crate::error::{Result, SpiError};
use crate::model::{DbType, Filters, MetricId, is_quotable};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static FILTER_ENTRY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]+):(.+)$").expect("filter entry pattern is valid"));

/// Whether the entry should exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ensure {
    Present,
    Absent,
}

impl Ensure {
    /// Parse an ensure value from a string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "present" => Some(Self::Present),
            "absent" => Some(Self::Absent),
            _ => None,
        }
    }
}

/// How desired filters combine with the filters already configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FilterMembership {
    /// Desired filters are the complete set (default).
    #[default]
    Inclusive,
    /// Desired filters are added; filters not mentioned are kept.
    Minimum,
}

impl FilterMembership {
    /// Parse a membership policy from a string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "inclusive" => Some(Self::Inclusive),
            "minimum" => Some(Self::Minimum),
            _ => None,
        }
    }
}

/// One change a caller wants applied to the model.
///
/// `None` fields are left alone on an existing record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesiredState {
    pub name: String,
    pub ensure: Ensure,
    /// Falls back to `oracle` when a record has to be created.
    pub record_type: Option<DbType>,
    pub home: Option<String>,
    pub connect: Option<String>,
    pub logfile: Option<String>,
    pub filters: Option<Filters>,
    pub filter_membership: FilterMembership,
}

impl DesiredState {
    pub fn present(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ensure: Ensure::Present,
            record_type: None,
            home: None,
            connect: None,
            logfile: None,
            filters: None,
            filter_membership: FilterMembership::default(),
        }
    }

    pub fn absent(name: impl Into<String>) -> Self {
        Self {
            ensure: Ensure::Absent,
            ..Self::present(name)
        }
    }

    pub fn with_type(mut self, record_type: DbType) -> Self {
        self.record_type = Some(record_type);
        self
    }

    pub fn with_home(mut self, home: impl Into<String>) -> Self {
        self.home = Some(home.into());
        self
    }

    pub fn with_connect(mut self, connect: impl Into<String>) -> Self {
        self.connect = Some(connect.into());
        self
    }

    pub fn with_logfile(mut self, logfile: impl Into<String>) -> Self {
        self.logfile = Some(logfile.into());
        self
    }

    pub fn with_filters(mut self, filters: Filters) -> Self {
        self.filters = Some(filters);
        self
    }

    pub fn with_membership(mut self, membership: FilterMembership) -> Self {
        self.filter_membership = membership;
        self
    }

    /// Check everything that would make the delta unsafe to apply.
    ///
    /// Values are written back between double quotes on a single line, so
    /// they may not contain `"` or line breaks.
    pub fn validate(&self) -> Result<()> {
        let reject = |reason: String| Err(SpiError::invalid_delta(&self.name, reason));

        if self.name.is_empty() {
            return reject("name must not be empty".to_string());
        }
        if self.name.chars().any(char::is_whitespace) {
            return reject(format!("name must not contain whitespace: {}", self.name));
        }
        check_text("name", &self.name).or_else(reject)?;

        if let Some(home) = &self.home {
            check_absolute("home", home).or_else(reject)?;
        }
        if let Some(logfile) = &self.logfile {
            check_absolute("logfile", logfile).or_else(reject)?;
        }
        if let Some(connect) = &self.connect {
            check_text("connect", connect).or_else(reject)?;
        }
        if let Some(filters) = &self.filters {
            for (metric, clause) in filters {
                if clause.is_empty() {
                    return reject(format!("filter {} has an empty where clause", metric));
                }
                check_text("filter", clause).or_else(reject)?;
            }
        }

        Ok(())
    }
}

fn check_text(field: &str, value: &str) -> std::result::Result<(), String> {
    if !is_quotable(value) {
        Err(format!(
            "{} must not contain double quotes or line breaks: {}",
            field, value
        ))
    } else {
        Ok(())
    }
}

fn check_absolute(field: &str, value: &str) -> std::result::Result<(), String> {
    if !value.starts_with('/') {
        return Err(format!("{} must be an absolute path: {}", field, value));
    }
    check_text(field, value)
}

/// Parse `"<metric>:<where clause>"` entries into a filter map.
///
/// Later entries for the same metric win. Comma-separated lists are refused
/// because a where clause may itself contain commas.
pub fn parse_filter_entries<S: AsRef<str>>(name: &str, entries: &[S]) -> Result<Filters> {
    let mut filters = Filters::new();

    for entry in entries {
        let entry = entry.as_ref();
        if entry.contains(',') {
            return Err(SpiError::invalid_delta(
                name,
                "filters have to be given as a list, not a comma separated string",
            ));
        }

        let captures = FILTER_ENTRY.captures(entry).ok_or_else(|| {
            SpiError::invalid_delta(
                name,
                format!(
                    "filter must be of the form 'metric:where clause', not {}",
                    entry
                ),
            )
        })?;

        let metric = MetricId::new(&captures[1]).ok_or_else(|| {
            SpiError::invalid_delta(name, format!("invalid filter metric in {}", entry))
        })?;
        filters.insert(metric, captures[2].to_string());
    }

    Ok(filters)
}
