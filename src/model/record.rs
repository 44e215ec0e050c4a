//! Records, the global block, and the model that owns them.

use super::types::{DbType, Filters};
use std::collections::BTreeMap;

/// Settings that are not tied to any database entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlobalConfig {
    /// Value of `SYNTAX_VERSION`, if the input carried one.
    pub syntax_version: Option<u32>,
    /// Name given by `LISTENER`.
    pub listener_name: Option<String>,
    /// `CONNECT` string seen outside of any database entry.
    pub listener_connect: Option<String>,
}

/// One monitored database entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub name: String,
    /// Type section the entry lives in. Required for output.
    pub record_type: Option<DbType>,
    /// Installation directory. Required for output.
    pub home: Option<String>,
    pub connect: Option<String>,
    pub logfile: Option<String>,
    pub filters: Filters,
}

impl Record {
    /// Create an empty record with just a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            record_type: None,
            home: None,
            connect: None,
            logfile: None,
            filters: Filters::new(),
        }
    }

    /// Name of the first field that keeps this record out of rendered output.
    pub fn missing_field(&self) -> Option<&'static str> {
        if self.record_type.is_none() {
            Some("type")
        } else if self.home.is_none() {
            Some("home")
        } else {
            None
        }
    }

    /// Name of the first value that cannot be written between double quotes.
    pub fn unquotable_field(&self) -> Option<&'static str> {
        let unquotable = |value: &Option<String>| value.as_deref().is_some_and(|v| !is_quotable(v));

        if !is_quotable(&self.name) {
            Some("name")
        } else if unquotable(&self.home) {
            Some("home")
        } else if unquotable(&self.connect) {
            Some("connect")
        } else if unquotable(&self.logfile) {
            Some("logfile")
        } else if self.filters.values().any(|clause| !is_quotable(clause)) {
            Some("filter")
        } else {
            None
        }
    }

    pub fn is_serializable(&self) -> bool {
        self.missing_field().is_none() && self.unquotable_field().is_none()
    }
}

/// Whether `value` survives being written as `"value"`. The format has no
/// escapes, so a double quote or a line break would end the string early.
pub fn is_quotable(value: &str) -> bool {
    !value.contains(['"', '\n', '\r'])
}

/// The whole configuration: global block plus records keyed by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Model {
    pub global: GlobalConfig,
    records: BTreeMap<String, Record>,
}

impl Model {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&Record> {
        self.records.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Record> {
        self.records.get_mut(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.records.contains_key(name)
    }

    /// Store a record under its name, returning the one it replaced.
    pub fn insert(&mut self, record: Record) -> Option<Record> {
        self.records.insert(record.name.clone(), record)
    }

    pub fn remove(&mut self, name: &str) -> Option<Record> {
        self.records.remove(name)
    }

    /// Records in name order.
    pub fn records(&self) -> impl Iterator<Item = &Record> {
        self.records.values()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Copy of this model without the records and listener values the
    /// serializer would drop.
    pub fn serializable(&self) -> Model {
        let quotable = |value: &Option<String>| value.clone().filter(|v| is_quotable(v));

        Model {
            global: GlobalConfig {
                syntax_version: self.global.syntax_version,
                listener_name: quotable(&self.global.listener_name),
                listener_connect: quotable(&self.global.listener_connect),
            },
            records: self
                .records
                .iter()
                .filter(|(_, r)| r.is_serializable())
                .map(|(k, r)| (k.clone(), r.clone()))
                .collect(),
        }
    }
}
