//! Value types shared by the model, the grammar and the reconciler.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

/// Syntax version written when the exported configuration did not carry one.
pub const DEFAULT_SYNTAX_VERSION: u32 = 4;

/// Database product a record belongs to.
///
/// Ordering is lexical on the lower-case name, which is the order type
/// sections appear in rendered output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DbType {
    #[default]
    Oracle,
    Informix,
    Sybase,
    Mssql,
    Db2,
}

impl DbType {
    pub const ALL: [DbType; 5] = [
        DbType::Oracle,
        DbType::Informix,
        DbType::Sybase,
        DbType::Mssql,
        DbType::Db2,
    ];

    /// Lower-case name used in manifests and for ordering.
    pub fn as_str(&self) -> &'static str {
        match self {
            DbType::Oracle => "oracle",
            DbType::Informix => "informix",
            DbType::Sybase => "sybase",
            DbType::Mssql => "mssql",
            DbType::Db2 => "db2",
        }
    }

    /// Upper-case section keyword used in the configuration text.
    pub fn keyword(&self) -> &'static str {
        match self {
            DbType::Oracle => "ORACLE",
            DbType::Informix => "INFORMIX",
            DbType::Sybase => "SYBASE",
            DbType::Mssql => "MSSQL",
            DbType::Db2 => "DB2",
        }
    }

    /// Match a section keyword. Case-sensitive, like the tool itself.
    pub fn from_keyword(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.keyword() == token)
    }

    /// Parse a lower-case type name.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == s)
    }
}

impl Ord for DbType {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_str().cmp(other.as_str())
    }
}

impl PartialOrd for DbType {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for DbType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Numeric metric identifier a filter applies to.
///
/// Always a non-empty run of ASCII digits. Ordered numerically so that
/// metric 2 sorts before metric 10.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MetricId(String);

impl MetricId {
    /// Returns `None` unless `s` is all digits.
    pub fn new(s: &str) -> Option<Self> {
        if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) {
            Some(Self(s.to_string()))
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn significant(&self) -> &str {
        let trimmed = self.0.trim_start_matches('0');
        if trimmed.is_empty() { "0" } else { trimmed }
    }
}

impl Ord for MetricId {
    fn cmp(&self, other: &Self) -> Ordering {
        let (a, b) = (self.significant(), other.significant());
        a.len()
            .cmp(&b.len())
            .then_with(|| a.cmp(b))
            .then_with(|| self.0.cmp(&other.0))
    }
}

impl PartialOrd for MetricId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for MetricId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for MetricId {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        MetricId::new(&value)
            .ok_or_else(|| format!("metric id must be all digits, got '{}'", value))
    }
}

impl From<MetricId> for String {
    fn from(id: MetricId) -> Self {
        id.0
    }
}

/// Filter clauses of one record, keyed and ordered by metric.
pub type Filters = BTreeMap<MetricId, String>;
