//! Non-fatal findings reported while parsing or rendering.

use std::fmt;

/// Something odd in the input or model that did not stop the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// A `DATABASE` name was defined again; the later definition wins.
    DuplicateName { name: String },
    /// A token that fits nowhere in the grammar was discarded.
    UnrecognizedToken { token: String, offset: usize },
    /// The input ended right after a keyword that takes a value.
    MissingValue { keyword: &'static str },
    /// A record lacks a field the output needs and was left out.
    Unserializable { name: String, missing: &'static str },
    /// A value holds a double quote or line break and cannot be written
    /// back. `name` is the database, or `None` for the listener block.
    Unquotable {
        name: Option<String>,
        field: &'static str,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::DuplicateName { name } => {
                write!(f, "Found duplicate database entry: {}", name)
            }
            Diagnostic::UnrecognizedToken { token, offset } => {
                write!(f, "Found unrecognized token at byte {}: {}", offset, token)
            }
            Diagnostic::MissingValue { keyword } => {
                write!(f, "Input ended before the value of {}", keyword)
            }
            Diagnostic::Unserializable { name, missing } => {
                write!(f, "Dropping database '{}' from output: no {} set", name, missing)
            }
            Diagnostic::Unquotable {
                name: Some(name),
                field,
            } => write!(
                f,
                "Dropping database '{}' from output: {} contains a double quote or line break",
                name, field
            ),
            Diagnostic::Unquotable { name: None, field } => write!(
                f,
                "Dropping {} from output: it contains a double quote or line break",
                field
            ),
        }
    }
}
