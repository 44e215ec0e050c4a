//! Canonical rendering of a [`Model`].
//!
//! Output is a pure function of the model: records are grouped into type
//! sections and home blocks, sorted by `(type, home, name)`, and filters
//! are sorted by metric. Records without a type or home are left out and
//! reported, as is anything holding a value that cannot be quoted.

use crate::model::{DEFAULT_SYNTAX_VERSION, DbType, Diagnostic, Model, Record, is_quotable};
use tracing::debug;

const HOME_INDENT: &str = "  ";
const DATABASE_INDENT: &str = "    ";
const DETAIL_INDENT: &str = "      ";

/// Rendered text plus anything that had to be dropped on the way.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderOutput {
    pub text: String,
    pub diagnostics: Vec<Diagnostic>,
}

/// Render `model` as text that `dbspicfg -i` accepts.
pub fn serialize(model: &Model) -> RenderOutput {
    let mut out = String::new();
    let mut diagnostics = Vec::new();

    let version = model
        .global
        .syntax_version
        .unwrap_or(DEFAULT_SYNTAX_VERSION);
    out.push_str(&format!("SYNTAX_VERSION {}\n\n", version));

    let listener_name = quotable_global(
        model.global.listener_name.as_deref(),
        "listener name",
        &mut diagnostics,
    );
    let listener_connect = quotable_global(
        model.global.listener_connect.as_deref(),
        "listener connect",
        &mut diagnostics,
    );

    // A listener CONNECT without a LISTENER name only survives a re-parse
    // if it comes before the first DATABASE.
    if listener_name.is_none()
        && let Some(connect) = listener_connect
    {
        out.push_str(&format!("CONNECT \"{}\"\n\n", connect));
    }

    let mut records: Vec<(DbType, &str, &Record)> = Vec::with_capacity(model.len());
    for record in model.records() {
        let diagnostic = match (record.record_type, record.home.as_deref()) {
            (Some(db_type), Some(home)) => match record.unquotable_field() {
                None => {
                    records.push((db_type, home, record));
                    continue;
                }
                Some(field) => Diagnostic::Unquotable {
                    name: Some(record.name.clone()),
                    field,
                },
            },
            _ => Diagnostic::Unserializable {
                name: record.name.clone(),
                missing: record.missing_field().unwrap_or("type"),
            },
        };
        debug!("{}", diagnostic);
        diagnostics.push(diagnostic);
    }
    records.sort_by(|a, b| (a.0, a.1, &a.2.name).cmp(&(b.0, b.1, &b.2.name)));

    let mut current_type: Option<DbType> = None;
    let mut current_home: Option<&str> = None;
    for (db_type, home, record) in records {
        if current_type != Some(db_type) {
            if current_type.is_some() {
                out.push('\n');
            }
            out.push_str(db_type.keyword());
            out.push('\n');
            current_type = Some(db_type);
            current_home = None;
        }

        if current_home != Some(home) {
            out.push_str(&format!("{}HOME \"{}\"\n", HOME_INDENT, home));
            current_home = Some(home);
        }

        write_record(&mut out, record);
    }

    if let Some(listener) = listener_name {
        match listener_connect {
            Some(connect) => out.push_str(&format!(
                "{}LISTENER \"{}\" CONNECT \"{}\"\n",
                HOME_INDENT, listener, connect
            )),
            None => out.push_str(&format!("{}LISTENER \"{}\"\n", HOME_INDENT, listener)),
        }
    }

    RenderOutput {
        text: out,
        diagnostics,
    }
}

/// `value` if it can be written out, otherwise `None` plus a diagnostic.
fn quotable_global<'m>(
    value: Option<&'m str>,
    field: &'static str,
    diagnostics: &mut Vec<Diagnostic>,
) -> Option<&'m str> {
    match value {
        Some(v) if !is_quotable(v) => {
            let diagnostic = Diagnostic::Unquotable { name: None, field };
            debug!("{}", diagnostic);
            diagnostics.push(diagnostic);
            None
        }
        other => other,
    }
}

fn write_record(out: &mut String, record: &Record) {
    match &record.connect {
        Some(connect) => out.push_str(&format!(
            "{}DATABASE \"{}\" CONNECT \"{}\"\n",
            DATABASE_INDENT, record.name, connect
        )),
        None => out.push_str(&format!("{}DATABASE \"{}\"\n", DATABASE_INDENT, record.name)),
    }

    if let Some(logfile) = &record.logfile {
        out.push_str(&format!("{}LOGFILE \"{}\"\n", DETAIL_INDENT, logfile));
    }

    for (metric, clause) in &record.filters {
        out.push_str(&format!("{}FILTER {} \"{}\"\n", DETAIL_INDENT, metric, clause));
    }
}
