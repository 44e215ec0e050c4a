//! Implementation of the `spicfg list` command.

use super::print_warnings;
use spicfg::error::Result;
use spicfg::format::parse;
use spicfg::gateway::ConfigTool;
use spicfg::model::{Model, Record};

/// Execute the `spicfg list` command.
pub fn cmd_list<T: ConfigTool + ?Sized>(tool: &T) -> Result<()> {
    let exported = tool.export()?;
    let parsed = parse(&exported);
    print_warnings(&parsed.diagnostics);

    for line in list_lines(&parsed.model) {
        println!("{}", line);
    }
    Ok(())
}

/// One line per record in name order, then the listener if any.
pub(super) fn list_lines(model: &Model) -> Vec<String> {
    if model.is_empty() && model.global.listener_name.is_none() {
        return vec!["No databases configured.".to_string()];
    }

    let mut lines: Vec<String> = model.records().map(format_record).collect();
    if let Some(listener) = &model.global.listener_name {
        lines.push(format!("listener {}", listener));
    }
    lines
}

fn format_record(record: &Record) -> String {
    let record_type = record.record_type.map(|t| t.as_str()).unwrap_or("-");
    let home = record.home.as_deref().unwrap_or("-");

    let mut line = format!("{:<16} {:<8} {}", record.name, record_type, home);
    match record.filters.len() {
        0 => {}
        1 => line.push_str(" (1 filter)"),
        n => line.push_str(&format!(" ({} filters)", n)),
    }
    line
}
