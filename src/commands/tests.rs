//! Tests for command helpers and batch runs.

use super::apply::cmd_apply;
use super::edit::desired_from_set_args;
use super::list::list_lines;
use super::run::run_deltas;
use crate::cli::{ApplyArgs, SetArgs};
use spicfg::config::Settings;
use spicfg::error::{Result, SpiError};
use spicfg::events::{Event, EventAction};
use spicfg::format::parse;
use spicfg::gateway::ConfigTool;
use spicfg::model::DbType;
use spicfg::reconcile::{DesiredState, FilterMembership};
use std::cell::RefCell;
use std::path::Path;
use tempfile::TempDir;

const EXPORT: &str = r#"SYNTAX_VERSION 4

ORACLE
  HOME "/u01/app/oracle/product/11.2.0/dbhome_1"
    DATABASE "OMLE" CONNECT "itouser/secret@host:1521/OMLE"
      FILTER 16 "owner = 'SYS'"
    DATABASE "OMLP" CONNECT "itouser/secret@host:1521/OMLP"
  LISTENER "LISTENER"
"#;

/// Serves a fixed export and keeps whatever it is asked to import.
///
/// Stands in for `spicfg::test_support::FakeTool`, which is compiled only
/// for the library's own tests and is not visible from the binary.
struct RecordingTool {
    export: String,
    imported: RefCell<Vec<String>>,
}

impl RecordingTool {
    fn new(export: &str) -> Self {
        Self {
            export: export.to_string(),
            imported: RefCell::new(Vec::new()),
        }
    }
}

impl ConfigTool for RecordingTool {
    fn export(&self) -> Result<String> {
        Ok(self.export.clone())
    }

    fn import(&self, source: &Path) -> Result<()> {
        let text = std::fs::read_to_string(source)
            .map_err(|e| SpiError::ToolError(format!("cannot read import file: {}", e)))?;
        self.imported.borrow_mut().push(text);
        Ok(())
    }
}

fn set_args(name: &str) -> SetArgs {
    SetArgs {
        name: name.to_string(),
        record_type: None,
        home: None,
        connect: None,
        logfile: None,
        filters: Vec::new(),
        clear_filters: false,
        membership: "inclusive".to_string(),
        dry_run: false,
    }
}

fn read_events(path: &Path) -> Vec<Event> {
    std::fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

// ============================================================================
// Batch runs
// ============================================================================

#[test]
fn test_run_commits_accepted_deltas_once() {
    let tool = RecordingTool::new(EXPORT);
    let deltas = vec![
        Ok(DesiredState::absent("OMLP")),
        Ok(DesiredState::present("NEW").with_home("/u01/app/oracle/product/11.2.0/dbhome_1")),
    ];

    let outcome = run_deltas(&tool, &Settings::default(), deltas, false).unwrap();
    assert!(outcome.committed);
    assert!(outcome.rejected.is_empty());

    let imported = tool.imported.borrow();
    assert_eq!(imported.len(), 1);
    let model = parse(&imported[0]).model;
    assert!(model.contains("NEW"));
    assert!(!model.contains("OMLP"));
    assert!(model.contains("OMLE"));
}

#[test]
fn test_run_skips_rejected_delta_and_reports_it() {
    let tool = RecordingTool::new(EXPORT);
    let deltas = vec![
        Err(SpiError::invalid_delta(
            "BAD",
            "filter must be of the form 'metric:where clause', not x",
        )),
        Ok(DesiredState::present("NOHOME")),
        Ok(DesiredState::absent("OMLP")),
    ];

    let outcome = run_deltas(&tool, &Settings::default(), deltas, false).unwrap();
    assert!(outcome.committed);
    assert_eq!(outcome.rejected.len(), 2);
    assert_eq!(tool.imported.borrow().len(), 1);

    let err = outcome.finish().unwrap_err();
    assert!(matches!(err, SpiError::InvalidDelta { ref name, .. } if name == "NOHOME"));
}

#[test]
fn test_run_without_changes_does_not_import() {
    let tool = RecordingTool::new(EXPORT);
    let deltas = vec![Ok(DesiredState::absent("MISSING"))];

    let outcome = run_deltas(&tool, &Settings::default(), deltas, false).unwrap();
    assert!(!outcome.committed);
    assert!(tool.imported.borrow().is_empty());
    assert!(outcome.finish().is_ok());
}

#[test]
fn test_dry_run_never_imports_or_logs() {
    let temp_dir = TempDir::new().unwrap();
    let events_file = temp_dir.path().join("events.ndjson");
    let settings = Settings {
        events_file: Some(events_file.clone()),
        ..Settings::default()
    };
    let tool = RecordingTool::new(EXPORT);

    let deltas = vec![Ok(DesiredState::absent("OMLE"))];
    let outcome = run_deltas(&tool, &settings, deltas, true).unwrap();
    assert!(!outcome.committed);
    assert!(tool.imported.borrow().is_empty());
    assert!(!events_file.exists());
}

#[test]
fn test_run_records_events() {
    let temp_dir = TempDir::new().unwrap();
    let events_file = temp_dir.path().join("events.ndjson");
    let settings = Settings {
        events_file: Some(events_file.clone()),
        ..Settings::default()
    };
    let tool = RecordingTool::new(EXPORT);
    let deltas = vec![
        Err(SpiError::invalid_delta("BAD", "name must not contain whitespace: B A D")),
        Ok(DesiredState::absent("OMLP")),
        Ok(DesiredState::present("OMLE").with_connect("itouser/rotated@host:1521/OMLE")),
    ];

    run_deltas(&tool, &settings, deltas, false).unwrap();

    let events = read_events(&events_file);
    let actions: Vec<EventAction> = events.iter().map(|e| e.action).collect();
    assert_eq!(
        actions,
        vec![
            EventAction::Reject,
            EventAction::Remove,
            EventAction::Update,
            EventAction::Commit
        ]
    );
    assert_eq!(events[0].database.as_deref(), Some("BAD"));
    assert_eq!(events[1].database.as_deref(), Some("OMLP"));
    assert_eq!(events[3].details["changes"], 2);
    assert_eq!(events[3].details["rejected"], 1);
}

#[test]
fn test_run_uses_configured_temp_dir() {
    let temp_dir = TempDir::new().unwrap();
    let settings = Settings {
        temp_dir: Some(temp_dir.path().join("missing")),
        ..Settings::default()
    };
    let tool = RecordingTool::new(EXPORT);

    let result = run_deltas(&tool, &settings, vec![Ok(DesiredState::absent("OMLE"))], false);
    assert!(matches!(result, Err(SpiError::UserError(_))));
    assert!(tool.imported.borrow().is_empty());
}

#[test]
fn test_apply_bad_entry_does_not_block_the_rest() {
    let temp_dir = TempDir::new().unwrap();
    let manifest = temp_dir.path().join("dbs.yaml");
    std::fs::write(
        &manifest,
        "databases:\n  - name: OMLP\n    ensure: absent\n  \
         - name: OMLE\n    ensure: present\n    filter_membership: minimun\n",
    )
    .unwrap();
    let tool = RecordingTool::new(EXPORT);

    let args = ApplyArgs {
        manifest,
        dry_run: false,
    };
    let err = cmd_apply(&tool, &Settings::default(), args).unwrap_err();
    assert!(matches!(err, SpiError::InvalidDelta { ref name, .. } if name == "OMLE"));

    let imported = tool.imported.borrow();
    assert_eq!(imported.len(), 1);
    let model = parse(&imported[0]).model;
    assert!(!model.contains("OMLP"));
    assert!(model.contains("OMLE"));
}

// ============================================================================
// set arguments
// ============================================================================

#[test]
fn test_set_args_to_desired() {
    let mut args = set_args("OMLE");
    args.record_type = Some("informix".to_string());
    args.home = Some("/opt/informix".to_string());
    args.filters = vec!["16:owner = 'SYS'".to_string()];
    args.membership = "minimum".to_string();

    let desired = desired_from_set_args(args).unwrap();
    assert_eq!(desired.record_type, Some(DbType::Informix));
    assert_eq!(desired.home.as_deref(), Some("/opt/informix"));
    assert_eq!(desired.filter_membership, FilterMembership::Minimum);
    assert_eq!(desired.filters.map(|f| f.len()), Some(1));
}

#[test]
fn test_set_args_without_filters_leaves_them_alone() {
    let desired = desired_from_set_args(set_args("OMLE")).unwrap();
    assert_eq!(desired.filters, None);
}

#[test]
fn test_set_args_clear_filters() {
    let mut args = set_args("OMLE");
    args.clear_filters = true;
    let desired = desired_from_set_args(args).unwrap();
    assert_eq!(desired.filters.map(|f| f.is_empty()), Some(true));
}

#[test]
fn test_set_args_unknown_type_is_user_error() {
    let mut args = set_args("OMLE");
    args.record_type = Some("postgres".to_string());
    let err = desired_from_set_args(args).unwrap_err();
    assert!(matches!(err, SpiError::UserError(_)));
    assert!(err.to_string().contains("oracle, informix, sybase, mssql, db2"));
}

#[test]
fn test_set_args_unknown_membership_is_user_error() {
    let mut args = set_args("OMLE");
    args.membership = "maximum".to_string();
    assert!(matches!(
        desired_from_set_args(args),
        Err(SpiError::UserError(_))
    ));
}

#[test]
fn test_set_args_bad_filter_is_rejected_delta() {
    let mut args = set_args("OMLE");
    args.filters = vec!["sixteen:owner = 'SYS'".to_string()];
    assert!(matches!(
        desired_from_set_args(args),
        Err(SpiError::InvalidDelta { .. })
    ));
}

// ============================================================================
// list output
// ============================================================================

#[test]
fn test_list_lines() {
    let model = parse(EXPORT).model;
    let lines = list_lines(&model);

    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("OMLE "));
    assert!(lines[0].contains("oracle"));
    assert!(lines[0].ends_with("dbhome_1 (1 filter)"));
    assert!(lines[1].starts_with("OMLP "));
    assert!(lines[1].ends_with("dbhome_1"));
    assert_eq!(lines[2], "listener LISTENER");
}

#[test]
fn test_list_lines_empty() {
    let model = parse("SYNTAX_VERSION 4\n").model;
    assert_eq!(list_lines(&model), vec!["No databases configured."]);
}
