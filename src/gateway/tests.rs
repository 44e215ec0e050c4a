//! Tests for the commit gateway and the dbspicfg runner.

use super::{ConfigTool, DbspiCfg, commit};
use crate::config::Settings;
use crate::error::SpiError;
use crate::test_support::{FakeTool, SIMPLE};
use tempfile::TempDir;

#[test]
fn test_commit_hands_text_to_tool_and_removes_file() {
    let tool = FakeTool::new("");
    commit(&tool, SIMPLE, None).unwrap();

    let imports = tool.imports();
    assert_eq!(imports.len(), 1);
    assert_eq!(imports[0].text, SIMPLE);
    assert!(!imports[0].path.exists());
}

#[test]
fn test_commit_removes_file_when_import_fails() {
    let tool = FakeTool::failing("");
    let err = commit(&tool, SIMPLE, None).unwrap_err();

    assert!(matches!(err, SpiError::ToolError(_)));
    let imports = tool.imports();
    assert_eq!(imports.len(), 1);
    assert!(!imports[0].path.exists());
}

#[test]
fn test_commit_uses_configured_temp_dir() {
    let temp_dir = TempDir::new().unwrap();
    let tool = FakeTool::new("");
    commit(&tool, SIMPLE, Some(temp_dir.path())).unwrap();

    let staged = &tool.imports()[0].path;
    assert_eq!(staged.parent(), Some(temp_dir.path()));
    assert!(
        staged
            .file_name()
            .unwrap()
            .to_string_lossy()
            .starts_with("dbspi")
    );
    assert_eq!(std::fs::read_dir(temp_dir.path()).unwrap().count(), 0);
}

#[test]
fn test_commit_into_missing_temp_dir_fails_before_import() {
    let temp_dir = TempDir::new().unwrap();
    let tool = FakeTool::new("");
    let result = commit(&tool, SIMPLE, Some(&temp_dir.path().join("missing")));

    assert!(matches!(result, Err(SpiError::UserError(_))));
    assert!(tool.imports().is_empty());
}

#[test]
fn test_from_settings_rejects_empty_command() {
    let settings = Settings {
        tool_command: "   ".to_string(),
        ..Settings::default()
    };
    assert!(DbspiCfg::from_settings(&settings).is_err());
}

#[test]
fn test_missing_program_is_tool_error() {
    let settings = Settings {
        tool_command: "/nonexistent/path/to/dbspicfg".to_string(),
        ..Settings::default()
    };
    let tool = DbspiCfg::from_settings(&settings).unwrap();
    let err = tool.export().unwrap_err();
    assert!(matches!(err, SpiError::ToolError(_)));
    assert!(err.to_string().contains("/nonexistent/path/to/dbspicfg -e"));
}

#[cfg(unix)]
mod script {
    use super::*;
    use std::path::Path;

    /// Write a fake dbspicfg that exports `SIMPLE`, stores imports next to
    /// itself, and fails imports when `fail` is set.
    fn fake_dbspicfg(dir: &Path, fail: bool) -> Settings {
        let script = dir.join("dbspicfg.sh");
        let import = if fail {
            "echo 'line 3: syntax error' >&2; exit 2"
        } else {
            "cat > \"$(dirname \"$0\")/imported.txt\""
        };
        let body = format!(
            "#!/bin/sh\ncase \"$1\" in\n  -e) cat <<'EOF'\n{}EOF\n  ;;\n  -i) {} ;;\nesac\n",
            SIMPLE, import
        );
        std::fs::write(&script, body).unwrap();

        Settings {
            tool_command: format!("/bin/sh '{}'", script.display()),
            ..Settings::default()
        }
    }

    #[test]
    fn test_export_captures_stdout() {
        let temp_dir = TempDir::new().unwrap();
        let tool = DbspiCfg::from_settings(&fake_dbspicfg(temp_dir.path(), false)).unwrap();
        assert_eq!(tool.export().unwrap(), SIMPLE);
    }

    #[test]
    fn test_import_feeds_file_on_stdin() {
        let temp_dir = TempDir::new().unwrap();
        let tool = DbspiCfg::from_settings(&fake_dbspicfg(temp_dir.path(), false)).unwrap();

        commit(&tool, "SYNTAX_VERSION 4\n\n", Some(temp_dir.path())).unwrap();

        let imported = std::fs::read_to_string(temp_dir.path().join("imported.txt")).unwrap();
        assert_eq!(imported, "SYNTAX_VERSION 4\n\n");
    }

    #[test]
    fn test_import_failure_carries_exit_code_and_stderr() {
        let temp_dir = TempDir::new().unwrap();
        let tool = DbspiCfg::from_settings(&fake_dbspicfg(temp_dir.path(), true)).unwrap();

        let err = commit(&tool, "SYNTAX_VERSION 4\n\n", None).unwrap_err();
        let message = err.to_string();
        assert!(matches!(err, SpiError::ToolError(_)));
        assert!(message.contains("exit code 2"), "message: {}", message);
        assert!(message.contains("line 3: syntax error"), "message: {}", message);
    }
}
