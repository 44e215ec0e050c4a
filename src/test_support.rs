use crate::error::{Result, SpiError};
use crate::gateway::ConfigTool;
use std::cell::RefCell;
use std::path::{Path, PathBuf};

pub(crate) const HOME_1: &str = "/u01/app/oracle/product/11.2.0/dbhome_1";
pub(crate) const HOME_2: &str = "/u01/app/oracle/product/11.2.0/dbhome_2";

pub(crate) const UNDO_FILTER: &str =
    "tablespace_name not in (select tablespace_name from dba_tablespaces where contents = 'UNDO')";

/// One database, no filters.
pub(crate) const SIMPLE: &str = r#"SYNTAX_VERSION 4

ORACLE
  HOME "/u01/app/oracle/product/11.2.0/dbhome_1"
    DATABASE "OMLE" CONNECT "itouser/secret@host:1521/OMLE"
      LOGFILE "/u01/app/oracle/diag/rdbms/omle/OMLE/trace/alert_OMLE.log"
"#;

/// Two homes, filters and a listener, already in canonical form.
pub(crate) const INPUT: &str = r#"SYNTAX_VERSION 4

ORACLE
  HOME "/u01/app/oracle/product/11.2.0/dbhome_1"
    DATABASE "OMLE" CONNECT "itouser/secret@host:1521/OMLE"
      LOGFILE "/u01/app/oracle/diag/rdbms/omle/OMLE/trace/alert_OMLE.log"
      FILTER 16 "tablespace_name not in (select tablespace_name from dba_tablespaces where contents = 'UNDO')"
      FILTER 206 "tablespace_name not in (select tablespace_name from dba_tablespaces where contents = 'UNDO')"
    DATABASE "OMLP" CONNECT "itouser/secret@host:1521/OMLP"
    DATABASE "SIMPLE" CONNECT "itouser/secret@host:1521/SIMPLE"
  HOME "/u01/app/oracle/product/11.2.0/dbhome_2"
    DATABASE "FOO" CONNECT "itouser/secret@host:1521/FOO"
      FILTER 200 "y not in z"
  LISTENER "LISTENER" CONNECT "itouser/secret@host:1521"
"#;

/// Same content as [`INPUT`] with comments, odd spacing and lines joined.
pub(crate) const MIXLINES: &str = r#"# exported by dbspicfg
SYNTAX_VERSION     4
ORACLE HOME "/u01/app/oracle/product/11.2.0/dbhome_2"   DATABASE "FOO"
CONNECT "itouser/secret@host:1521/FOO" FILTER 200 "y not in z"

   # second home
HOME
    "/u01/app/oracle/product/11.2.0/dbhome_1"
DATABASE "SIMPLE" CONNECT "itouser/secret@host:1521/SIMPLE"
DATABASE "OMLP"   CONNECT "itouser/secret@host:1521/OMLP"
DATABASE "OMLE" CONNECT "itouser/secret@host:1521/OMLE" LOGFILE "/u01/app/oracle/diag/rdbms/omle/OMLE/trace/alert_OMLE.log"
FILTER 206 "tablespace_name not in (select tablespace_name from dba_tablespaces where contents = 'UNDO')"
FILTER 16 "tablespace_name not in (select tablespace_name from dba_tablespaces where contents = 'UNDO')"
LISTENER "LISTENER"
CONNECT "itouser/secret@host:1521"
"#;

/// What the fake tool was asked to import.
#[derive(Debug, Clone)]
pub(crate) struct Import {
    pub path: PathBuf,
    pub text: String,
}

/// In-memory stand-in for `dbspicfg`.
pub(crate) struct FakeTool {
    export: String,
    fail_import: bool,
    imports: RefCell<Vec<Import>>,
}

impl FakeTool {
    pub(crate) fn new(export: &str) -> Self {
        Self {
            export: export.to_string(),
            fail_import: false,
            imports: RefCell::new(Vec::new()),
        }
    }

    pub(crate) fn failing(export: &str) -> Self {
        Self {
            fail_import: true,
            ..Self::new(export)
        }
    }

    pub(crate) fn imports(&self) -> Vec<Import> {
        self.imports.borrow().clone()
    }
}

impl ConfigTool for FakeTool {
    fn export(&self) -> Result<String> {
        Ok(self.export.clone())
    }

    fn import(&self, source: &Path) -> Result<()> {
        let text = std::fs::read_to_string(source).map_err(|e| {
            SpiError::ToolError(format!("cannot read '{}': {}", source.display(), e))
        })?;
        self.imports.borrow_mut().push(Import {
            path: source.to_path_buf(),
            text,
        });

        if self.fail_import {
            Err(SpiError::ToolError(
                "dbspicfg -i failed (exit code 1): syntax error".to_string(),
            ))
        } else {
            Ok(())
        }
    }
}
