//! Implementation of the `spicfg set` and `spicfg remove` commands.

use super::run::run_deltas;
use crate::cli::{RemoveArgs, SetArgs};
use spicfg::config::Settings;
use spicfg::error::{Result, SpiError};
use spicfg::gateway::ConfigTool;
use spicfg::model::{DbType, Filters};
use spicfg::reconcile::{DesiredState, FilterMembership, parse_filter_entries};

/// Execute the `spicfg set` command.
pub fn cmd_set<T: ConfigTool + ?Sized>(tool: &T, settings: &Settings, args: SetArgs) -> Result<()> {
    let dry_run = args.dry_run;
    let desired = desired_from_set_args(args)?;
    run_deltas(tool, settings, vec![Ok(desired)], dry_run)?.finish()
}

/// Execute the `spicfg remove` command.
pub fn cmd_remove<T: ConfigTool + ?Sized>(
    tool: &T,
    settings: &Settings,
    args: RemoveArgs,
) -> Result<()> {
    let desired = DesiredState::absent(args.name);
    run_deltas(tool, settings, vec![Ok(desired)], args.dry_run)?.finish()
}

/// Build the delta for `set`. Unknown option values are user errors; the
/// delta itself is validated when it is applied.
pub(super) fn desired_from_set_args(args: SetArgs) -> Result<DesiredState> {
    let membership = FilterMembership::from_str(&args.membership).ok_or_else(|| {
        SpiError::UserError(format!(
            "invalid membership '{}': expected inclusive or minimum",
            args.membership
        ))
    })?;

    let mut desired = DesiredState::present(args.name).with_membership(membership);

    if let Some(record_type) = &args.record_type {
        let db_type = DbType::from_str(record_type).ok_or_else(|| {
            let known: Vec<&str> = DbType::ALL.iter().map(|t| t.as_str()).collect();
            SpiError::UserError(format!(
                "invalid database type '{}': expected one of {}",
                record_type,
                known.join(", ")
            ))
        })?;
        desired = desired.with_type(db_type);
    }
    if let Some(home) = args.home {
        desired = desired.with_home(home);
    }
    if let Some(connect) = args.connect {
        desired = desired.with_connect(connect);
    }
    if let Some(logfile) = args.logfile {
        desired = desired.with_logfile(logfile);
    }

    if args.clear_filters {
        desired = desired.with_filters(Filters::new());
    } else if !args.filters.is_empty() {
        let filters = parse_filter_entries(&desired.name, &args.filters)?;
        desired = desired.with_filters(filters);
    }

    Ok(desired)
}
