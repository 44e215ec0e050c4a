//! CLI argument parsing for spicfg.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// spicfg: desired-state manager for the DB Smart Plug-in configuration.
///
/// Reads the monitored-database configuration through dbspicfg, applies
/// the requested changes and writes it back in canonical form.
#[derive(Parser, Debug)]
#[command(name = "spicfg")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Settings file (defaults to ./spicfg.yaml when present).
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for spicfg.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the configured databases.
    ///
    /// Exports the live configuration and prints one line per database.
    List,

    /// Print the canonical form of a configuration.
    ///
    /// Reads a file (or the live export) and writes it back normalized.
    Render(RenderArgs),

    /// Apply every entry of a manifest and commit once.
    Apply(ApplyArgs),

    /// Ensure one database is present with the given settings.
    Set(SetArgs),

    /// Ensure one database is absent.
    Remove(RemoveArgs),
}

/// Arguments for the `render` command.
#[derive(Parser, Debug)]
pub struct RenderArgs {
    /// Configuration file to read instead of the live export.
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Write the result here instead of stdout.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// Arguments for the `apply` command.
#[derive(Parser, Debug)]
pub struct ApplyArgs {
    /// YAML manifest with a `databases:` list.
    pub manifest: PathBuf,

    /// Print the resulting configuration instead of importing it.
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the `set` command.
#[derive(Parser, Debug)]
pub struct SetArgs {
    /// Database name.
    pub name: String,

    /// Database type (oracle, informix, sybase, mssql, db2).
    #[arg(long = "type", value_name = "TYPE")]
    pub record_type: Option<String>,

    /// Database home directory (required for new databases).
    #[arg(long)]
    pub home: Option<String>,

    /// Connect string.
    #[arg(long)]
    pub connect: Option<String>,

    /// Alert log path.
    #[arg(long)]
    pub logfile: Option<String>,

    /// Filter as METRIC:CLAUSE; repeat for several metrics.
    #[arg(long = "filter", value_name = "METRIC:CLAUSE")]
    pub filters: Vec<String>,

    /// Remove all filters (with the default inclusive membership).
    #[arg(long, conflicts_with = "filters")]
    pub clear_filters: bool,

    /// How filters combine with existing ones (inclusive, minimum).
    #[arg(long, default_value = "inclusive")]
    pub membership: String,

    /// Print the resulting configuration instead of importing it.
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the `remove` command.
#[derive(Parser, Debug)]
pub struct RemoveArgs {
    /// Database name.
    pub name: String,

    /// Print the resulting configuration instead of importing it.
    #[arg(long)]
    pub dry_run: bool,
}

impl Cli {
    /// Parse command line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
