//! In-memory model of an exported dbspi configuration.
//!
//! A [`Model`] holds the global block (syntax version and listener) plus the
//! monitored database [`Record`]s keyed by name. It is built by the parser,
//! mutated by the reconciler, and rendered by the serializer; nothing in the
//! crate keeps one around between runs.

mod diagnostic;
mod record;
pub mod types;


pub use diagnostic::Diagnostic;
pub use record::{GlobalConfig, Model, Record, is_quotable};
pub use types::{DEFAULT_SYNTAX_VERSION, DbType, Filters, MetricId};
