//! Desired-state reconciliation.
//!
//! A run applies deltas one after another to the same [`Model`]; each call
//! sees what the previous ones did. Filters merge under one of two
//! policies:
//! - `inclusive`: the desired filters replace the configured ones
//! - `minimum`: the desired filters are added, existing ones are kept,
//!   and the desired clause wins for a metric present in both
//!
//! [`Model`]: crate::model::Model

mod delta;
mod merge;


pub use delta::{DesiredState, Ensure, FilterMembership, parse_filter_entries};
pub use merge::{Change, reconcile};
