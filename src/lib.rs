//! spicfg: desired-state management for the DB Smart Plug-in configuration.
//!
//! The monitored-database configuration is read through `dbspicfg -e`,
//! parsed into a [`model::Model`], changed by applying
//! [`reconcile::DesiredState`] deltas, rendered back to canonical text and
//! written with `dbspicfg -i`. [`session::Session`] ties those steps
//! together for one run.

pub mod config;
pub mod error;
pub mod events;
pub mod exit_codes;
pub mod format;
pub mod fs;
pub mod gateway;
pub mod logging;
pub mod manifest;
pub mod model;
pub mod reconcile;
pub mod session;

#[cfg(test)]
mod test_support;
