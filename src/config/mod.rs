//! Settings for spicfg.
//!
//! This module defines the [`Settings`] struct that represents `spicfg.yaml`.
//! It supports forward-compatible YAML parsing (unknown fields are ignored),
//! defaults for every field, and validation of the loaded values.

mod model;
mod operations;
pub mod types;


pub use model::Settings;
pub use types::{DEFAULT_SETTINGS_FILE, DEFAULT_TOOL_COMMAND};
