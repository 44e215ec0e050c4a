//! Error types for spicfg.
//!
//! Only fatal conditions live here. Parse and serialization problems that
//! let a run continue are reported as [`Diagnostic`](crate::model::Diagnostic)
//! values instead.

use crate::exit_codes;
use thiserror::Error;

/// Main error type for spicfg operations.
#[derive(Error, Debug)]
pub enum SpiError {
    /// Bad arguments, unreadable files, or invalid settings.
    #[error("{0}")]
    UserError(String),

    /// A desired-state delta was rejected before touching the model.
    #[error("Rejected change for '{name}': {reason}")]
    InvalidDelta { name: String, reason: String },

    /// The export/import tool could not be run or exited non-zero.
    #[error("dbspicfg failed: {0}")]
    ToolError(String),
}

impl SpiError {
    /// Shorthand for an [`SpiError::InvalidDelta`].
    pub fn invalid_delta(name: impl Into<String>, reason: impl Into<String>) -> Self {
        SpiError::InvalidDelta {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            SpiError::UserError(_) => exit_codes::USER_ERROR,
            SpiError::InvalidDelta { .. } => exit_codes::DELTA_REJECTED,
            SpiError::ToolError(_) => exit_codes::TOOL_FAILURE,
        }
    }
}

/// Result type alias for spicfg operations.
pub type Result<T> = std::result::Result<T, SpiError>;
