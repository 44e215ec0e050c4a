//! Exit code constants for the spicfg CLI.
//!
//! - 0: Success
//! - 1: User error (bad args, unreadable files, bad settings)
//! - 2: A desired-state delta was rejected
//! - 3: The dbspicfg tool failed

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments, unreadable input, or invalid settings.
pub const USER_ERROR: i32 = 1;

/// One or more deltas were rejected before any write.
pub const DELTA_REJECTED: i32 = 2;

/// The external export/import tool failed or could not be started.
pub const TOOL_FAILURE: i32 = 3;
