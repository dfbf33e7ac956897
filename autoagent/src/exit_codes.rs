//! Stable exit codes for the autoagent CLI.

/// Every requested run finished and its log was written.
pub const OK: i32 = 0;
/// A run failed (gateway error, I/O error, invalid settings).
pub const FAILED: i32 = 1;
/// Required gateway configuration is missing from the environment.
pub const CONFIG: i32 = 2;
