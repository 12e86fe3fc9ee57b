//! Stable exit codes for the generator CLIs.

/// Output file written.
pub const OK: i32 = 0;
/// I/O, config, or unresolved-placeholder failure.
pub const FAILURE: i32 = 1;
/// Missing or invalid command-line argument (same code clap uses).
pub const USAGE: i32 = 2;
