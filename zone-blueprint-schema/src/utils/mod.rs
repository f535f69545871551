//! Utility modules.

/// Compact renderings of record values and field errors for log lines.
pub mod log_format;
