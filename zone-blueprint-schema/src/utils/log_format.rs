//! Log formatting helpers
//!
//! DKIM keys and SPF strings can run to several hundred bytes; log lines keep
//! only a prefix of them. Warn-mode validation summaries are built here too.

use crate::error::FieldError;

/// Maximum number of bytes of a record value kept in a log line.
const TRUNCATE_LIMIT: usize = 96;

/// Largest char boundary not after `index`.
fn floor_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        return s.len();
    }
    let mut i = index;
    while i > 0 && !s.is_char_boundary(i) {
        i -= 1;
    }
    i
}

/// Shortens a record value for a log line.
///
/// Values within the limit are returned unchanged; longer ones keep their
/// first `TRUNCATE_LIMIT` bytes followed by the total length.
pub fn truncate_for_log(value: &str) -> String {
    if value.len() <= TRUNCATE_LIMIT {
        return value.to_string();
    }
    format!(
        "{}… ({} bytes)",
        &value[..floor_char_boundary(value, TRUNCATE_LIMIT)],
        value.len()
    )
}

/// One-line summary of failed checks, as passed to the validation logger.
///
/// `Validation failed for server:atlas (2 errors): ipv4: Invalid IPv4 address; …`
pub fn format_error_summary(context: &str, errors: &[FieldError]) -> String {
    let noun = if errors.len() == 1 { "error" } else { "errors" };
    let details = errors
        .iter()
        .map(|e| truncate_for_log(&e.to_string()))
        .collect::<Vec<_>>()
        .join("; ");
    format!(
        "Validation failed for {context} ({} {noun}): {details}",
        errors.len()
    )
}
