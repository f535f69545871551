use serde::{Deserialize, Serialize};

/// A TTL as written in configuration.
///
/// Accepts a plain number of seconds (`300`), a numeric string (`"300"`) or a
/// unit-suffixed string (`"5m"`, `"1h"`, `"1d"`). Fractional numbers are kept
/// so that validation can reject them instead of silently truncating.
///
/// Convert to seconds with [`validators::ttl`](crate::validators::ttl).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Ttl {
    /// Whole seconds.
    Seconds(i64),
    /// A non-integer number; always invalid.
    Fractional(f64),
    /// Text form, optionally with an `s`/`m`/`h`/`d`/`w` suffix.
    Text(String),
}

impl From<u32> for Ttl {
    fn from(seconds: u32) -> Self {
        Self::Seconds(i64::from(seconds))
    }
}

impl From<&str> for Ttl {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl std::fmt::Display for Ttl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Seconds(s) => write!(f, "{s}"),
            Self::Fractional(s) => write!(f, "{s}"),
            Self::Text(t) => f.write_str(t),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_each_form() {
        let n: serde_json::Result<Ttl> = serde_json::from_str("300");
        assert!(matches!(n, Ok(Ttl::Seconds(300))), "unexpected: {n:?}");

        let f: serde_json::Result<Ttl> = serde_json::from_str("300.5");
        assert!(matches!(f, Ok(Ttl::Fractional(_))), "unexpected: {f:?}");

        let t: serde_json::Result<Ttl> = serde_json::from_str("\"1h\"");
        assert!(matches!(&t, Ok(Ttl::Text(s)) if s == "1h"), "unexpected: {t:?}");
    }
}
