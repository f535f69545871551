use serde::{Deserialize, Serialize};

use super::Ttl;

/// Per-zone settings handed to the assembler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainConfig {
    /// Zone name, FQDN without trailing dot.
    pub name: String,
    /// Registrar reference passed to the engine's `new_registrar`.
    pub registrar: String,
    /// DNS provider reference passed to the engine's `new_dns_provider`.
    pub dns_provider: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_ttl: Option<Ttl>,
    /// Record names the engine must leave untouched (glob patterns allowed).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ignore_patterns: Vec<String>,
}

impl DomainConfig {
    pub fn new(
        name: impl Into<String>,
        registrar: impl Into<String>,
        dns_provider: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            registrar: registrar.into(),
            dns_provider: dns_provider.into(),
            default_ttl: None,
            ignore_patterns: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_default_ttl(mut self, ttl: impl Into<Ttl>) -> Self {
        self.default_ttl = Some(ttl.into());
        self
    }

    #[must_use]
    pub fn with_ignore_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.ignore_patterns.push(pattern.into());
        self
    }
}
