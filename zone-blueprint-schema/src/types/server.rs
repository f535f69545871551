use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::UnknownLocationError;

/// Where a server physically lives, or which cloud region hosts it.
///
/// The tag is part of every derived server hostname, so the set is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Location {
    /// Home lab.
    Home,
    /// Office rack.
    Office,
    /// Hetzner Falkenstein.
    Fsn1,
    /// Hetzner Nuremberg.
    Nbg1,
    /// Hetzner Helsinki.
    Hel1,
    /// Ashburn, Virginia.
    Ash,
    /// Singapore.
    Sin,
}

impl Location {
    pub fn all() -> &'static [Location] {
        &[
            Self::Home,
            Self::Office,
            Self::Fsn1,
            Self::Nbg1,
            Self::Hel1,
            Self::Ash,
            Self::Sin,
        ]
    }

    /// Short tag used in hostnames.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Office => "office",
            Self::Fsn1 => "fsn1",
            Self::Nbg1 => "nbg1",
            Self::Hel1 => "hel1",
            Self::Ash => "ash",
            Self::Sin => "sin",
        }
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Location {
    type Err = UnknownLocationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|loc| loc.tag().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownLocationError(s.to_string()))
    }
}

/// Builds the canonical hostname of a server: `<prefix>.<location>.<root_domain>`.
pub fn derive_hostname(prefix: &str, location: Location, root_domain: &str) -> String {
    format!(
        "{prefix}.{}.{}",
        location.tag(),
        root_domain.trim_end_matches('.')
    )
}

/// A machine that services can be routed to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Server {
    /// Registry key; unique.
    pub name: String,
    pub location: Location,
    /// Short label that starts the hostname.
    pub prefix: String,
    /// Derived FQDN, see [`derive_hostname`].
    pub hostname: String,
    pub ipv4: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ipv6: Option<String>,
    /// Whether the address is kept current by a dynamic DNS client.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_ddns: Option<bool>,
}

impl Server {
    /// Creates a server whose hostname is derived from `prefix`, `location`
    /// and `root_domain`.
    pub fn new(
        name: impl Into<String>,
        location: Location,
        prefix: impl Into<String>,
        ipv4: impl Into<String>,
        root_domain: &str,
    ) -> Self {
        let prefix = prefix.into();
        let hostname = derive_hostname(&prefix, location, root_domain);
        Self {
            name: name.into(),
            location,
            prefix,
            hostname,
            ipv4: ipv4.into(),
            ipv6: None,
            is_ddns: None,
        }
    }

    #[must_use]
    pub fn with_ipv6(mut self, ipv6: impl Into<String>) -> Self {
        self.ipv6 = Some(ipv6.into());
        self
    }

    #[must_use]
    pub fn with_ddns(mut self, is_ddns: bool) -> Self {
        self.is_ddns = Some(is_ddns);
        self
    }
}
