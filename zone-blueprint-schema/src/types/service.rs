use serde::{Deserialize, Serialize};

use super::Ttl;

/// How a service's subdomain is wired to its backing server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoutingStrategy {
    /// CNAME to the server hostname.
    #[default]
    Direct,
    /// CNAME to the tunnel gateway.
    Tunnel,
    /// Same emission as `Direct`; kept to record intent.
    Proxied,
    /// A record to the internal endpoint, never proxied.
    Internal,
}

impl std::fmt::Display for RoutingStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Direct => "direct",
            Self::Tunnel => "tunnel",
            Self::Proxied => "proxied",
            Self::Internal => "internal",
        })
    }
}

/// Requested proxy behaviour for a service record.
///
/// Deserializes from a boolean or from `"on"`, `"off"`, `"full"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ProxyValue", rename_all = "lowercase")]
pub enum ProxyOption {
    On,
    Off,
    Full,
}

impl ProxyOption {
    /// `On` and `Full` both turn the provider proxy flag on.
    pub fn is_enabled(self) -> bool {
        matches!(self, Self::On | Self::Full)
    }
}

impl From<bool> for ProxyOption {
    fn from(enabled: bool) -> Self {
        if enabled { Self::On } else { Self::Off }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ProxyValue {
    Flag(bool),
    Keyword(ProxyKeyword),
}

#[derive(Deserialize)]
#[serde(rename_all = "lowercase")]
enum ProxyKeyword {
    On,
    Off,
    Full,
}

impl From<ProxyValue> for ProxyOption {
    fn from(value: ProxyValue) -> Self {
        match value {
            ProxyValue::Flag(flag) => flag.into(),
            ProxyValue::Keyword(ProxyKeyword::On) => Self::On,
            ProxyValue::Keyword(ProxyKeyword::Off) => Self::Off,
            ProxyValue::Keyword(ProxyKeyword::Full) => Self::Full,
        }
    }
}

/// The declarative unit compiled into exactly one record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceDefinition {
    /// Relative label, wildcard allowed.
    pub subdomain: String,
    #[serde(default)]
    pub description: String,
    /// Registry name of the backing server; the default server when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server: Option<String>,
    #[serde(default)]
    pub routing: RoutingStrategy,
    /// Fixed IPv4 target. Wins over everything else.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
    /// Fixed CNAME target. Wins over the routing default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxy: Option<ProxyOption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<Ttl>,
}

impl ServiceDefinition {
    pub fn new(subdomain: impl Into<String>, routing: RoutingStrategy) -> Self {
        Self {
            subdomain: subdomain.into(),
            description: String::new(),
            server: None,
            routing,
            ip: None,
            cname: None,
            proxy: None,
            ttl: None,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn with_server(mut self, server: impl Into<String>) -> Self {
        self.server = Some(server.into());
        self
    }

    #[must_use]
    pub fn with_ip(mut self, ip: impl Into<String>) -> Self {
        self.ip = Some(ip.into());
        self
    }

    #[must_use]
    pub fn with_cname(mut self, cname: impl Into<String>) -> Self {
        self.cname = Some(cname.into());
        self
    }

    #[must_use]
    pub fn with_proxy(mut self, proxy: impl Into<ProxyOption>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    #[must_use]
    pub fn with_ttl(mut self, ttl: impl Into<Ttl>) -> Self {
        self.ttl = Some(ttl.into());
        self
    }
}

/// A named group of services; purely organizational.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceCategory {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub services: Vec<ServiceDefinition>,
}

impl ServiceCategory {
    pub fn new(name: impl Into<String>, services: Vec<ServiceDefinition>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            services,
        }
    }
}
