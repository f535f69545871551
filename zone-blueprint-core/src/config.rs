//! Blueprint configuration
//!
//! A blueprint file describes the root domain, the servers and the fixed
//! routing endpoints:
//!
//! ```json
//! {
//!   "rootDomain": "example.com",
//!   "defaultServer": "atlas",
//!   "tunnelTarget": "tunnel.example.com",
//!   "internalIp": "10.10.0.1",
//!   "servers": [
//!     { "name": "atlas", "location": "fsn1", "prefix": "atlas", "ipv4": "203.0.113.10" }
//!   ],
//!   "validation": { "mode": "warn" }
//! }
//! ```

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use zone_blueprint_schema::{
    derive_hostname, schemas, set_validation_config, validate_config_value, validators, Location,
    SchemaResult, Server, ValidationConfigUpdate,
};

use crate::error::{CoreError, CoreResult};
use crate::services::ServiceContext;
use crate::traits::InMemoryServerRegistry;

/// Address substituted for `internal` routing when none is configured
pub const DEFAULT_INTERNAL_IP: &str = "10.10.0.1";

/// Label of the tunnel gateway under the root domain when none is configured
pub const DEFAULT_TUNNEL_LABEL: &str = "tunnel";

/// Fixed endpoints used by the service compiler
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompilerSettings {
    pub root_domain: String,
    pub default_server: String,
    pub tunnel_target: String,
    pub internal_ip: String,
}

impl CompilerSettings {
    pub fn new(root_domain: impl Into<String>, default_server: impl Into<String>) -> Self {
        let root_domain = root_domain.into();
        let tunnel_target = format!(
            "{DEFAULT_TUNNEL_LABEL}.{}",
            root_domain.trim_end_matches('.')
        );
        Self {
            root_domain,
            default_server: default_server.into(),
            tunnel_target,
            internal_ip: DEFAULT_INTERNAL_IP.to_string(),
        }
    }

    #[must_use]
    pub fn with_tunnel_target(mut self, tunnel_target: impl Into<String>) -> Self {
        self.tunnel_target = tunnel_target.into();
        self
    }

    #[must_use]
    pub fn with_internal_ip(mut self, internal_ip: impl Into<String>) -> Self {
        self.internal_ip = internal_ip.into();
        self
    }
}

/// A server as written in a blueprint file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerEntry {
    pub name: String,
    /// Location tag, matched case-insensitively
    pub location: String,
    pub prefix: String,
    pub ipv4: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ipv6: Option<String>,
    /// Derived from prefix, location and root domain when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_ddns: Option<bool>,
}

impl ServerEntry {
    fn to_server(&self, root_domain: &str) -> CoreResult<Server> {
        let location: Location = self.location.parse()?;
        Ok(Server {
            name: self.name.clone(),
            location,
            prefix: self.prefix.clone(),
            hostname: self
                .hostname
                .clone()
                .unwrap_or_else(|| derive_hostname(&self.prefix, location, root_domain)),
            ipv4: self.ipv4.clone(),
            ipv6: self.ipv6.clone(),
            is_ddns: self.is_ddns,
        })
    }
}

/// Blueprint file contents
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlueprintConfig {
    pub root_domain: String,
    pub default_server: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tunnel_target: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub internal_ip: Option<String>,
    #[serde(default)]
    pub servers: Vec<ServerEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<ValidationConfigUpdate>,
}

/// Runs a config value through the mode-aware wrapper and keeps the result.
fn checked<T: Clone>(
    key: &str,
    value: &T,
    schema: impl FnOnce(&T) -> SchemaResult<T>,
) -> CoreResult<T> {
    let result = validate_config_value(key, value, schema)?;
    if !result.success {
        return Err(CoreError::ConfigError(format!(
            "Invalid {key}: {}",
            result.error_messages().join("; ")
        )));
    }
    Ok(result.into_data().unwrap_or_else(|| value.clone()))
}

impl BlueprintConfig {
    /// Parse from a JSON string
    pub fn from_json_str(json: &str) -> CoreResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| CoreError::ConfigError(format!("Invalid blueprint JSON: {e}")))
    }

    /// Read and parse a JSON file
    pub fn from_path(path: impl AsRef<Path>) -> CoreResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            CoreError::ConfigError(format!("Failed to read {}: {e}", path.display()))
        })?;
        log::info!("Loaded blueprint config from {}", path.display());
        Self::from_json_str(&content)
    }

    /// Merge the `validation` section into the process-wide defaults
    pub fn apply_validation(&self) {
        if let Some(update) = &self.validation {
            set_validation_config(update.clone());
        }
    }

    /// Compiler settings with defaults filled in
    pub fn settings(&self) -> CoreResult<CompilerSettings> {
        let root_domain = checked("rootDomain", &self.root_domain, |v| {
            schemas::field(validators::zone_name(v))
        })?;
        let mut settings = CompilerSettings::new(root_domain, self.default_server.clone());
        if let Some(target) = &self.tunnel_target {
            settings.tunnel_target = target.clone();
        }
        if let Some(ip) = &self.internal_ip {
            settings.internal_ip = ip.clone();
        }

        settings.tunnel_target = checked("tunnelTarget", &settings.tunnel_target, |v| {
            schemas::field(validators::hostname(v))
        })?;
        settings.internal_ip = checked("internalIp", &settings.internal_ip, |v| {
            schemas::field(validators::ipv4(v))
        })?;
        Ok(settings)
    }

    /// Build the server registry and compiler settings
    ///
    /// Fails on an unknown location, a duplicate server name, an invalid
    /// value (in strict mode) or a default server missing from the list.
    pub fn build(&self) -> CoreResult<ServiceContext> {
        let settings = self.settings()?;
        let servers = self
            .servers
            .iter()
            .map(|entry| entry.to_server(&settings.root_domain))
            .collect::<CoreResult<Vec<_>>>()?;
        let registry = InMemoryServerRegistry::from_servers(servers)?;
        ServiceContext::new(Arc::new(registry), settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "rootDomain": "example.com",
        "defaultServer": "atlas",
        "servers": [
            { "name": "atlas", "location": "FSN1", "prefix": "atlas", "ipv4": "203.0.113.10" },
            { "name": "nas", "location": "home", "prefix": "nas", "ipv4": "198.51.100.7", "isDdns": true }
        ]
    }"#;

    #[test]
    fn test_settings_defaults() {
        let settings = CompilerSettings::new("example.com", "atlas");
        assert_eq!(settings.tunnel_target, "tunnel.example.com");
        assert_eq!(settings.internal_ip, DEFAULT_INTERNAL_IP);
    }

    #[test]
    fn test_build_from_json() {
        let config = BlueprintConfig::from_json_str(SAMPLE);
        assert!(config.is_ok(), "expected Ok(..), got {config:?}");
        let Ok(config) = config else {
            return;
        };
        let ctx = config.build();
        assert!(ctx.is_ok(), "expected Ok(..), got {:?}", ctx.err());
        let Ok(ctx) = ctx else {
            return;
        };
        assert_eq!(ctx.settings.tunnel_target, "tunnel.example.com");
        let server = ctx.resolve_server(Some("nas"));
        assert!(
            matches!(server, Ok(s) if s.hostname == "nas.home.example.com" && s.is_ddns == Some(true))
        );
    }

    #[test]
    fn test_unknown_location() {
        let json = SAMPLE.replace("FSN1", "mars");
        let res = BlueprintConfig::from_json_str(&json).and_then(|c| c.build());
        assert!(matches!(res, Err(CoreError::UnknownLocation(ref l)) if l == "mars"));
    }

    #[test]
    fn test_missing_default_server() {
        let json = SAMPLE.replace("\"defaultServer\": \"atlas\"", "\"defaultServer\": \"ghost\"");
        let res = BlueprintConfig::from_json_str(&json).and_then(|c| c.build());
        assert!(matches!(res, Err(CoreError::UnknownServer(ref s)) if s == "ghost"));
    }

    #[test]
    fn test_invalid_internal_ip() {
        let Ok(mut config) = BlueprintConfig::from_json_str(SAMPLE) else {
            return;
        };
        config.internal_ip = Some("10.10.0.300".into());
        let res = config.build();
        assert!(
            matches!(&res, Err(CoreError::Validation(e)) if e.context() == "config:internalIp"),
            "got {:?}",
            res.err()
        );
    }

    #[test]
    fn test_malformed_json() {
        let res = BlueprintConfig::from_json_str("{");
        assert!(matches!(res, Err(CoreError::ConfigError(_))));
    }

    #[test]
    fn test_missing_file() {
        let res = BlueprintConfig::from_path("/nonexistent/blueprint.json");
        assert!(matches!(res, Err(CoreError::ConfigError(_))));
    }
}
