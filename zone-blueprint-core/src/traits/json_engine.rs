//! JSON engine: renders domains in the shape of a dnscontrol `dnsconfig.json`

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use zone_blueprint_schema::RecordModifier;

use super::dns_engine::{DnsEngine, DomainModifier};
use crate::error::CoreResult;

/// Metadata key carrying the Cloudflare proxy flag
pub const CLOUDFLARE_PROXY_META: &str = "cloudflare_proxy";

/// One record as the engine sees it
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineRecord {
    #[serde(rename = "type")]
    pub record_type: String,
    pub name: String,
    pub target: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mxpreference: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub srvpriority: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub srvweight: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub srvport: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caaflag: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caatag: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tlsausage: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tlsaselector: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tlsamatchingtype: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dskeytag: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dsalgorithm: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dsdigesttype: Option<u8>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub meta: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IgnoredName {
    pub pattern: String,
}

/// One domain with its records and zone settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineDomain {
    pub name: String,
    pub registrar: String,
    pub dns_providers: BTreeMap<String, i32>,
    pub records: Vec<EngineRecord>,
    #[serde(
        rename = "ignored_names",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub ignored_names: Vec<IgnoredName>,
}

/// Top-level document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineDocument {
    pub domains: Vec<EngineDomain>,
}

/// Appends the trailing dot that marks a hostname as fully qualified.
fn fqdn(host: &str) -> String {
    if host.ends_with('.') {
        host.to_string()
    } else {
        format!("{host}.")
    }
}

/// Engine producing serializable values
///
/// Also the reference implementation used in tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonEngine;

impl JsonEngine {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Render domains as pretty-printed JSON
    pub fn render(&self, domains: Vec<EngineDomain>) -> CoreResult<String> {
        Ok(serde_json::to_string_pretty(&EngineDocument { domains })?)
    }

    fn base(
        record_type: &str,
        name: &str,
        target: String,
        modifiers: &[RecordModifier],
    ) -> EngineRecord {
        let mut record = EngineRecord {
            record_type: record_type.to_string(),
            name: name.to_string(),
            target,
            ..EngineRecord::default()
        };
        for modifier in modifiers {
            match modifier {
                RecordModifier::Ttl(ttl) => record.ttl = Some(*ttl),
                RecordModifier::Proxy(on) => {
                    let flag = if *on { "on" } else { "off" };
                    record
                        .meta
                        .insert(CLOUDFLARE_PROXY_META.to_string(), flag.to_string());
                }
            }
        }
        record
    }
}

impl DnsEngine for JsonEngine {
    type Record = EngineRecord;
    type Domain = EngineDomain;
    type Registrar = String;
    type Provider = String;

    fn a(&self, name: &str, address: &str, modifiers: &[RecordModifier]) -> EngineRecord {
        Self::base("A", name, address.to_string(), modifiers)
    }

    fn aaaa(&self, name: &str, address: &str, modifiers: &[RecordModifier]) -> EngineRecord {
        Self::base("AAAA", name, address.to_string(), modifiers)
    }

    fn cname(&self, name: &str, target: &str, modifiers: &[RecordModifier]) -> EngineRecord {
        Self::base("CNAME", name, fqdn(target), modifiers)
    }

    fn mx(
        &self,
        name: &str,
        priority: u16,
        exchange: &str,
        modifiers: &[RecordModifier],
    ) -> EngineRecord {
        EngineRecord {
            mxpreference: Some(priority),
            ..Self::base("MX", name, fqdn(exchange), modifiers)
        }
    }

    fn txt(&self, name: &str, text: &str, modifiers: &[RecordModifier]) -> EngineRecord {
        Self::base("TXT", name, text.to_string(), modifiers)
    }

    fn ns(&self, name: &str, nameserver: &str, modifiers: &[RecordModifier]) -> EngineRecord {
        Self::base("NS", name, fqdn(nameserver), modifiers)
    }

    fn srv(
        &self,
        name: &str,
        priority: u16,
        weight: u16,
        port: u16,
        target: &str,
        modifiers: &[RecordModifier],
    ) -> EngineRecord {
        EngineRecord {
            srvpriority: Some(priority),
            srvweight: Some(weight),
            srvport: Some(port),
            ..Self::base("SRV", name, fqdn(target), modifiers)
        }
    }

    fn caa(
        &self,
        name: &str,
        flags: u8,
        tag: &str,
        value: &str,
        modifiers: &[RecordModifier],
    ) -> EngineRecord {
        EngineRecord {
            caaflag: Some(flags),
            caatag: Some(tag.to_string()),
            ..Self::base("CAA", name, value.to_string(), modifiers)
        }
    }

    fn ptr(&self, name: &str, target: &str, modifiers: &[RecordModifier]) -> EngineRecord {
        Self::base("PTR", name, fqdn(target), modifiers)
    }

    fn tlsa(
        &self,
        name: &str,
        usage: u8,
        selector: u8,
        matching_type: u8,
        certificate: &str,
        modifiers: &[RecordModifier],
    ) -> EngineRecord {
        EngineRecord {
            tlsausage: Some(usage),
            tlsaselector: Some(selector),
            tlsamatchingtype: Some(matching_type),
            ..Self::base("TLSA", name, certificate.to_string(), modifiers)
        }
    }

    fn ds(
        &self,
        name: &str,
        key_tag: u16,
        algorithm: u8,
        digest_type: u8,
        digest: &str,
        modifiers: &[RecordModifier],
    ) -> EngineRecord {
        EngineRecord {
            dskeytag: Some(key_tag),
            dsalgorithm: Some(algorithm),
            dsdigesttype: Some(digest_type),
            ..Self::base("DS", name, digest.to_string(), modifiers)
        }
    }

    fn new_registrar(&self, name: &str) -> String {
        name.to_string()
    }

    fn new_dns_provider(&self, name: &str) -> String {
        name.to_string()
    }

    fn domain(
        &self,
        name: &str,
        registrar: &String,
        provider: &String,
        mut records: Vec<EngineRecord>,
        modifiers: &[DomainModifier],
    ) -> EngineDomain {
        let mut ignored_names = Vec::new();
        for modifier in modifiers {
            match modifier {
                DomainModifier::DefaultTtl(ttl) => {
                    for record in records.iter_mut().filter(|r| r.ttl.is_none()) {
                        record.ttl = Some(*ttl);
                    }
                }
                DomainModifier::IgnoreName(pattern) => ignored_names.push(IgnoredName {
                    pattern: pattern.clone(),
                }),
            }
        }

        EngineDomain {
            name: name.to_string(),
            registrar: registrar.clone(),
            dns_providers: BTreeMap::from([(provider.clone(), -1)]),
            records,
            ignored_names,
        }
    }
}
