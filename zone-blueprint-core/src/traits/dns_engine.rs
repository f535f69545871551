//! DNS engine abstract Trait

use serde::{Deserialize, Serialize};
use zone_blueprint_schema::{RecordData, RecordModifier, RecordOperation};

/// Zone-level modifier passed to [`DnsEngine::domain`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum DomainModifier {
    /// TTL for records that carry none
    DefaultTtl(u32),
    /// Records matching this name are left unmanaged
    IgnoreName(String),
}

/// DNS engine Trait
///
/// The port between compiled record operations and the tool that applies
/// them. Record constructors receive already-validated values; the engine
/// decides the representation of records, registrars, providers and domains.
pub trait DnsEngine {
    type Record;
    type Domain;
    type Registrar;
    type Provider;

    fn a(&self, name: &str, address: &str, modifiers: &[RecordModifier]) -> Self::Record;

    fn aaaa(&self, name: &str, address: &str, modifiers: &[RecordModifier]) -> Self::Record;

    fn cname(&self, name: &str, target: &str, modifiers: &[RecordModifier]) -> Self::Record;

    fn mx(
        &self,
        name: &str,
        priority: u16,
        exchange: &str,
        modifiers: &[RecordModifier],
    ) -> Self::Record;

    fn txt(&self, name: &str, text: &str, modifiers: &[RecordModifier]) -> Self::Record;

    fn ns(&self, name: &str, nameserver: &str, modifiers: &[RecordModifier]) -> Self::Record;

    fn srv(
        &self,
        name: &str,
        priority: u16,
        weight: u16,
        port: u16,
        target: &str,
        modifiers: &[RecordModifier],
    ) -> Self::Record;

    fn caa(
        &self,
        name: &str,
        flags: u8,
        tag: &str,
        value: &str,
        modifiers: &[RecordModifier],
    ) -> Self::Record;

    fn ptr(&self, name: &str, target: &str, modifiers: &[RecordModifier]) -> Self::Record;

    fn tlsa(
        &self,
        name: &str,
        usage: u8,
        selector: u8,
        matching_type: u8,
        certificate: &str,
        modifiers: &[RecordModifier],
    ) -> Self::Record;

    fn ds(
        &self,
        name: &str,
        key_tag: u16,
        algorithm: u8,
        digest_type: u8,
        digest: &str,
        modifiers: &[RecordModifier],
    ) -> Self::Record;

    /// Dispatch a record operation to the matching constructor
    fn record(&self, op: &RecordOperation) -> Self::Record {
        let modifiers = op.modifiers();
        let m = modifiers.as_slice();
        let name = op.name.as_str();
        match &op.data {
            RecordData::A { address } => self.a(name, address, m),
            RecordData::AAAA { address } => self.aaaa(name, address, m),
            RecordData::CNAME { target } => self.cname(name, target, m),
            RecordData::MX { priority, exchange } => self.mx(name, *priority, exchange, m),
            RecordData::TXT { text } => self.txt(name, text, m),
            RecordData::NS { nameserver } => self.ns(name, nameserver, m),
            RecordData::SRV {
                priority,
                weight,
                port,
                target,
            } => self.srv(name, *priority, *weight, *port, target, m),
            RecordData::CAA { flags, tag, value } => self.caa(name, *flags, tag, value, m),
            RecordData::PTR { target } => self.ptr(name, target, m),
            RecordData::TLSA {
                usage,
                selector,
                matching_type,
                certificate,
            } => self.tlsa(name, *usage, *selector, *matching_type, certificate, m),
            RecordData::DS {
                key_tag,
                algorithm,
                digest_type,
                digest,
            } => self.ds(name, *key_tag, *algorithm, *digest_type, digest, m),
        }
    }

    /// Create a registrar handle
    ///
    /// # Arguments
    /// * `name` - Registrar name, e.g. `none`
    fn new_registrar(&self, name: &str) -> Self::Registrar;

    /// Create a DNS provider handle
    ///
    /// # Arguments
    /// * `name` - Provider name, e.g. `cloudflare`
    fn new_dns_provider(&self, name: &str) -> Self::Provider;

    /// Declare a domain with its records
    ///
    /// # Arguments
    /// * `name` - Zone name without trailing dot
    /// * `registrar` - Registrar handle from [`new_registrar`](Self::new_registrar)
    /// * `provider` - Provider handle from [`new_dns_provider`](Self::new_dns_provider)
    /// * `records` - Records in emission order
    /// * `modifiers` - Zone-level modifiers
    fn domain(
        &self,
        name: &str,
        registrar: &Self::Registrar,
        provider: &Self::Provider,
        records: Vec<Self::Record>,
        modifiers: &[DomainModifier],
    ) -> Self::Domain;
}
