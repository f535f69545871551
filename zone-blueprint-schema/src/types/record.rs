use serde::{Deserialize, Serialize};

// ============ DNS Record Types ============

/// DNS record type identifier.
///
/// Serialized as uppercase strings (`"A"`, `"AAAA"`, `"CNAME"`, etc.).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DnsRecordType {
    /// IPv4 address record.
    A,
    /// IPv6 address record.
    Aaaa,
    /// Canonical name (alias) record.
    Cname,
    /// Mail exchange record.
    Mx,
    /// Text record.
    Txt,
    /// Name server record.
    Ns,
    /// Service locator record.
    Srv,
    /// Certificate Authority Authorization record.
    Caa,
    /// Reverse pointer record.
    Ptr,
    /// DANE TLS association record.
    Tlsa,
    /// DNSSEC delegation signer record.
    Ds,
}

impl DnsRecordType {
    /// Uppercase mnemonic as used in zone files and engine calls.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::Aaaa => "AAAA",
            Self::Cname => "CNAME",
            Self::Mx => "MX",
            Self::Txt => "TXT",
            Self::Ns => "NS",
            Self::Srv => "SRV",
            Self::Caa => "CAA",
            Self::Ptr => "PTR",
            Self::Tlsa => "TLSA",
            Self::Ds => "DS",
        }
    }
}

impl std::fmt::Display for DnsRecordType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Type-safe representation of DNS record data.
///
/// Each variant carries the fields specific to that record type.
/// Use [`record_type()`](Self::record_type) to get the [`DnsRecordType`] discriminant,
/// or [`display_value()`](Self::display_value) to get the primary value for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "content")]
pub enum RecordData {
    /// A record: maps a name to an IPv4 address.
    A {
        /// IPv4 address (e.g., `"192.0.2.10"`).
        address: String,
    },

    /// AAAA record: maps a name to an IPv6 address.
    AAAA {
        /// IPv6 address (e.g., `"2001:db8::1"`).
        address: String,
    },

    /// CNAME record: alias from one name to another.
    CNAME {
        /// Target hostname.
        target: String,
    },

    /// MX record: mail exchange server.
    MX {
        /// Priority (lower = preferred).
        priority: u16,
        /// Mail server hostname.
        exchange: String,
    },

    /// TXT record: arbitrary text data.
    TXT {
        /// Text content.
        text: String,
    },

    /// NS record: authoritative name server.
    NS {
        /// Name server hostname.
        nameserver: String,
    },

    /// SRV record: service locator.
    SRV {
        /// Priority (lower = preferred).
        priority: u16,
        /// Weight for load balancing among same-priority targets.
        weight: u16,
        /// TCP/UDP port number.
        port: u16,
        /// Target hostname providing the service.
        target: String,
    },

    /// CAA record: Certificate Authority Authorization.
    CAA {
        /// Issuer critical flag (0 or 128).
        flags: u8,
        /// Property tag (`"issue"`, `"issuewild"`, or `"iodef"`).
        tag: String,
        /// CA domain or reporting URI.
        value: String,
    },

    /// PTR record: reverse mapping to a hostname.
    PTR {
        /// Target hostname.
        target: String,
    },

    /// TLSA record: certificate association for DANE.
    TLSA {
        /// Certificate usage (0-3).
        usage: u8,
        /// Selector (0 = full certificate, 1 = public key).
        selector: u8,
        /// Matching type (0 = exact, 1 = SHA-256, 2 = SHA-512).
        matching_type: u8,
        /// Hex-encoded association data.
        certificate: String,
    },

    /// DS record: delegation signer for a child zone.
    DS {
        /// Key tag of the referenced DNSKEY.
        key_tag: u16,
        /// DNSSEC algorithm number.
        algorithm: u8,
        /// Digest algorithm number.
        digest_type: u8,
        /// Hex-encoded digest.
        digest: String,
    },
}

impl RecordData {
    /// Returns the [`DnsRecordType`] discriminant for this record data.
    pub fn record_type(&self) -> DnsRecordType {
        match self {
            Self::A { .. } => DnsRecordType::A,
            Self::AAAA { .. } => DnsRecordType::Aaaa,
            Self::CNAME { .. } => DnsRecordType::Cname,
            Self::MX { .. } => DnsRecordType::Mx,
            Self::TXT { .. } => DnsRecordType::Txt,
            Self::NS { .. } => DnsRecordType::Ns,
            Self::SRV { .. } => DnsRecordType::Srv,
            Self::CAA { .. } => DnsRecordType::Caa,
            Self::PTR { .. } => DnsRecordType::Ptr,
            Self::TLSA { .. } => DnsRecordType::Tlsa,
            Self::DS { .. } => DnsRecordType::Ds,
        }
    }

    /// Returns the primary value of this record (the address for A/AAAA,
    /// the target for CNAME/SRV/PTR, the exchange for MX, and so on).
    pub fn display_value(&self) -> &str {
        match self {
            Self::A { address } | Self::AAAA { address } => address,
            Self::CNAME { target } | Self::SRV { target, .. } | Self::PTR { target } => target,
            Self::MX { exchange, .. } => exchange,
            Self::TXT { text } => text,
            Self::NS { nameserver } => nameserver,
            Self::CAA { value, .. } => value,
            Self::TLSA { certificate, .. } => certificate,
            Self::DS { digest, .. } => digest,
        }
    }
}

// ============ Record Operations ============

/// A modifier attached to a single record when it is handed to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum RecordModifier {
    /// Record TTL in seconds.
    Ttl(u32),
    /// Provider proxy flag (Cloudflare orange cloud).
    Proxy(bool),
}

/// One record the external DNS engine should create.
///
/// Produced by the record builders, the service compiler and the mail
/// templates. The engine is the only consumer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordOperation {
    /// Owner name relative to the zone (`"@"` for the apex).
    pub name: String,
    /// Type-specific record data.
    pub data: RecordData,
    /// Explicit TTL; the domain default applies when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
    /// Provider proxy flag; left to the provider default when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxied: Option<bool>,
}

impl RecordOperation {
    pub fn new(name: impl Into<String>, data: RecordData) -> Self {
        Self {
            name: name.into(),
            data,
            ttl: None,
            proxied: None,
        }
    }

    #[must_use]
    pub fn with_ttl(mut self, ttl: Option<u32>) -> Self {
        self.ttl = ttl;
        self
    }

    #[must_use]
    pub fn with_proxied(mut self, proxied: Option<bool>) -> Self {
        self.proxied = proxied;
        self
    }

    pub fn record_type(&self) -> DnsRecordType {
        self.data.record_type()
    }

    /// Primary target of the record, see [`RecordData::display_value`].
    pub fn target(&self) -> &str {
        self.data.display_value()
    }

    /// Modifiers in the order the engine receives them: TTL first, then proxy.
    pub fn modifiers(&self) -> Vec<RecordModifier> {
        let mut modifiers = Vec::with_capacity(2);
        if let Some(ttl) = self.ttl {
            modifiers.push(RecordModifier::Ttl(ttl));
        }
        if let Some(proxied) = self.proxied {
            modifiers.push(RecordModifier::Proxy(proxied));
        }
        modifiers
    }
}
