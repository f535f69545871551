//! Record builders
//!
//! Thin constructors for [`RecordOperation`]s. Inputs are assumed to be
//! validated already; builders only attach the optional TTL and proxy flag
//! and log the mapping.

use zone_blueprint_schema::utils::log_format::truncate_for_log;
use zone_blueprint_schema::{ProxyOption, RecordData, RecordOperation, Server};

/// Optional per-record settings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecordOptions {
    pub ttl: Option<u32>,
    /// `on` and `full` enable the proxy flag, `off` disables it
    pub proxy: Option<ProxyOption>,
}

impl RecordOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_ttl(mut self, ttl: u32) -> Self {
        self.ttl = Some(ttl);
        self
    }

    #[must_use]
    pub fn with_proxy(mut self, proxy: impl Into<ProxyOption>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }
}

fn build(name: &str, data: RecordData, options: RecordOptions) -> RecordOperation {
    log::debug!(
        "{} {name} -> {}",
        data.record_type(),
        truncate_for_log(data.display_value())
    );
    RecordOperation::new(name, data)
        .with_ttl(options.ttl)
        .with_proxied(options.proxy.map(ProxyOption::is_enabled))
}

pub fn create_a_record(name: &str, address: &str, options: RecordOptions) -> RecordOperation {
    build(
        name,
        RecordData::A {
            address: address.to_string(),
        },
        options,
    )
}

pub fn create_aaaa_record(name: &str, address: &str, options: RecordOptions) -> RecordOperation {
    build(
        name,
        RecordData::AAAA {
            address: address.to_string(),
        },
        options,
    )
}

pub fn create_cname_record(name: &str, target: &str, options: RecordOptions) -> RecordOperation {
    build(
        name,
        RecordData::CNAME {
            target: target.to_string(),
        },
        options,
    )
}

pub fn create_mx_record(
    name: &str,
    priority: u16,
    exchange: &str,
    options: RecordOptions,
) -> RecordOperation {
    build(
        name,
        RecordData::MX {
            priority,
            exchange: exchange.to_string(),
        },
        options,
    )
}

pub fn create_txt_record(name: &str, text: &str, options: RecordOptions) -> RecordOperation {
    build(
        name,
        RecordData::TXT {
            text: text.to_string(),
        },
        options,
    )
}

pub fn create_ns_record(name: &str, nameserver: &str, options: RecordOptions) -> RecordOperation {
    build(
        name,
        RecordData::NS {
            nameserver: nameserver.to_string(),
        },
        options,
    )
}

pub fn create_srv_record(
    name: &str,
    priority: u16,
    weight: u16,
    port: u16,
    target: &str,
    options: RecordOptions,
) -> RecordOperation {
    build(
        name,
        RecordData::SRV {
            priority,
            weight,
            port,
            target: target.to_string(),
        },
        options,
    )
}

pub fn create_caa_record(
    name: &str,
    flags: u8,
    tag: &str,
    value: &str,
    options: RecordOptions,
) -> RecordOperation {
    build(
        name,
        RecordData::CAA {
            flags,
            tag: tag.to_string(),
            value: value.to_string(),
        },
        options,
    )
}

pub fn create_ptr_record(name: &str, target: &str, options: RecordOptions) -> RecordOperation {
    build(
        name,
        RecordData::PTR {
            target: target.to_string(),
        },
        options,
    )
}

/// A record for the server's IPv4 address, plus AAAA when it has IPv6
pub fn server_address_records(
    name: &str,
    server: &Server,
    options: RecordOptions,
) -> Vec<RecordOperation> {
    let mut records = vec![create_a_record(name, &server.ipv4, options)];
    if let Some(ipv6) = &server.ipv6 {
        records.push(create_aaaa_record(name, ipv6, options));
    }
    records
}
