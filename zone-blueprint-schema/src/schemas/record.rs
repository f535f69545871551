use super::Collector;
use crate::error::{ErrorCode, FieldError, SchemaResult};
use crate::types::{APEX, DnsRecordType, RecordData, RecordInput, RecordOperation};
use crate::validators;

/// Validates the type-specific payload of a record.
pub fn record_data(data: &RecordData) -> SchemaResult<RecordData> {
    let mut c = Collector::new();
    let value = match data {
        RecordData::A { address } => c
            .check("address", validators::ipv4(address))
            .map(|address| RecordData::A { address }),
        RecordData::AAAA { address } => c
            .check("address", validators::ipv6(address))
            .map(|address| RecordData::AAAA { address }),
        RecordData::CNAME { target } => c
            .check("target", validators::target_host(target))
            .map(|target| RecordData::CNAME { target }),
        RecordData::MX { priority, exchange } => {
            let priority = c.check("priority", validators::priority(i64::from(*priority)));
            let exchange = c.check("exchange", validators::target_host(exchange));
            priority
                .zip(exchange)
                .map(|(priority, exchange)| RecordData::MX { priority, exchange })
        }
        RecordData::TXT { text } => c
            .check("text", validators::txt(text))
            .map(|text| RecordData::TXT { text }),
        RecordData::NS { nameserver } => c
            .check("nameserver", validators::target_host(nameserver))
            .map(|nameserver| RecordData::NS { nameserver }),
        RecordData::SRV {
            priority,
            weight,
            port,
            target,
        } => {
            let priority = c.check("priority", validators::priority(i64::from(*priority)));
            let weight = c.check("weight", validators::weight(i64::from(*weight)));
            let port = c.check("port", validators::port(i64::from(*port)));
            let target = c.check("target", validators::target_host(target));
            priority.zip(weight).zip(port).zip(target).map(
                |(((priority, weight), port), target)| RecordData::SRV {
                    priority,
                    weight,
                    port,
                    target,
                },
            )
        }
        RecordData::CAA { flags, tag, value } => {
            let flags = c.check("flags", validators::caa_flags(i64::from(*flags)));
            let tag = c.check("tag", validators::caa_tag(tag));
            let value = c.check("value", validators::non_empty(value));
            flags
                .zip(tag)
                .zip(value)
                .map(|((flags, tag), value)| RecordData::CAA { flags, tag, value })
        }
        RecordData::PTR { target } => c
            .check("target", validators::target_host(target))
            .map(|target| RecordData::PTR { target }),
        RecordData::TLSA {
            usage,
            selector,
            matching_type,
            certificate,
        } => {
            let usage = c.check("usage", validators::tlsa_usage(i64::from(*usage)));
            let selector = c.check("selector", validators::tlsa_selector(i64::from(*selector)));
            let matching_type = c.check(
                "matchingType",
                validators::tlsa_matching_type(i64::from(*matching_type)),
            );
            let certificate = c.check("certificate", validators::hex_digest(certificate));
            usage.zip(selector).zip(matching_type).zip(certificate).map(
                |(((usage, selector), matching_type), certificate)| RecordData::TLSA {
                    usage,
                    selector,
                    matching_type,
                    certificate,
                },
            )
        }
        RecordData::DS {
            key_tag,
            algorithm,
            digest_type,
            digest,
        } => {
            let key_tag = c.check("keyTag", validators::key_tag(i64::from(*key_tag)));
            let algorithm = c.check(
                "algorithm",
                validators::dnssec_algorithm(i64::from(*algorithm)),
            );
            let digest_type = c.check(
                "digestType",
                validators::ds_digest_type(i64::from(*digest_type)),
            );
            let digest = c.check("digest", validators::hex_digest(digest));
            key_tag.zip(algorithm).zip(digest_type).zip(digest).map(
                |(((key_tag, algorithm), digest_type), digest)| RecordData::DS {
                    key_tag,
                    algorithm,
                    digest_type,
                    digest,
                },
            )
        }
    };
    c.finish(value)
}

/// Rules spanning the owner name, the type and the modifiers.
fn check_cross_field(
    c: &mut Collector,
    name: &str,
    record_type: DnsRecordType,
    proxied: Option<bool>,
) {
    if name == APEX && record_type == DnsRecordType::Cname {
        c.push(
            FieldError::new(
                ErrorCode::Custom,
                "CNAME records cannot be placed at the zone apex",
            )
            .at("name"),
        );
    }
    let proxiable = matches!(
        record_type,
        DnsRecordType::A | DnsRecordType::Aaaa | DnsRecordType::Cname
    );
    if proxied == Some(true) && !proxiable {
        c.push(
            FieldError::new(
                ErrorCode::Custom,
                format!("{record_type} records cannot be proxied"),
            )
            .at("proxied"),
        );
    }
}

/// Validates a typed record operation.
pub fn record(op: &RecordOperation) -> SchemaResult<RecordOperation> {
    let mut c = Collector::new();
    let name = c.check("name", validators::record_name(&op.name));
    let data = c.nested("data", record_data(&op.data));
    let ttl = c.optional("ttl", op.ttl, |t| validators::ttl_seconds(i64::from(t)));
    check_cross_field(&mut c, &op.name, op.record_type(), op.proxied);

    let value = name.zip(data).zip(ttl).map(|((name, data), ttl)| {
        RecordOperation::new(name, data)
            .with_ttl(ttl)
            .with_proxied(op.proxied)
    });
    c.finish(value)
}

/// Picks a record type from the fields present when no `type` tag is given.
fn infer_type(input: &RecordInput) -> Result<DnsRecordType, FieldError> {
    if let Some(record_type) = input.record_type {
        return Ok(record_type);
    }
    if input.exchange.is_some() {
        return Ok(DnsRecordType::Mx);
    }
    if input.port.is_some() {
        return Ok(DnsRecordType::Srv);
    }
    if input.tag.is_some() {
        return Ok(DnsRecordType::Caa);
    }
    if input.usage.is_some() || input.certificate.is_some() {
        return Ok(DnsRecordType::Tlsa);
    }
    if input.digest.is_some() || input.key_tag.is_some() {
        return Ok(DnsRecordType::Ds);
    }
    if input.text.is_some() {
        return Ok(DnsRecordType::Txt);
    }
    if input.nameserver.is_some() {
        return Ok(DnsRecordType::Ns);
    }
    if let Some(address) = &input.address {
        if validators::ipv4(address).is_ok() {
            return Ok(DnsRecordType::A);
        }
        if validators::ipv6(address).is_ok() {
            return Ok(DnsRecordType::Aaaa);
        }
        return Err(FieldError::new(
            ErrorCode::InvalidUnion,
            format!("Address '{address}' is neither IPv4 nor IPv6"),
        ));
    }
    if input.target.is_some() {
        return Ok(DnsRecordType::Cname);
    }
    Err(FieldError::new(
        ErrorCode::InvalidUnion,
        "Cannot determine the record type from the given fields",
    ))
}

fn input_data(c: &mut Collector, record_type: DnsRecordType, input: &RecordInput) -> Option<RecordData> {
    match record_type {
        DnsRecordType::A => c
            .require("address", input.address.as_deref(), validators::ipv4)
            .map(|address| RecordData::A { address }),
        DnsRecordType::Aaaa => c
            .require("address", input.address.as_deref(), validators::ipv6)
            .map(|address| RecordData::AAAA { address }),
        DnsRecordType::Cname => c
            .require("target", input.target.as_deref(), validators::target_host)
            .map(|target| RecordData::CNAME { target }),
        DnsRecordType::Mx => {
            let priority = c.require("priority", input.priority, validators::priority);
            let exchange = c.require("exchange", input.exchange.as_deref(), validators::target_host);
            priority
                .zip(exchange)
                .map(|(priority, exchange)| RecordData::MX { priority, exchange })
        }
        DnsRecordType::Txt => c
            .require("text", input.text.as_deref(), validators::txt)
            .map(|text| RecordData::TXT { text }),
        DnsRecordType::Ns => c
            .require("nameserver", input.nameserver.as_deref(), validators::target_host)
            .map(|nameserver| RecordData::NS { nameserver }),
        DnsRecordType::Srv => {
            let priority = c.require("priority", input.priority, validators::priority);
            let weight = c.require("weight", input.weight, validators::weight);
            let port = c.require("port", input.port, validators::port);
            let target = c.require("target", input.target.as_deref(), validators::target_host);
            priority.zip(weight).zip(port).zip(target).map(
                |(((priority, weight), port), target)| RecordData::SRV {
                    priority,
                    weight,
                    port,
                    target,
                },
            )
        }
        DnsRecordType::Caa => {
            let flags = c
                .optional("flags", input.flags, validators::caa_flags)
                .map(|flags| flags.unwrap_or(0));
            let tag = c.require("tag", input.tag.as_deref(), validators::caa_tag);
            let value = c.require("value", input.value.as_deref(), validators::non_empty);
            flags
                .zip(tag)
                .zip(value)
                .map(|((flags, tag), value)| RecordData::CAA { flags, tag, value })
        }
        DnsRecordType::Ptr => c
            .require("target", input.target.as_deref(), validators::target_host)
            .map(|target| RecordData::PTR { target }),
        DnsRecordType::Tlsa => {
            let usage = c.require("usage", input.usage, validators::tlsa_usage);
            let selector = c.require("selector", input.selector, validators::tlsa_selector);
            let matching_type = c.require(
                "matchingType",
                input.matching_type,
                validators::tlsa_matching_type,
            );
            let certificate = c.require(
                "certificate",
                input.certificate.as_deref(),
                validators::hex_digest,
            );
            usage.zip(selector).zip(matching_type).zip(certificate).map(
                |(((usage, selector), matching_type), certificate)| RecordData::TLSA {
                    usage,
                    selector,
                    matching_type,
                    certificate,
                },
            )
        }
        DnsRecordType::Ds => {
            let key_tag = c.require("keyTag", input.key_tag, validators::key_tag);
            let algorithm = c.require("algorithm", input.algorithm, validators::dnssec_algorithm);
            let digest_type = c.require("digestType", input.digest_type, validators::ds_digest_type);
            let digest = c.require("digest", input.digest.as_deref(), validators::hex_digest);
            key_tag.zip(algorithm).zip(digest_type).zip(digest).map(
                |(((key_tag, algorithm), digest_type), digest)| RecordData::DS {
                    key_tag,
                    algorithm,
                    digest_type,
                    digest,
                },
            )
        }
    }
}

/// Normalizes a configuration record into a typed [`RecordOperation`].
///
/// With a `type` tag the matching field set is required. Without one the
/// type is inferred from the fields present, in this order: `exchange` (MX),
/// `port` (SRV), `tag` (CAA), `usage`/`certificate` (TLSA), `digest`/`keyTag`
/// (DS), `text` (TXT), `nameserver` (NS), `address` (A or AAAA by family),
/// `target` (CNAME).
pub fn record_input(input: &RecordInput) -> SchemaResult<RecordOperation> {
    let mut c = Collector::new();
    let Some(record_type) = c.check("type", infer_type(input)) else {
        return c.finish(None);
    };
    let name = c.require("name", input.name.as_deref(), validators::record_name);
    let data = input_data(&mut c, record_type, input);
    let ttl = c.optional("ttl", input.ttl.as_ref(), validators::ttl);
    if let Some(name) = &name {
        check_cross_field(&mut c, name, record_type, input.proxied);
    }

    let value = name.zip(data).zip(ttl).map(|((name, data), ttl)| {
        RecordOperation::new(name, data)
            .with_ttl(ttl)
            .with_proxied(input.proxied)
    });
    c.finish(value)
}
