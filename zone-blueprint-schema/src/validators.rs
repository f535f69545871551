//! Primitive validators
//!
//! Pure functions over single values. They never read the validation
//! configuration, never log and never panic; failure is reported only through
//! the returned [`FieldError`]. Successful calls return the value in its
//! normalized form, so feeding the output back in always succeeds.

use std::net::Ipv6Addr;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{ErrorCode, FieldError};
use crate::types::Ttl;

/// Smallest accepted TTL in seconds.
pub const MIN_TTL: u32 = 60;
/// Largest accepted TTL in seconds.
pub const MAX_TTL: u32 = 86_400;
/// Maximum length of a hostname in presentation form.
pub const MAX_NAME_LEN: usize = 253;
/// Property tags accepted in CAA records.
pub const CAA_TAGS: [&str; 3] = ["issue", "issuewild", "iodef"];
/// DNSSEC algorithm numbers accepted in DS records.
pub const DNSSEC_ALGORITHMS: [u8; 12] = [1, 3, 5, 6, 7, 8, 10, 12, 13, 14, 15, 16];
/// DS digest types (SHA-1, SHA-256, SHA-384).
pub const DS_DIGEST_TYPES: [u8; 3] = [1, 2, 4];

#[allow(clippy::expect_used)]
fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("static validator pattern must compile")
}

static IPV4_RE: LazyLock<Regex> = LazyLock::new(|| {
    compile(
        r"^(?:(?:25[0-5]|2[0-4][0-9]|1[0-9]{2}|[1-9]?[0-9])\.){3}(?:25[0-5]|2[0-4][0-9]|1[0-9]{2}|[1-9]?[0-9])$",
    )
});

static LABEL_RE: LazyLock<Regex> =
    LazyLock::new(|| compile(r"^[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?$"));

static UNDERSCORE_LABEL_RE: LazyLock<Regex> =
    LazyLock::new(|| compile(r"^_[A-Za-z0-9][A-Za-z0-9_-]{0,61}$"));

static DURATION_RE: LazyLock<Regex> = LazyLock::new(|| compile(r"^([0-9]+)([smhdw]?)$"));

static EMAIL_LOCAL_RE: LazyLock<Regex> = LazyLock::new(|| compile(r"^[A-Za-z0-9._%+-]+$"));

static HEX_RE: LazyLock<Regex> = LazyLock::new(|| compile(r"^[0-9A-Fa-f]+$"));

fn is_label(s: &str) -> bool {
    LABEL_RE.is_match(s)
}

fn is_underscore_label(s: &str) -> bool {
    UNDERSCORE_LABEL_RE.is_match(s)
}

fn check_name_length(value: &str, what: &str) -> Result<(), FieldError> {
    if value.is_empty() {
        return Err(FieldError::new(
            ErrorCode::TooSmall,
            format!("{what} must not be empty"),
        ));
    }
    if value.len() > MAX_NAME_LEN {
        return Err(FieldError::new(
            ErrorCode::TooBig,
            format!("{what} must be at most {MAX_NAME_LEN} characters"),
        ));
    }
    Ok(())
}

// ============ Addresses ============

/// Dotted-quad IPv4 address. Leading zeros, CIDR suffixes and surrounding
/// whitespace are rejected.
pub fn ipv4(value: &str) -> Result<String, FieldError> {
    if IPV4_RE.is_match(value) {
        Ok(value.to_string())
    } else {
        Err(FieldError::new(
            ErrorCode::InvalidString,
            format!("Invalid IPv4 address '{value}'"),
        ))
    }
}

/// IPv6 address in full or `::`-compressed form.
///
/// Forms with an embedded dotted quad (`::ffff:192.0.2.1`) are rejected here;
/// use [`ip_address`] where either family is acceptable.
pub fn ipv6(value: &str) -> Result<String, FieldError> {
    if value.contains('.') {
        return Err(FieldError::new(
            ErrorCode::InvalidString,
            format!("IPv4-embedded IPv6 address '{value}' is not accepted"),
        ));
    }
    value
        .parse::<Ipv6Addr>()
        .map(|_| value.to_string())
        .map_err(|_| {
            FieldError::new(
                ErrorCode::InvalidString,
                format!("Invalid IPv6 address '{value}'"),
            )
        })
}

/// Either an IPv4 or an IPv6 address.
pub fn ip_address(value: &str) -> Result<String, FieldError> {
    ipv4(value).or_else(|_| ipv6(value)).map_err(|_| {
        FieldError::new(
            ErrorCode::InvalidString,
            format!("Invalid IP address '{value}'"),
        )
    })
}

// ============ Names ============

/// RFC 1123 hostname: labels of 1-63 letters, digits and inner hyphens,
/// at most 253 characters, no leading or trailing dot.
pub fn hostname(value: &str) -> Result<String, FieldError> {
    check_name_length(value, "Hostname")?;
    if value.starts_with('.') || value.ends_with('.') {
        return Err(FieldError::new(
            ErrorCode::InvalidString,
            "Hostname must not start or end with a dot",
        ));
    }
    if let Some(bad) = value.split('.').find(|label| !is_label(label)) {
        return Err(FieldError::new(
            ErrorCode::InvalidString,
            format!("Invalid hostname label '{bad}'"),
        ));
    }
    Ok(value.to_string())
}

/// A single hostname label, e.g. a server prefix or a DKIM selector.
pub fn host_label(value: &str) -> Result<String, FieldError> {
    if is_label(value) {
        Ok(value.to_string())
    } else {
        Err(FieldError::new(
            ErrorCode::InvalidString,
            format!("Invalid hostname label '{value}'"),
        ))
    }
}

/// Record target such as a CNAME, MX or NS host.
///
/// Like [`hostname`], but underscore labels are allowed so that DKIM and
/// service names (`fm1._domainkey.example.com`) can be targets.
pub fn target_host(value: &str) -> Result<String, FieldError> {
    check_name_length(value, "Target")?;
    if value.starts_with('.') || value.ends_with('.') {
        return Err(FieldError::new(
            ErrorCode::InvalidString,
            "Target must not start or end with a dot",
        ));
    }
    if let Some(bad) = value
        .split('.')
        .find(|label| !is_label(label) && !is_underscore_label(label))
    {
        return Err(FieldError::new(
            ErrorCode::InvalidString,
            format!("Invalid target label '{bad}'"),
        ));
    }
    Ok(value.to_string())
}

/// Zone name: a hostname with at least two labels.
pub fn zone_name(value: &str) -> Result<String, FieldError> {
    let name = hostname(value)?;
    if !name.contains('.') {
        return Err(FieldError::new(
            ErrorCode::InvalidString,
            format!("Domain '{value}' must be fully qualified"),
        ));
    }
    Ok(name)
}

/// One DNS label, or `@`, or `*`, or an underscore label which may carry
/// further dot-separated sub-labels (`_dmarc`, `_sip._tcp`).
pub fn dns_label(value: &str) -> Result<String, FieldError> {
    if value == "@" || value == "*" {
        return Ok(value.to_string());
    }
    if value.starts_with('_') {
        check_name_length(value, "Label")?;
        let mut parts = value.split('.');
        let head_ok = parts.next().is_some_and(is_underscore_label);
        if head_ok && parts.all(|p| is_label(p) || is_underscore_label(p)) {
            return Ok(value.to_string());
        }
        return Err(FieldError::new(
            ErrorCode::InvalidString,
            format!("Invalid service label '{value}'"),
        ));
    }
    if is_label(value) {
        Ok(value.to_string())
    } else {
        Err(FieldError::new(
            ErrorCode::InvalidString,
            format!("Invalid DNS label '{value}'"),
        ))
    }
}

/// Owner name relative to the zone: `@`, or dot-separated labels where the
/// first may be `*` and any may be an underscore label.
pub fn record_name(value: &str) -> Result<String, FieldError> {
    if value == "@" {
        return Ok(value.to_string());
    }
    check_name_length(value, "Record name")?;
    for (i, label) in value.split('.').enumerate() {
        let ok = (i == 0 && label == "*") || is_label(label) || is_underscore_label(label);
        if !ok {
            return Err(FieldError::new(
                ErrorCode::InvalidString,
                format!("Invalid record name label '{label}'"),
            ));
        }
    }
    Ok(value.to_string())
}

// ============ TTL ============

fn parse_duration(text: &str) -> Result<i64, FieldError> {
    let text = text.trim();
    let Some(caps) = DURATION_RE.captures(text) else {
        return Err(FieldError::new(
            ErrorCode::InvalidString,
            format!("Invalid TTL '{text}', expected seconds or a value like 5m, 1h, 1d"),
        ));
    };
    let amount: i64 = caps[1]
        .parse()
        .map_err(|_| FieldError::new(ErrorCode::TooBig, "TTL is out of range"))?;
    let unit: i64 = match caps.get(2).map_or("", |m| m.as_str()) {
        "m" => 60,
        "h" => 3_600,
        "d" => 86_400,
        "w" => 604_800,
        // empty or "s"
        _ => 1,
    };
    amount
        .checked_mul(unit)
        .ok_or_else(|| FieldError::new(ErrorCode::TooBig, "TTL is out of range"))
}

/// Normalizes a configured TTL to seconds and range-checks it.
pub fn ttl(value: &Ttl) -> Result<u32, FieldError> {
    let seconds = match value {
        Ttl::Seconds(s) => *s,
        Ttl::Fractional(f) => {
            return Err(FieldError::new(
                ErrorCode::InvalidType,
                format!("TTL must be a whole number of seconds, got {f}"),
            ));
        }
        Ttl::Text(text) => parse_duration(text)?,
    };
    ttl_seconds(seconds)
}

/// Range check: `MIN_TTL <= seconds <= MAX_TTL`.
pub fn ttl_seconds(seconds: i64) -> Result<u32, FieldError> {
    if seconds < i64::from(MIN_TTL) {
        return Err(FieldError::new(
            ErrorCode::TooSmall,
            format!("TTL must be at least {MIN_TTL} seconds, got {seconds}"),
        ));
    }
    if seconds > i64::from(MAX_TTL) {
        return Err(FieldError::new(
            ErrorCode::TooBig,
            format!("TTL must be at most {MAX_TTL} seconds, got {seconds}"),
        ));
    }
    u32::try_from(seconds)
        .map_err(|_| FieldError::new(ErrorCode::TooBig, "TTL is out of range"))
}

// ============ Numbers ============

fn bounded(value: i64, min: i64, max: i64, what: &str) -> Result<i64, FieldError> {
    if value < min {
        return Err(FieldError::new(
            ErrorCode::TooSmall,
            format!("{what} must be between {min} and {max}, got {value}"),
        ));
    }
    if value > max {
        return Err(FieldError::new(
            ErrorCode::TooBig,
            format!("{what} must be between {min} and {max}, got {value}"),
        ));
    }
    Ok(value)
}

fn to_u16(value: i64) -> Result<u16, FieldError> {
    u16::try_from(value).map_err(|_| FieldError::new(ErrorCode::TooBig, "Value out of range"))
}

fn to_u8(value: i64) -> Result<u8, FieldError> {
    u8::try_from(value).map_err(|_| FieldError::new(ErrorCode::TooBig, "Value out of range"))
}

/// MX/SRV priority, 0-65535.
pub fn priority(value: i64) -> Result<u16, FieldError> {
    to_u16(bounded(value, 0, 65_535, "Priority")?)
}

/// SRV weight, 0-65535.
pub fn weight(value: i64) -> Result<u16, FieldError> {
    to_u16(bounded(value, 0, 65_535, "Weight")?)
}

/// Port number, 1-65535. Port 0 is reserved.
pub fn port(value: i64) -> Result<u16, FieldError> {
    to_u16(bounded(value, 1, 65_535, "Port")?)
}

/// DNSKEY key tag, 0-65535.
pub fn key_tag(value: i64) -> Result<u16, FieldError> {
    to_u16(bounded(value, 0, 65_535, "Key tag")?)
}

// ============ Closed sets ============

pub fn caa_tag(value: &str) -> Result<String, FieldError> {
    if CAA_TAGS.contains(&value) {
        Ok(value.to_string())
    } else {
        Err(FieldError::new(
            ErrorCode::InvalidEnumValue,
            format!("CAA tag must be one of issue, issuewild, iodef, got '{value}'"),
        ))
    }
}

/// CAA flags: 0, or 128 for issuer-critical.
pub fn caa_flags(value: i64) -> Result<u8, FieldError> {
    if value == 0 || value == 128 {
        to_u8(value)
    } else {
        Err(FieldError::new(
            ErrorCode::InvalidEnumValue,
            format!("CAA flags must be 0 or 128, got {value}"),
        ))
    }
}

pub fn dnssec_algorithm(value: i64) -> Result<u8, FieldError> {
    match u8::try_from(value) {
        Ok(code) if DNSSEC_ALGORITHMS.contains(&code) => Ok(code),
        _ => Err(FieldError::new(
            ErrorCode::InvalidEnumValue,
            format!("Unsupported DNSSEC algorithm {value}"),
        )),
    }
}

pub fn ds_digest_type(value: i64) -> Result<u8, FieldError> {
    match u8::try_from(value) {
        Ok(code) if DS_DIGEST_TYPES.contains(&code) => Ok(code),
        _ => Err(FieldError::new(
            ErrorCode::InvalidEnumValue,
            format!("Unsupported DS digest type {value}"),
        )),
    }
}

/// TLSA certificate usage, 0-3.
pub fn tlsa_usage(value: i64) -> Result<u8, FieldError> {
    to_u8(bounded(value, 0, 3, "TLSA usage")?)
}

/// TLSA selector, 0-1.
pub fn tlsa_selector(value: i64) -> Result<u8, FieldError> {
    to_u8(bounded(value, 0, 1, "TLSA selector")?)
}

/// TLSA matching type, 0-2.
pub fn tlsa_matching_type(value: i64) -> Result<u8, FieldError> {
    to_u8(bounded(value, 0, 2, "TLSA matching type")?)
}

// ============ Text ============

/// Non-empty hex string with an even number of digits.
pub fn hex_digest(value: &str) -> Result<String, FieldError> {
    if value.is_empty() || value.len() % 2 != 0 || !HEX_RE.is_match(value) {
        return Err(FieldError::new(
            ErrorCode::InvalidString,
            "Digest must be an even-length hex string",
        ));
    }
    Ok(value.to_string())
}

/// Address for DMARC aggregate reports.
pub fn email(value: &str) -> Result<String, FieldError> {
    let invalid = || {
        FieldError::new(
            ErrorCode::InvalidString,
            format!("Invalid e-mail address '{value}'"),
        )
    };
    let Some((local, domain)) = value.split_once('@') else {
        return Err(invalid());
    };
    if !EMAIL_LOCAL_RE.is_match(local) || zone_name(domain).is_err() {
        return Err(invalid());
    }
    Ok(value.to_string())
}

/// TXT content: non-empty, no control characters.
pub fn txt(value: &str) -> Result<String, FieldError> {
    if value.is_empty() {
        return Err(FieldError::new(
            ErrorCode::TooSmall,
            "TXT content must not be empty",
        ));
    }
    if value.chars().any(char::is_control) {
        return Err(FieldError::new(
            ErrorCode::InvalidString,
            "TXT content must not contain control characters",
        ));
    }
    Ok(value.to_string())
}

/// Any string with non-whitespace content.
pub fn non_empty(value: &str) -> Result<String, FieldError> {
    if value.trim().is_empty() {
        Err(FieldError::new(ErrorCode::TooSmall, "Must not be empty"))
    } else {
        Ok(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ipv4_accepts_dotted_quads() {
        for ip in ["0.0.0.0", "192.0.2.1", "255.255.255.255", "10.10.0.1"] {
            assert!(ipv4(ip).is_ok(), "{ip} should be valid");
        }
    }

    #[test]
    fn ipv4_rejects_garbage() {
        for ip in [
            "256.0.0.1",
            "1.2.3",
            "1.2.3.4.5",
            "192.0.2.0/24",
            " 192.0.2.1",
            "192.0.2.1 ",
            "01.2.3.4",
            "a.b.c.d",
            "",
        ] {
            let res = ipv4(ip);
            assert!(
                matches!(&res, Err(e) if e.code == ErrorCode::InvalidString),
                "{ip:?} should be rejected, got {res:?}"
            );
        }
    }

    #[test]
    fn ipv6_accepts_full_and_compressed() {
        for ip in ["2001:db8::1", "::1", "::", "2001:0db8:0000:0000:0000:ff00:0042:8329"] {
            assert!(ipv6(ip).is_ok(), "{ip} should be valid");
        }
    }

    #[test]
    fn ipv6_rejects_embedded_ipv4_and_junk() {
        for ip in ["::ffff:192.0.2.1", "2001:db8::g", "[2001:db8::1]", "fe80::1%eth0", "1.2.3.4"] {
            assert!(ipv6(ip).is_err(), "{ip} should be rejected");
        }
    }

    #[test]
    fn ip_address_is_the_union() {
        assert!(ip_address("192.0.2.1").is_ok());
        assert!(ip_address("2001:db8::1").is_ok());
        assert!(ip_address("example.com").is_err());
    }

    #[test]
    fn hostname_rules() {
        assert!(hostname("example.com").is_ok());
        assert!(hostname("a-b.c1.example").is_ok());
        assert!(hostname("localhost").is_ok());
        assert!(hostname("-bad.example.com").is_err());
        assert!(hostname("bad-.example.com").is_err());
        assert!(hostname("example.com.").is_err());
        assert!(hostname(".example.com").is_err());
        assert!(hostname("exa_mple.com").is_err());
        assert!(hostname(&format!("{}.com", "a".repeat(64))).is_err());
        assert!(hostname("").is_err());
    }

    #[test]
    fn hostname_length_limit() {
        let label = "a".repeat(63);
        let long = [label.as_str(); 4].join(".");
        assert_eq!(long.len(), 255);
        let res = hostname(&long);
        assert!(matches!(&res, Err(e) if e.code == ErrorCode::TooBig), "got {res:?}");
    }

    #[test]
    fn target_host_allows_underscore_labels() {
        assert!(target_host("fm1._domainkey.postal.example.com").is_ok());
        assert!(hostname("fm1._domainkey.postal.example.com").is_err());
    }

    #[test]
    fn zone_name_requires_two_labels() {
        assert!(zone_name("example.com").is_ok());
        assert!(zone_name("localhost").is_err());
    }

    #[test]
    fn dns_label_special_forms() {
        for label in ["@", "*", "www", "_dmarc", "_sip._tcp", "_acme-challenge.www"] {
            assert!(dns_label(label).is_ok(), "{label} should be valid");
        }
        for label in ["www.example", "-x", "_", "_bad..x", "", "a b"] {
            assert!(dns_label(label).is_err(), "{label:?} should be rejected");
        }
    }

    #[test]
    fn record_name_relative_forms() {
        for name in ["@", "www", "*", "*.mail", "fm1._domainkey", "_dmarc.mail", "a.b.c"] {
            assert!(record_name(name).is_ok(), "{name} should be valid");
        }
        for name in ["", "www.", "a.*", "**", "a..b"] {
            assert!(record_name(name).is_err(), "{name:?} should be rejected");
        }
    }

    #[test]
    fn ttl_bounds_inclusive() {
        assert_eq!(ttl_seconds(60).ok(), Some(60));
        assert_eq!(ttl_seconds(86_400).ok(), Some(86_400));
        assert!(matches!(ttl_seconds(59), Err(e) if e.code == ErrorCode::TooSmall));
        assert!(matches!(ttl_seconds(86_401), Err(e) if e.code == ErrorCode::TooBig));
        assert!(ttl_seconds(-1).is_err());
    }

    #[test]
    fn ttl_unit_suffixes() {
        assert_eq!(ttl(&Ttl::from("5m")).ok(), Some(300));
        assert_eq!(ttl(&Ttl::from("1h")).ok(), Some(3_600));
        assert_eq!(ttl(&Ttl::from("1d")).ok(), Some(86_400));
        assert_eq!(ttl(&Ttl::from("120")).ok(), Some(120));
        assert_eq!(ttl(&Ttl::from("90s")).ok(), Some(90));
        assert!(ttl(&Ttl::from("1w")).is_err());
        assert!(ttl(&Ttl::from("30s")).is_err());
        assert!(ttl(&Ttl::from("5 minutes")).is_err());
        assert!(ttl(&Ttl::from("99999999999999999999d")).is_err());
    }

    #[test]
    fn ttl_rejects_fractions() {
        let res = ttl(&Ttl::Fractional(300.5));
        assert!(matches!(&res, Err(e) if e.code == ErrorCode::InvalidType), "got {res:?}");
    }

    #[test]
    fn numeric_ranges() {
        assert_eq!(priority(0).ok(), Some(0));
        assert_eq!(priority(65_535).ok(), Some(65_535));
        assert!(priority(65_536).is_err());
        assert!(priority(-1).is_err());
        assert!(weight(70_000).is_err());
        assert!(port(0).is_err());
        assert_eq!(port(1).ok(), Some(1));
        assert_eq!(port(65_535).ok(), Some(65_535));
        assert!(port(65_536).is_err());
    }

    #[test]
    fn closed_sets() {
        assert!(caa_tag("issue").is_ok());
        assert!(caa_tag("issuewild").is_ok());
        assert!(caa_tag("iodef").is_ok());
        assert!(matches!(caa_tag("contactemail"), Err(e) if e.code == ErrorCode::InvalidEnumValue));
        assert!(caa_flags(128).is_ok());
        assert!(caa_flags(1).is_err());
        assert_eq!(dnssec_algorithm(13).ok(), Some(13));
        assert!(dnssec_algorithm(2).is_err());
        assert!(dnssec_algorithm(300).is_err());
        assert!(ds_digest_type(2).is_ok());
        assert!(ds_digest_type(3).is_err());
        assert!(tlsa_usage(3).is_ok());
        assert!(tlsa_usage(4).is_err());
        assert!(tlsa_selector(2).is_err());
        assert!(tlsa_matching_type(2).is_ok());
    }

    #[test]
    fn text_validators() {
        assert!(hex_digest("a1B2").is_ok());
        assert!(hex_digest("abc").is_err());
        assert!(hex_digest("zz").is_err());
        assert!(email("dmarc@example.com").is_ok());
        assert!(email("dmarc@localhost").is_err());
        assert!(email("no-at-sign").is_err());
        assert!(txt("v=spf1 -all").is_ok());
        assert!(txt("").is_err());
        assert!(txt("line\nbreak").is_err());
        assert!(non_empty("  ").is_err());
    }

    #[test]
    fn outputs_validate_again() {
        let once = hostname("atlas.fsn1.example.com").unwrap_or_default();
        assert_eq!(hostname(&once).ok(), Some(once.clone()));
        let secs = ttl(&Ttl::from("1h")).unwrap_or_default();
        assert_eq!(ttl(&Ttl::from(secs)).ok(), Some(secs));
    }
}
