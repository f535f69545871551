use super::Collector;
use crate::error::{ErrorCode, FieldError, SchemaResult};
use crate::types::{DomainConfig, Server, ServiceCategory, ServiceDefinition, Ttl};
use crate::validators;

/// Validates a server, including that its hostname was derived from its
/// prefix and location.
pub fn server(s: &Server) -> SchemaResult<Server> {
    let mut c = Collector::new();
    let name = c.check("name", validators::non_empty(&s.name));
    let prefix = c.check("prefix", validators::host_label(&s.prefix));
    let hostname = c.check("hostname", validators::hostname(&s.hostname));
    let ipv4 = c.check("ipv4", validators::ipv4(&s.ipv4));
    let ipv6 = c.optional("ipv6", s.ipv6.as_deref(), validators::ipv6);

    if let (Some(prefix), Some(hostname)) = (&prefix, &hostname) {
        let expected = format!("{prefix}.{}.", s.location.tag());
        if !hostname.starts_with(&expected) {
            c.push(
                FieldError::new(
                    ErrorCode::Custom,
                    format!("Hostname '{hostname}' must start with '{expected}'"),
                )
                .at("hostname"),
            );
        }
    }

    let value = name.zip(prefix).zip(hostname).zip(ipv4).zip(ipv6).map(
        |((((name, prefix), hostname), ipv4), ipv6)| Server {
            name,
            location: s.location,
            prefix,
            hostname,
            ipv4,
            ipv6,
            is_ddns: s.is_ddns,
        },
    );
    c.finish(value)
}

/// Validates a service definition. The TTL is normalized to seconds.
pub fn service(svc: &ServiceDefinition) -> SchemaResult<ServiceDefinition> {
    let mut c = Collector::new();
    let subdomain = c.check("subdomain", validators::record_name(&svc.subdomain));
    let server = c.optional("server", svc.server.as_deref(), validators::non_empty);
    let ip = c.optional("ip", svc.ip.as_deref(), validators::ipv4);
    let cname = c.optional("cname", svc.cname.as_deref(), validators::target_host);
    let ttl = c.optional("ttl", svc.ttl.as_ref(), validators::ttl);

    let value = subdomain.zip(server).zip(ip).zip(cname).zip(ttl).map(
        |((((subdomain, server), ip), cname), ttl)| ServiceDefinition {
            subdomain,
            description: svc.description.clone(),
            server,
            routing: svc.routing,
            ip,
            cname,
            proxy: svc.proxy,
            ttl: ttl.map(Ttl::from),
        },
    );
    c.finish(value)
}

/// Validates a category and every service in it.
pub fn category(cat: &ServiceCategory) -> SchemaResult<ServiceCategory> {
    let mut c = Collector::new();
    let name = c.check("name", validators::non_empty(&cat.name));
    if cat.services.is_empty() {
        c.push(
            FieldError::new(
                ErrorCode::TooSmall,
                "Category must contain at least one service",
            )
            .at("services"),
        );
    }
    let services: Vec<_> = cat
        .services
        .iter()
        .enumerate()
        .map(|(i, svc)| c.nested(&format!("services.{i}"), service(svc)))
        .collect();
    let services: Option<Vec<_>> = services.into_iter().collect();

    let value = name.zip(services).map(|(name, services)| ServiceCategory {
        name,
        description: cat.description.clone(),
        services,
    });
    c.finish(value)
}

/// Validates a domain's zone settings.
pub fn domain_config(d: &DomainConfig) -> SchemaResult<DomainConfig> {
    let mut c = Collector::new();
    let name = c.check("name", validators::zone_name(&d.name));
    let registrar = c.check("registrar", validators::non_empty(&d.registrar));
    let dns_provider = c.check("dnsProvider", validators::non_empty(&d.dns_provider));
    let default_ttl = c.optional("defaultTtl", d.default_ttl.as_ref(), validators::ttl);
    let patterns: Vec<_> = d
        .ignore_patterns
        .iter()
        .enumerate()
        .map(|(i, p)| c.check(&format!("ignorePatterns.{i}"), validators::non_empty(p)))
        .collect();
    let ignore_patterns: Option<Vec<_>> = patterns.into_iter().collect();

    let value = name
        .zip(registrar)
        .zip(dns_provider)
        .zip(default_ttl)
        .zip(ignore_patterns)
        .map(
            |((((name, registrar), dns_provider), default_ttl), ignore_patterns)| DomainConfig {
                name,
                registrar,
                dns_provider,
                default_ttl: default_ttl.map(Ttl::from),
                ignore_patterns,
            },
        );
    c.finish(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Location, RoutingStrategy};

    #[test]
    fn server_valid() {
        let s = Server::new("atlas", Location::Fsn1, "atlas", "203.0.113.10", "example.com")
            .with_ipv6("2001:db8::10");
        assert_eq!(server(&s), Ok(s.clone()));
    }

    #[test]
    fn server_hostname_mismatch() {
        let mut s = Server::new("atlas", Location::Fsn1, "atlas", "203.0.113.10", "example.com");
        s.hostname = "atlas.nbg1.example.com".into();
        let res = server(&s);
        assert!(
            matches!(&res, Err(e) if e.len() == 1 && e[0].code == ErrorCode::Custom),
            "got {res:?}"
        );
    }

    #[test]
    fn server_reports_every_bad_field() {
        let mut s = Server::new("", Location::Home, "nas", "10.0.0.256", "example.com");
        s.ipv6 = Some("::ffff:10.0.0.1".into());
        let res = server(&s);
        assert!(res.is_err(), "expected Err(..), got {res:?}");
        let Err(errors) = res else {
            return;
        };
        let paths: Vec<_> = errors.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(paths, vec!["name", "ipv4", "ipv6"]);
    }

    #[test]
    fn service_ttl_normalized() {
        let svc = ServiceDefinition::new("grafana", RoutingStrategy::Direct).with_ttl("1h");
        let res = service(&svc);
        assert!(matches!(&res, Ok(s) if s.ttl == Some(Ttl::Seconds(3_600))), "got {res:?}");
    }

    #[test]
    fn service_rejects_bad_overrides() {
        let svc = ServiceDefinition::new("legacy", RoutingStrategy::Direct)
            .with_ip("2001:db8::1")
            .with_cname("bad..host");
        let res = service(&svc);
        assert!(matches!(&res, Err(e) if e.len() == 2), "got {res:?}");
    }

    #[test]
    fn empty_category_rejected() {
        let res = category(&ServiceCategory::new("media", vec![]));
        assert!(
            matches!(&res, Err(e) if e[0].code == ErrorCode::TooSmall && e[0].path == "services"),
            "got {res:?}"
        );
    }

    #[test]
    fn category_paths_index_services() {
        let cat = ServiceCategory::new(
            "monitoring",
            vec![
                ServiceDefinition::new("grafana", RoutingStrategy::Direct),
                ServiceDefinition::new("bad name", RoutingStrategy::Direct),
            ],
        );
        let res = category(&cat);
        assert!(
            matches!(&res, Err(e) if e[0].path == "services.1.subdomain"),
            "got {res:?}"
        );
    }

    #[test]
    fn domain_config_rules() {
        let ok = DomainConfig::new("example.com", "none", "cloudflare").with_default_ttl(300);
        assert!(domain_config(&ok).is_ok());

        let bad = DomainConfig::new("example.com.", "", "cloudflare").with_ignore_pattern(" ");
        let res = domain_config(&bad);
        assert!(matches!(&res, Err(e) if e.len() == 3), "got {res:?}");
    }
}
