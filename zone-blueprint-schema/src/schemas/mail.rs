use super::Collector;
use crate::error::SchemaResult;
use crate::types::{
    CloudflareEmailOptions, FastmailOptions, MailProvider, PostalInfrastructureOptions,
    PostalOptions,
};
use crate::validators;

pub fn cloudflare_email_options(o: &CloudflareEmailOptions) -> SchemaResult<CloudflareEmailOptions> {
    let mut c = Collector::new();
    let root_record = c.check("rootRecord", validators::record_name(&o.root_record));
    let report_address = c.optional("reportAddress", o.report_address.as_deref(), validators::email);

    let value = root_record
        .zip(report_address)
        .map(|(root_record, report_address)| CloudflareEmailOptions {
            root_record,
            dmarc_policy: o.dmarc_policy,
            report_address,
        });
    c.finish(value)
}

pub fn fastmail_options(o: &FastmailOptions) -> SchemaResult<FastmailOptions> {
    let mut c = Collector::new();
    let domain = c.check("domain", validators::zone_name(&o.domain));
    let report_address = c.optional("reportAddress", o.report_address.as_deref(), validators::email);

    let value = domain
        .zip(report_address)
        .map(|(domain, report_address)| FastmailOptions {
            domain,
            include_wildcard: o.include_wildcard,
            dmarc_policy: o.dmarc_policy,
            report_address,
        });
    c.finish(value)
}

pub fn postal_options(o: &PostalOptions) -> SchemaResult<PostalOptions> {
    let mut c = Collector::new();
    let postal_host = c.check("postalHost", validators::hostname(&o.postal_host));
    let root_record = c.check("rootRecord", validators::record_name(&o.root_record));
    let keys: Vec<_> = o
        .dkim_keys
        .iter()
        .enumerate()
        .map(|(i, key)| c.check(&format!("dkimKeys.{i}"), validators::host_label(key)))
        .collect();
    let dkim_keys: Option<Vec<_>> = keys.into_iter().collect();
    let report_address = c.optional("reportAddress", o.report_address.as_deref(), validators::email);

    let value = postal_host.zip(root_record).zip(dkim_keys).zip(report_address).map(
        |(((postal_host, root_record), dkim_keys), report_address)| PostalOptions {
            postal_host,
            root_record,
            dkim_keys,
            dmarc_policy: o.dmarc_policy,
            report_address,
        },
    );
    c.finish(value)
}

pub fn postal_infrastructure_options(
    o: &PostalInfrastructureOptions,
) -> SchemaResult<PostalInfrastructureOptions> {
    let mut c = Collector::new();
    let domain = c.check("domain", validators::zone_name(&o.domain));
    let ipv4 = c.check("ipv4", validators::ipv4(&o.ipv4));
    let ipv6 = c.optional("ipv6", o.ipv6.as_deref(), validators::ipv6);
    let root_record = c.check("rootRecord", validators::record_name(&o.root_record));
    let report_address = c.optional("reportAddress", o.report_address.as_deref(), validators::email);

    let value = domain
        .zip(ipv4)
        .zip(ipv6)
        .zip(root_record)
        .zip(report_address)
        .map(
            |((((domain, ipv4), ipv6), root_record), report_address)| {
                PostalInfrastructureOptions {
                    domain,
                    ipv4,
                    ipv6,
                    root_record,
                    dmarc_policy: o.dmarc_policy,
                    report_address,
                }
            },
        );
    c.finish(value)
}

/// Validates the options of whichever provider is selected.
pub fn mail_provider(provider: &MailProvider) -> SchemaResult<MailProvider> {
    let mut c = Collector::new();
    let value = match provider {
        MailProvider::CloudflareEmailRouting(o) => c
            .nested("options", cloudflare_email_options(o))
            .map(MailProvider::CloudflareEmailRouting),
        MailProvider::Fastmail(o) => c
            .nested("options", fastmail_options(o))
            .map(MailProvider::Fastmail),
        MailProvider::Postal(o) => c
            .nested("options", postal_options(o))
            .map(MailProvider::Postal),
        MailProvider::PostalInfrastructure(o) => c
            .nested("options", postal_infrastructure_options(o))
            .map(MailProvider::PostalInfrastructure),
    };
    c.finish(value)
}
