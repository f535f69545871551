//! Postal: 客户域名与邮件服务器自身

use zone_blueprint_schema::{PostalInfrastructureOptions, PostalOptions, RecordOperation, APEX};

use super::{dmarc_record, scoped_name};
use crate::builders::{
    create_a_record, create_aaaa_record, create_cname_record, create_mx_record,
    create_txt_record, RecordOptions,
};

const MX_PRIORITY: u16 = 10;

/// 通过 Postal 收发邮件的客户域名
///
/// MX（`@` 与 `*`）、退信 CNAME `psrp`、SPF、DMARC，以及每个 DKIM 选择器一条 CNAME。
pub fn create_postal_records(opts: &PostalOptions) -> Vec<RecordOperation> {
    let o = RecordOptions::new();
    let root = opts.root_record.as_str();
    let host = opts.postal_host.as_str();
    let mx = format!("mx.{host}");

    let mut records = vec![
        create_mx_record(&scoped_name(APEX, root), MX_PRIORITY, &mx, o),
        create_mx_record(&scoped_name("*", root), MX_PRIORITY, &mx, o),
        create_cname_record(&scoped_name("psrp", root), &format!("rp.{host}"), o),
        create_txt_record(
            &scoped_name(APEX, root),
            &format!("v=spf1 a mx include:spf.{host} ~all"),
            o,
        ),
        dmarc_record(root, opts.dmarc_policy, opts.report_address.as_deref()),
    ];

    for key in &opts.dkim_keys {
        let label = format!("{key}._domainkey");
        records.push(create_cname_record(
            &scoped_name(&label, root),
            &format!("{label}.{host}"),
            o,
        ));
    }
    records
}

/// Postal 服务器所在主机的记录
///
/// 无 IPv6 时 9 条，有 IPv6 时 11 条（根与 `mx` 各多一条 AAAA）。
pub fn create_postal_infrastructure_records(
    opts: &PostalInfrastructureOptions,
) -> Vec<RecordOperation> {
    let o = RecordOptions::new();
    let root = opts.root_record.as_str();
    let fqdn = if root == APEX {
        opts.domain.clone()
    } else {
        format!("{root}.{}", opts.domain)
    };
    let mx = format!("mx.{fqdn}");
    let apex = scoped_name(APEX, root);
    let mx_name = scoped_name("mx", root);

    let mut records = vec![create_a_record(&apex, &opts.ipv4, o)];
    if let Some(ipv6) = &opts.ipv6 {
        records.push(create_aaaa_record(&apex, ipv6, o));
    }
    records.push(create_a_record(&mx_name, &opts.ipv4, o));
    if let Some(ipv6) = &opts.ipv6 {
        records.push(create_aaaa_record(&mx_name, ipv6, o));
    }

    let host_spf = match &opts.ipv6 {
        Some(ipv6) => format!("v=spf1 ip4:{} ip6:{ipv6} ~all", opts.ipv4),
        None => format!("v=spf1 ip4:{} ~all", opts.ipv4),
    };

    records.extend([
        create_mx_record(&apex, MX_PRIORITY, &mx, o),
        create_cname_record(&scoped_name("rp", root), &fqdn, o),
        create_cname_record(&scoped_name("track", root), &fqdn, o),
        create_mx_record(&scoped_name("routes", root), MX_PRIORITY, &mx, o),
        create_txt_record(&scoped_name("spf", root), &host_spf, o),
        create_txt_record(
            &apex,
            &format!("v=spf1 a mx include:spf.{fqdn} ~all"),
            o,
        ),
        dmarc_record(root, opts.dmarc_policy, opts.report_address.as_deref()),
    ]);
    records
}
