//! Fastmail

use zone_blueprint_schema::{FastmailOptions, RecordOperation, APEX};

use super::dmarc_record;
use crate::builders::{create_cname_record, create_mx_record, create_txt_record, RecordOptions};

const MX_HOSTS: [(&str, u16); 2] = [
    ("in1-smtp.messagingengine.com", 10),
    ("in2-smtp.messagingengine.com", 20),
];

const SPF: &str = "v=spf1 include:spf.messagingengine.com ?all";

const DKIM_SELECTORS: [&str; 3] = ["fm1", "fm2", "fm3"];

/// 10 条记录，`include_wildcard = false` 时为 8 条
pub fn create_fastmail_records(opts: &FastmailOptions) -> Vec<RecordOperation> {
    let o = RecordOptions::new();
    let mut records = vec![create_cname_record("mail", "mail.fastmail.com", o)];

    let mut mx_names = vec![APEX];
    if opts.include_wildcard {
        mx_names.push("*");
    }
    for name in mx_names {
        for (host, priority) in MX_HOSTS {
            records.push(create_mx_record(name, priority, host, o));
        }
    }

    records.push(create_txt_record(APEX, SPF, o));
    records.push(dmarc_record(
        APEX,
        opts.dmarc_policy,
        opts.report_address.as_deref(),
    ));

    for selector in DKIM_SELECTORS {
        records.push(create_cname_record(
            &format!("{selector}._domainkey"),
            &format!("{selector}.{}.dkim.fmhosted.com", opts.domain),
            o,
        ));
    }
    records
}
