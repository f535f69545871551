//! Cloudflare Email Routing

use zone_blueprint_schema::{CloudflareEmailOptions, RecordOperation, APEX};

use super::{dmarc_record, scoped_name};
use crate::builders::{create_mx_record, create_txt_record, RecordOptions};

const ROUTES: [(&str, u16); 3] = [
    ("route1.mx.cloudflare.net", 77),
    ("route2.mx.cloudflare.net", 50),
    ("route3.mx.cloudflare.net", 37),
];

const SPF: &str = "v=spf1 include:_spf.mx.cloudflare.net ~all";

/// 三条 MX、SPF 与 DMARC，共 5 条记录
pub fn create_cloudflare_email_records(opts: &CloudflareEmailOptions) -> Vec<RecordOperation> {
    let root = scoped_name(APEX, &opts.root_record);
    let mut records: Vec<RecordOperation> = ROUTES
        .iter()
        .map(|(host, priority)| create_mx_record(&root, *priority, host, RecordOptions::new()))
        .collect();
    records.push(create_txt_record(&root, SPF, RecordOptions::new()));
    records.push(dmarc_record(
        &opts.root_record,
        opts.dmarc_policy,
        opts.report_address.as_deref(),
    ));
    records
}
