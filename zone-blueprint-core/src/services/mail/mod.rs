//! 邮件服务商记录模板
//!
//! 每个模板都是纯函数，按固定顺序返回记录。主机名、优先级和 DKIM 选择器是与
//! 服务商约定的常量，不可随意修改。

mod cloudflare;
mod fastmail;
mod postal;

pub use cloudflare::create_cloudflare_email_records;
pub use fastmail::create_fastmail_records;
pub use postal::{create_postal_infrastructure_records, create_postal_records};

use zone_blueprint_schema::{DmarcPolicy, MailProvider, RecordOperation, APEX};

use crate::builders::{create_txt_record, RecordOptions};

/// 将标签挂到 `root_record` 之下
///
/// 根记录为 `@` 时原样返回；否则 `@` 变为根记录本身，其余标签追加 `.<root_record>`。
pub(crate) fn scoped_name(label: &str, root_record: &str) -> String {
    match (label, root_record) {
        (_, APEX) => label.to_string(),
        (APEX, _) => root_record.to_string(),
        _ => format!("{label}.{root_record}"),
    }
}

/// `v=DMARC1; p=<policy>[; rua=mailto:<addr>]`
pub(crate) fn dmarc_value(policy: DmarcPolicy, report_address: Option<&str>) -> String {
    match report_address {
        Some(addr) => format!("v=DMARC1; p={}; rua=mailto:{addr}", policy.as_str()),
        None => format!("v=DMARC1; p={}", policy.as_str()),
    }
}

pub(crate) fn dmarc_record(
    root_record: &str,
    policy: DmarcPolicy,
    report_address: Option<&str>,
) -> RecordOperation {
    create_txt_record(
        &scoped_name("_dmarc", root_record),
        &dmarc_value(policy, report_address),
        RecordOptions::new(),
    )
}

/// 按服务商分派到对应模板
pub fn mail_records(provider: &MailProvider) -> Vec<RecordOperation> {
    let records = match provider {
        MailProvider::CloudflareEmailRouting(opts) => create_cloudflare_email_records(opts),
        MailProvider::Fastmail(opts) => create_fastmail_records(opts),
        MailProvider::Postal(opts) => create_postal_records(opts),
        MailProvider::PostalInfrastructure(opts) => create_postal_infrastructure_records(opts),
    };
    log::debug!(
        "Generated {} mail records for {}",
        records.len(),
        provider.key()
    );
    records
}
