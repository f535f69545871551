//! Options for the mail-provider record templates.

use serde::{Deserialize, Serialize};

/// Label meaning "the zone apex".
pub const APEX: &str = "@";

fn default_root_record() -> String {
    APEX.to_string()
}

fn default_true() -> bool {
    true
}

/// DMARC `p=` policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DmarcPolicy {
    #[default]
    None,
    Quarantine,
    Reject,
}

impl DmarcPolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Quarantine => "quarantine",
            Self::Reject => "reject",
        }
    }
}

/// Cloudflare Email Routing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CloudflareEmailOptions {
    /// Label the records hang off; `@` for the apex.
    #[serde(default = "default_root_record")]
    pub root_record: String,
    #[serde(default)]
    pub dmarc_policy: DmarcPolicy,
    /// Address for aggregate DMARC reports (`rua=mailto:`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report_address: Option<String>,
}

impl Default for CloudflareEmailOptions {
    fn default() -> Self {
        Self {
            root_record: default_root_record(),
            dmarc_policy: DmarcPolicy::default(),
            report_address: None,
        }
    }
}

/// Fastmail hosted mail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FastmailOptions {
    /// Zone name; the DKIM targets are derived from it.
    pub domain: String,
    /// Also emit the two MX records for `*`.
    #[serde(default = "default_true")]
    pub include_wildcard: bool,
    #[serde(default)]
    pub dmarc_policy: DmarcPolicy,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report_address: Option<String>,
}

impl FastmailOptions {
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            include_wildcard: true,
            dmarc_policy: DmarcPolicy::default(),
            report_address: None,
        }
    }

    #[must_use]
    pub fn without_wildcard(mut self) -> Self {
        self.include_wildcard = false;
        self
    }
}

/// A customer domain sending and receiving through a self-hosted Postal server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostalOptions {
    /// FQDN of the Postal server, e.g. `postal.example.net`.
    pub postal_host: String,
    #[serde(default = "default_root_record")]
    pub root_record: String,
    /// DKIM selectors issued by Postal for this domain.
    #[serde(default)]
    pub dkim_keys: Vec<String>,
    #[serde(default)]
    pub dmarc_policy: DmarcPolicy,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report_address: Option<String>,
}

impl PostalOptions {
    pub fn new(postal_host: impl Into<String>) -> Self {
        Self {
            postal_host: postal_host.into(),
            root_record: default_root_record(),
            dkim_keys: Vec::new(),
            dmarc_policy: DmarcPolicy::default(),
            report_address: None,
        }
    }

    #[must_use]
    pub fn with_dkim_key(mut self, selector: impl Into<String>) -> Self {
        self.dkim_keys.push(selector.into());
        self
    }

    #[must_use]
    pub fn with_root_record(mut self, root_record: impl Into<String>) -> Self {
        self.root_record = root_record.into();
        self
    }
}

/// The Postal server host itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostalInfrastructureOptions {
    /// Zone the mail host lives in.
    pub domain: String,
    pub ipv4: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ipv6: Option<String>,
    #[serde(default = "default_root_record")]
    pub root_record: String,
    #[serde(default)]
    pub dmarc_policy: DmarcPolicy,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report_address: Option<String>,
}

impl PostalInfrastructureOptions {
    pub fn new(domain: impl Into<String>, ipv4: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            ipv4: ipv4.into(),
            ipv6: None,
            root_record: default_root_record(),
            dmarc_policy: DmarcPolicy::default(),
            report_address: None,
        }
    }

    #[must_use]
    pub fn with_root_record(mut self, root_record: impl Into<String>) -> Self {
        self.root_record = root_record.into();
        self
    }
}

/// Mail setup of one domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "provider", content = "options", rename_all = "camelCase")]
pub enum MailProvider {
    CloudflareEmailRouting(CloudflareEmailOptions),
    Fastmail(FastmailOptions),
    Postal(PostalOptions),
    PostalInfrastructure(PostalInfrastructureOptions),
}

impl MailProvider {
    /// Short key used in validation contexts.
    pub fn key(&self) -> &'static str {
        match self {
            Self::CloudflareEmailRouting(_) => "cloudflareEmailRouting",
            Self::Fastmail(_) => "fastmail",
            Self::Postal(_) => "postal",
            Self::PostalInfrastructure(_) => "postalInfrastructure",
        }
    }
}
