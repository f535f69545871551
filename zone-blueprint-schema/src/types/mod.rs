//! Data model: records, servers, services, domains and mail options.

mod domain;
mod input;
mod mail;
mod record;
mod server;
mod service;
mod ttl;

pub use domain::DomainConfig;
pub use input::RecordInput;
pub use mail::{
    APEX, CloudflareEmailOptions, DmarcPolicy, FastmailOptions, MailProvider, PostalOptions,
    PostalInfrastructureOptions,
};
pub use record::{DnsRecordType, RecordData, RecordModifier, RecordOperation};
pub use server::{Location, Server, derive_hostname};
pub use service::{ProxyOption, RoutingStrategy, ServiceCategory, ServiceDefinition};
pub use ttl::Ttl;
