//! Engine and registry abstraction trait definition

mod dns_engine;
mod json_engine;
mod server_registry;

pub use dns_engine::{DnsEngine, DomainModifier};
pub use json_engine::{
    EngineDocument, EngineDomain, EngineRecord, IgnoredName, JsonEngine, CLOUDFLARE_PROXY_META,
};
pub use server_registry::{InMemoryServerRegistry, ServerRegistry};
