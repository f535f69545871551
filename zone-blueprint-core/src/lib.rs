//! Zone Blueprint Core Library
//!
//! Turns declarative infrastructure descriptions into DNS record operations:
//! - Record builders
//! - Service compiler (routing strategies and overrides)
//! - Mail-provider record templates
//! - Domain assembler, emitting through a pluggable DNS engine
//!
//! Every value passes through the mode-aware validators of
//! `zone-blueprint-schema` before it is emitted.

pub mod builders;
pub mod config;
pub mod error;
pub mod services;
pub mod traits;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use config::{BlueprintConfig, CompilerSettings, ServerEntry};
pub use error::{CoreError, CoreResult};
pub use services::{
    AssembledDomain, DomainAssembler, DomainBlueprint, ServiceCompiler, ServiceContext,
};
pub use traits::{DnsEngine, DomainModifier, InMemoryServerRegistry, JsonEngine, ServerRegistry};
