//! # zone-blueprint-schema
//!
//! Data model and validation for declarative DNS infrastructure: servers,
//! services, domains, mail-provider options and the record operations they
//! compile to.
//!
//! ## Layers
//!
//! - [`validators`]: primitive checks for single values (IPv4/IPv6,
//!   hostnames, DNS labels, TTLs, ports, CAA/TLSA/DS fields, ...).
//! - [`schemas`]: structured checks for whole values that collect every
//!   field error with its path and return the normalized value.
//! - [`validation`]: the mode-aware wrappers (`strict`, `warn`, `disabled`)
//!   with process-wide defaults and scoped overrides.
//!
//! ## Usage
//!
//! ```rust
//! use zone_blueprint_schema::{
//!     Location, Server, ValidationMode, validate_server, with_validation_mode,
//! };
//!
//! let server = Server::new("atlas", Location::Fsn1, "atlas", "203.0.113.10", "example.com");
//! assert!(validate_server(&server).is_ok());
//!
//! let broken = Server::new("atlas", Location::Fsn1, "atlas", "203.0.113.300", "example.com");
//! assert!(validate_server(&broken).is_err());
//!
//! // Tolerate the failure in this scope only.
//! let result = with_validation_mode(ValidationMode::Warn, || validate_server(&broken));
//! assert!(matches!(result, Ok(r) if r.success));
//! ```
//!
//! ## Error Handling
//!
//! Primitive validators and schemas return [`FieldError`]s and never panic.
//! The strict-mode wrappers raise a [`ValidationError`] whose variant names
//! the subject (record, server, service or config key).

mod error;
pub mod schemas;
mod types;
pub mod utils;
pub mod validation;
pub mod validators;

pub use error::{
    ErrorCode, FieldError, SchemaResult, Subject, UnknownLocationError, ValidationError,
    format_errors,
};

pub use types::{
    APEX, CloudflareEmailOptions, DmarcPolicy, DnsRecordType, DomainConfig, FastmailOptions,
    Location, MailProvider, PostalInfrastructureOptions, PostalOptions, ProxyOption, RecordData,
    RecordInput, RecordModifier, RecordOperation, RoutingStrategy, Server, ServiceCategory,
    ServiceDefinition, Ttl, derive_hostname,
};

pub use validation::{
    LogLogger, MemoryLogger, SharedLogger, ValidationConfig, ValidationConfigUpdate,
    ValidationLogger, ValidationMode, ValidationResult, ValidationScope, enforce,
    get_validation_config, reset_validation_config, set_validation_config, validate_category,
    validate_config_value, validate_domain_config, validate_mail_provider, validate_record,
    validate_server, validate_service, with_validation_config, with_validation_config_async,
    with_validation_mode, with_validation_mode_async,
};
