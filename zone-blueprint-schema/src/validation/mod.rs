//! Mode-aware validation
//!
//! Every `validate_*` function goes through [`enforce`], which looks up the
//! effective [`ValidationConfig`] and applies its mode:
//!
//! | Mode       | Schema passes        | Schema fails                                        |
//! |------------|----------------------|-----------------------------------------------------|
//! | `strict`   | normalized value     | `Err(ValidationError)`, or a failed result when `throw_on_error` is off |
//! | `warn`     | normalized value     | logged summary, original value plus the errors      |
//! | `disabled` | original value       | original value (the schema is not run)              |

mod config;
mod logger;

pub use config::{
    ValidationConfig, ValidationConfigUpdate, ValidationMode, ValidationScope,
    get_validation_config, reset_validation_config, set_validation_config,
    with_validation_config, with_validation_config_async, with_validation_mode,
    with_validation_mode_async,
};
pub use logger::{LogLogger, MemoryLogger, SharedLogger, ValidationLogger};

use serde::Serialize;

use crate::error::{FieldError, SchemaResult, Subject, ValidationError, format_errors};
use crate::schemas;
use crate::types::{
    DomainConfig, MailProvider, RecordOperation, Server, ServiceCategory, ServiceDefinition,
};
use crate::utils::log_format::format_error_summary;

/// Outcome of a mode-aware validation that did not raise.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationResult<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldError>>,
}

impl<T> ValidationResult<T> {
    fn valid(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            errors: None,
        }
    }

    fn tolerated(data: T, errors: Vec<FieldError>) -> Self {
        Self {
            success: true,
            data: Some(data),
            errors: Some(errors),
        }
    }

    fn invalid(errors: Vec<FieldError>) -> Self {
        Self {
            success: false,
            data: None,
            errors: Some(errors),
        }
    }

    pub fn into_data(self) -> Option<T> {
        self.data
    }

    /// Formatted `path: message` lines; empty when nothing failed.
    pub fn error_messages(&self) -> Vec<String> {
        self.errors.as_deref().map(format_errors).unwrap_or_default()
    }
}

/// Applies the effective validation mode to one schema run.
///
/// # Errors
///
/// `ValidationError` in strict mode with `throw_on_error` set, when the
/// schema fails. Its error list is never empty.
pub fn enforce<T: Clone>(
    input: &T,
    subject: Subject,
    schema: impl FnOnce(&T) -> SchemaResult<T>,
) -> Result<ValidationResult<T>, ValidationError> {
    let config = get_validation_config();
    if config.mode == ValidationMode::Disabled {
        return Ok(ValidationResult::valid(input.clone()));
    }

    let errors = match schema(input) {
        Ok(data) => return Ok(ValidationResult::valid(data)),
        Err(errors) => errors,
    };

    match config.mode {
        ValidationMode::Warn => {
            if config.log_warnings {
                let context = subject.context();
                config
                    .logger
                    .warn(&format_error_summary(&context, &errors), Some(&context));
            }
            Ok(ValidationResult::tolerated(input.clone(), errors))
        }
        _ if config.throw_on_error => Err(ValidationError::new(subject, format_errors(&errors))),
        _ => Ok(ValidationResult::invalid(errors)),
    }
}

pub fn validate_record(
    op: &RecordOperation,
) -> Result<ValidationResult<RecordOperation>, ValidationError> {
    enforce(
        op,
        Subject::record(op.record_type(), op.name.clone()),
        schemas::record,
    )
}

pub fn validate_server(server: &Server) -> Result<ValidationResult<Server>, ValidationError> {
    enforce(server, Subject::server(server.name.clone()), schemas::server)
}

pub fn validate_service(
    service: &ServiceDefinition,
) -> Result<ValidationResult<ServiceDefinition>, ValidationError> {
    enforce(
        service,
        Subject::service(service.subdomain.clone()),
        schemas::service,
    )
}

/// Reported under the subject `config:category.<name>`.
pub fn validate_category(
    category: &ServiceCategory,
) -> Result<ValidationResult<ServiceCategory>, ValidationError> {
    enforce(
        category,
        Subject::config(format!("category.{}", category.name)),
        schemas::category,
    )
}

pub fn validate_domain_config(
    domain: &DomainConfig,
) -> Result<ValidationResult<DomainConfig>, ValidationError> {
    enforce(
        domain,
        Subject::config(domain.name.clone()),
        schemas::domain_config,
    )
}

/// Reported under the provider key, e.g. `config:fastmail`.
pub fn validate_mail_provider(
    provider: &MailProvider,
) -> Result<ValidationResult<MailProvider>, ValidationError> {
    enforce(provider, Subject::config(provider.key()), schemas::mail_provider)
}

/// Validates one configuration value with any schema, e.g.
/// `validate_config_value("internalIp", &ip, |v| schemas::field(validators::ipv4(v)))`.
pub fn validate_config_value<T: Clone>(
    key: &str,
    value: &T,
    schema: impl FnOnce(&T) -> SchemaResult<T>,
) -> Result<ValidationResult<T>, ValidationError> {
    enforce(value, Subject::config(key), schema)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::types::{Location, RecordData};
    use crate::validators;

    fn bad_server() -> Server {
        Server::new("atlas", Location::Fsn1, "atlas", "300.0.0.1", "example.com")
    }

    #[test]
    fn strict_throws_with_context() {
        let res = with_validation_mode(ValidationMode::Strict, || validate_server(&bad_server()));
        assert!(res.is_err(), "expected Err(..), got {res:?}");
        let Err(err) = res else {
            return;
        };
        assert_eq!(err.context(), "server:atlas");
        assert!(!err.errors().is_empty());
        assert!(err.errors()[0].starts_with("ipv4:"));
    }

    #[test]
    fn strict_without_throw_returns_failure() {
        let config = ValidationConfig::default().with_throw_on_error(false);
        let res = with_validation_config(config, || validate_server(&bad_server()));
        assert!(res.is_ok(), "expected Ok(..), got {res:?}");
        let Ok(result) = res else {
            return;
        };
        assert!(!result.success);
        assert!(result.data.is_none());
        assert_eq!(result.error_messages().len(), 1);
    }

    #[test]
    fn warn_logs_and_passes_original() {
        let logger = MemoryLogger::new();
        let config = ValidationConfig::default()
            .with_mode(ValidationMode::Warn)
            .with_logger(logger.clone());
        let server = bad_server();
        let res = with_validation_config(config, || validate_server(&server));
        assert!(res.is_ok(), "expected Ok(..), got {res:?}");
        let Ok(result) = res else {
            return;
        };
        assert!(result.success);
        assert_eq!(result.data.as_ref(), Some(&server));
        assert!(result.errors.is_some());
        let entries = logger.entries();
        assert_eq!(entries.len(), 1);
        assert!(entries[0].0.starts_with("Validation failed for server:atlas"));
        assert_eq!(entries[0].1.as_deref(), Some("server:atlas"));
    }

    #[test]
    fn warn_without_logging_is_silent() {
        let logger = MemoryLogger::new();
        let config = ValidationConfig::default()
            .with_mode(ValidationMode::Warn)
            .with_log_warnings(false)
            .with_logger(logger.clone());
        let res = with_validation_config(config, || validate_server(&bad_server()));
        assert!(matches!(&res, Ok(r) if r.success));
        assert!(logger.is_empty());
    }

    #[test]
    fn disabled_passes_input_through() {
        let server = bad_server();
        let res = with_validation_mode(ValidationMode::Disabled, || validate_server(&server));
        assert!(matches!(&res, Ok(r) if r.success && r.data.as_ref() == Some(&server) && r.errors.is_none()));
    }

    #[test]
    fn valid_input_is_normalized() {
        let op = RecordOperation::new(
            "www",
            RecordData::A {
                address: "192.0.2.1".into(),
            },
        );
        let res = validate_record(&op);
        assert!(matches!(&res, Ok(r) if r.data.as_ref() == Some(&op)));
    }

    #[test]
    fn record_error_context_names_type() {
        let op = RecordOperation::new(
            "@",
            RecordData::MX {
                priority: 10,
                exchange: "-bad-".into(),
            },
        );
        let res = with_validation_mode(ValidationMode::Strict, || validate_record(&op));
        assert!(matches!(&res, Err(e) if e.context() == "record:MX"), "got {res:?}");
    }

    #[test]
    fn config_value_uses_key() {
        let logger = Arc::new(LogLogger);
        let config = ValidationConfig::default().with_logger(logger);
        let res = with_validation_config(config, || {
            validate_config_value("internalIp", &"10.10.0.300".to_string(), |v| {
                schemas::field(validators::ipv4(v))
            })
        });
        assert!(matches!(&res, Err(e) if e.context() == "config:internalIp"), "got {res:?}");
    }
}
