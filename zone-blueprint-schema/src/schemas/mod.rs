//! Structured schemas
//!
//! Each schema checks a whole value field by field, collects every failure
//! with its field path and returns the normalized value on success. Schemas
//! are pure: the enforcement mode is applied by the wrappers in
//! [`validation`](crate::validation).

mod entity;
mod mail;
mod record;

pub use entity::{category, domain_config, server, service};
pub use mail::{
    cloudflare_email_options, fastmail_options, mail_provider, postal_infrastructure_options,
    postal_options,
};
pub use record::{record, record_data, record_input};

use crate::error::{ErrorCode, FieldError, SchemaResult};

/// Lifts a primitive validator result into a schema result.
pub fn field<T>(result: Result<T, FieldError>) -> SchemaResult<T> {
    result.map_err(|e| vec![e])
}

/// Accumulates field errors across the checks of one schema.
#[derive(Debug, Default)]
pub(crate) struct Collector {
    errors: Vec<FieldError>,
}

impl Collector {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, error: FieldError) {
        self.errors.push(error);
    }

    /// Records a failed primitive check under `path`.
    pub(crate) fn check<T>(&mut self, path: &str, result: Result<T, FieldError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                self.errors.push(e.at(path));
                None
            }
        }
    }

    /// Records the errors of a nested schema under `path`.
    pub(crate) fn nested<T>(&mut self, path: &str, result: SchemaResult<T>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(errors) => {
                self.errors.extend(errors.into_iter().map(|e| e.at(path)));
                None
            }
        }
    }

    /// A field that must be present and valid.
    pub(crate) fn require<V, T>(
        &mut self,
        path: &str,
        value: Option<V>,
        validate: impl FnOnce(V) -> Result<T, FieldError>,
    ) -> Option<T> {
        let Some(value) = value else {
            self.errors
                .push(FieldError::new(ErrorCode::Required, "Required").at(path));
            return None;
        };
        self.check(path, validate(value))
    }

    /// A field that may be absent. `Some(None)` means absent, `None` invalid.
    pub(crate) fn optional<V, T>(
        &mut self,
        path: &str,
        value: Option<V>,
        validate: impl FnOnce(V) -> Result<T, FieldError>,
    ) -> Option<Option<T>> {
        match value {
            None => Some(None),
            Some(value) => self.check(path, validate(value)).map(Some),
        }
    }

    pub(crate) fn finish<T>(mut self, value: Option<T>) -> SchemaResult<T> {
        match value {
            Some(value) if self.errors.is_empty() => Ok(value),
            _ => {
                if self.errors.is_empty() {
                    self.errors
                        .push(FieldError::new(ErrorCode::Custom, "Incomplete value"));
                }
                Err(self.errors)
            }
        }
    }
}
