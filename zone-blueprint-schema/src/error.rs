use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::DnsRecordType;

/// Machine-readable reason a single field failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// String does not match the expected syntax.
    InvalidString,
    /// Value has the wrong kind (e.g. a fraction where an integer is required).
    InvalidType,
    /// Value is not a member of a closed set.
    InvalidEnumValue,
    /// Below the allowed minimum (or empty).
    TooSmall,
    /// Above the allowed maximum (or too long).
    TooBig,
    /// A field required by the record type is missing.
    Required,
    /// No record shape matches the given fields.
    InvalidUnion,
    /// Cross-field rule violated.
    Custom,
}

impl ErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::InvalidString => "invalid_string",
            Self::InvalidType => "invalid_type",
            Self::InvalidEnumValue => "invalid_enum_value",
            Self::TooSmall => "too_small",
            Self::TooBig => "too_big",
            Self::Required => "required",
            Self::InvalidUnion => "invalid_union",
            Self::Custom => "custom",
        }
    }
}

/// One failed check, located by a dotted field path.
///
/// Primitive validators produce errors with an empty path; schemas prefix the
/// field name with [`at`](Self::at).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub path: String,
    pub message: String,
    pub code: ErrorCode,
}

impl FieldError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            path: String::new(),
            message: message.into(),
            code,
        }
    }

    /// Prefixes the path with `segment`.
    #[must_use]
    pub fn at(mut self, segment: &str) -> Self {
        if segment.is_empty() {
            return self;
        }
        self.path = if self.path.is_empty() {
            segment.to_string()
        } else {
            format!("{segment}.{}", self.path)
        };
        self
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.path.is_empty() {
            f.write_str(&self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

/// Result of a structured schema: the normalized value or every field error.
pub type SchemaResult<T> = std::result::Result<T, Vec<FieldError>>;

/// Renders field errors as `path: message` lines.
pub fn format_errors(errors: &[FieldError]) -> Vec<String> {
    errors.iter().map(ToString::to_string).collect()
}

/// What a validation error is about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Subject {
    Record {
        record_type: DnsRecordType,
        name: String,
    },
    Server {
        name: String,
    },
    Service {
        name: String,
    },
    Config {
        key: String,
    },
}

impl Subject {
    pub fn record(record_type: DnsRecordType, name: impl Into<String>) -> Self {
        Self::Record {
            record_type,
            name: name.into(),
        }
    }

    pub fn server(name: impl Into<String>) -> Self {
        Self::Server { name: name.into() }
    }

    pub fn service(name: impl Into<String>) -> Self {
        Self::Service { name: name.into() }
    }

    pub fn config(key: impl Into<String>) -> Self {
        Self::Config { key: key.into() }
    }

    /// Context tag such as `record:MX`, `server:atlas` or `config:rootDomain`.
    pub fn context(&self) -> String {
        match self {
            Self::Record { record_type, .. } => format!("record:{record_type}"),
            Self::Server { name } => format!("server:{name}"),
            Self::Service { name } => format!("service:{name}"),
            Self::Config { key } => format!("config:{key}"),
        }
    }
}

/// A strict-mode validation failure, scoped by subject.
///
/// Carries the formatted field errors (`path: message`).
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum ValidationError {
    #[error("Invalid {record_type} record '{name}': {}", .errors.join("; "))]
    Record {
        record_type: DnsRecordType,
        name: String,
        errors: Vec<String>,
    },

    #[error("Invalid server '{name}': {}", .errors.join("; "))]
    Server { name: String, errors: Vec<String> },

    #[error("Invalid service '{name}': {}", .errors.join("; "))]
    Service { name: String, errors: Vec<String> },

    #[error("Invalid config '{key}': {}", .errors.join("; "))]
    Config { key: String, errors: Vec<String> },
}

impl ValidationError {
    pub fn new(subject: Subject, errors: Vec<String>) -> Self {
        match subject {
            Subject::Record { record_type, name } => Self::Record {
                record_type,
                name,
                errors,
            },
            Subject::Server { name } => Self::Server { name, errors },
            Subject::Service { name } => Self::Service { name, errors },
            Subject::Config { key } => Self::Config { key, errors },
        }
    }

    /// Formatted field errors; never empty for errors built by the wrappers.
    pub fn errors(&self) -> &[String] {
        match self {
            Self::Record { errors, .. }
            | Self::Server { errors, .. }
            | Self::Service { errors, .. }
            | Self::Config { errors, .. } => errors,
        }
    }

    pub fn subject(&self) -> Subject {
        match self {
            Self::Record {
                record_type, name, ..
            } => Subject::record(*record_type, name.clone()),
            Self::Server { name, .. } => Subject::server(name.clone()),
            Self::Service { name, .. } => Subject::service(name.clone()),
            Self::Config { key, .. } => Subject::config(key.clone()),
        }
    }

    pub fn context(&self) -> String {
        self.subject().context()
    }
}

/// Raised for a location tag outside [`Location`](crate::types::Location).
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[error("Unknown location: {0}")]
pub struct UnknownLocationError(pub String);
