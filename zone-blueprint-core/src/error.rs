//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

// Re-export library error type
pub use zone_blueprint_schema::ValidationError;

/// Core layer error type
#[derive(Error, Debug, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CoreError {
    /// Service references a server missing from the registry
    #[error("Unknown server: {0}")]
    UnknownServer(String),

    /// Location tag outside the known set
    #[error("Unknown location: {0}")]
    UnknownLocation(String),

    /// Registry key differs from the server's own name
    #[error("Server registered as '{key}' is named '{name}'")]
    RegistryMismatch { key: String, name: String },

    /// Two servers share a name
    #[error("Duplicate server: {0}")]
    DuplicateServer(String),

    /// Service rejected during compilation
    #[error("Invalid service '{subdomain}': {message}")]
    InvalidService { subdomain: String, message: String },

    /// Blueprint configuration error
    #[error("Config error: {0}")]
    ConfigError(String),

    /// serialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Strict-mode validation failure (converting from library)
    #[error("{0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// Whether it is expected behavior (bad configuration input) is used for log classification.
    ///
    /// Level `warn` should be used when returning `true` and level `error` when returning `false`.
    /// **Please update this method simultaneously when new variants are added. **
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::UnknownServer(_)
            | Self::UnknownLocation(_)
            | Self::RegistryMismatch { .. }
            | Self::DuplicateServer(_)
            | Self::InvalidService { .. }
            | Self::ConfigError(_)
            | Self::Validation(_) => true,
            Self::SerializationError(_) => false,
        }
    }
}

impl From<zone_blueprint_schema::UnknownLocationError> for CoreError {
    fn from(e: zone_blueprint_schema::UnknownLocationError) -> Self {
        Self::UnknownLocation(e.0)
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        Self::SerializationError(e.to_string())
    }
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;
