use thiserror::Error;

/// Core error type for configuration and serialization.
///
/// This error type uses `thiserror` with `#[source]` annotations
/// to preserve error chains for debugging.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// Serialization failed when encoding a value to bytes.
    #[error("serialization failed")]
    Serialization(#[source] serde_json::Error),

    /// Deserialization failed when decoding bytes to a value.
    #[error("deserialization failed")]
    Deserialization(#[source] serde_json::Error),

    /// A configuration value is outside its permitted range.
    #[error("invalid configuration: {field} {reason}")]
    InvalidConfig {
        field: &'static str,
        reason: String,
    },
}

impl Error {
    /// Creates an invalid configuration error for the named field.
    pub fn invalid_config(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field,
            reason: reason.into(),
        }
    }
}

pub type CoreError = Error;

pub type Result<T> = std::result::Result<T, Error>;
