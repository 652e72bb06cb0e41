//! Error types for URL assembly.
//!
//! Assembly itself is permissive: missing hosts, ports and unmatched placeholders
//! are not errors. The variants here cover input that cannot be classified and
//! the outer surfaces (configuration files, conversion into [`url::Url`]).

use thiserror::Error;

/// Main error type for URL assembly.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Argument is neither a mapping, a sequence nor a scalar
    #[error("Invalid argument shape: {0}")]
    InvalidArgumentShape(String),

    /// Defaults or initializer could not be loaded
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Rendered string is not an absolute URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Unknown option field name
    #[error("Invalid field: {0}")]
    InvalidField(String),
}

/// Specialized result type for URL assembly.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Returns the error code for this error type.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidArgumentShape(_) => "INVALID_ARGUMENT_SHAPE",
            Self::ConfigError(_) => "CONFIG_ERROR",
            Self::InvalidUrl(_) => "INVALID_URL",
            Self::InvalidField(_) => "INVALID_FIELD",
        }
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Self::InvalidUrl(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::ConfigError(err.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::ConfigError(err.to_string())
    }
}
