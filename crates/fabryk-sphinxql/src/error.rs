//! Error types for fabryk-sphinxql.

use thiserror::Error;

/// Result type alias for fabryk-sphinxql operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building a statement.
///
/// Most builder calls cannot fail: empty fragments and empty value lists
/// are silent no-ops. The variants here cover the few requests that have
/// no valid SphinxQL rendering, plus configuration loading.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// The requested construct has no SphinxQL form.
    #[error("Unsupported operation `{operation}`: {reason}")]
    Unsupported {
        /// Builder operation that was requested
        operation: &'static str,
        /// Why it cannot be rendered
        reason: String,
    },

    /// Builder configuration is invalid.
    #[error("Configuration error: {message}")]
    Config {
        /// What configuration is problematic
        message: String,
    },

    /// Configuration text is not valid TOML.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl Error {
    /// Creates a new unsupported-operation error.
    pub fn unsupported<S: Into<String>>(operation: &'static str, reason: S) -> Self {
        Error::Unsupported {
            operation,
            reason: reason.into(),
        }
    }

    /// Creates a new configuration error.
    pub fn config<S: Into<String>>(message: S) -> Self {
        Error::Config {
            message: message.into(),
        }
    }

    /// Returns whether this error came from an unsupported builder call.
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Error::Unsupported { .. })
    }
}
