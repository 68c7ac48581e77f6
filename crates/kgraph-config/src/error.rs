//! Configuration errors

use std::path::PathBuf;

use thiserror::Error;

/// Error loading or validating a configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file could not be read
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The text is not valid for its format
    #[error("Failed to parse {format} config: {message}")]
    Parse { format: String, message: String },

    /// A field holds a value the graph cannot be built from
    #[error("Invalid value for {field}: {reason}")]
    Validation { field: String, reason: String },

    /// The format is unknown or was compiled out
    #[error("Unsupported config format: {0}")]
    UnsupportedFormat(String),
}

impl ConfigError {
    pub(crate) fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn parse(format: impl Into<String>, err: impl std::fmt::Display) -> Self {
        Self::Parse {
            format: format.into(),
            message: err.to_string(),
        }
    }
}
