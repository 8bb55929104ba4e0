//! Shared error types for the application

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for pymdgen operations
#[derive(Debug, Error)]
pub enum Error {
    /// Parameter metadata for a callable cannot be read, e.g. a natively
    /// implemented function or inconsistent default values
    #[error("Metadata unavailable for `{name}`: {reason}")]
    MetadataUnavailable { name: String, reason: String },

    /// A base type reference has no module to qualify it with
    #[error("Base type `{name}` has no fully-qualified identifier")]
    MalformedBase { name: String },

    /// A dotted module name could not be located under any search root
    #[error("Module not found: {name} (searched {searched} path(s))")]
    ModuleNotFound { name: String, searched: usize },

    /// Parsing errors
    #[error("Parse error in {file}:{line}:{column}: {message}")]
    Parse {
        file: PathBuf,
        line: usize,
        column: usize,
        message: String,
    },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// IO errors
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a metadata error for the callable recorded as `name`
    pub fn metadata_unavailable(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MetadataUnavailable {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Create a parse error with location
    pub fn parse(
        file: impl Into<PathBuf>,
        line: usize,
        column: usize,
        message: impl Into<String>,
    ) -> Self {
        Self::Parse {
            file: file.into(),
            line,
            column,
            message: message.into(),
        }
    }
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, Error>;
