//! Error types for ccfix-build.

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for ccfix-build operations.
pub type Result<T> = std::result::Result<T, FixError>;

/// Errors that can occur while fixing a compilation database.
#[derive(Error, Diagnostic, Debug)]
pub enum FixError {
    /// Failed to read or write a file (database, response file or config).
    #[error("Failed to access {}: {source}", .path.display())]
    #[diagnostic(code(ccfix::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The compilation database is not a JSON array of entries.
    #[error("Failed to parse {}: {source}", .path.display())]
    #[diagnostic(
        code(ccfix::parse),
        help("expected a JSON array of objects with string `directory` and `command` fields")
    )]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Failed to parse the TOML toolchain configuration.
    #[error("Failed to parse TOML config {}: {source}", .path.display())]
    #[diagnostic(code(ccfix::config))]
    ParseConfig {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Failed to serialize the fixed database.
    #[error("Failed to serialize JSON: {0}")]
    #[diagnostic(code(ccfix::serialize))]
    Serialize(#[source] serde_json::Error),
}

impl FixError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        FixError::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether this error came from the filesystem.
    pub fn is_io(&self) -> bool {
        matches!(self, FixError::Io { .. })
    }

    /// Whether this error came from malformed database JSON.
    pub fn is_parse(&self) -> bool {
        matches!(self, FixError::Parse { .. })
    }
}
