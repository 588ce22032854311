//! Error types for HostFacts
//!
//! This module defines all error types used throughout the collectors,
//! keeping "file not found" distinct from other I/O failures so callers can
//! tell an absent attribute apart from an unreadable one.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for HostFacts operations
#[derive(Error, Debug)]
pub enum HostFactsError {
    /// I/O error while reading a fact source
    #[error("I/O error at '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File or directory not found
    #[error("Path not found: {0}")]
    NotFound(PathBuf),

    /// Text that could not be parsed into the expected shape
    #[error("Cannot parse '{input}': {reason}")]
    Parse { input: String, reason: String },

    /// The processor stanza file exists but lists no processor
    #[error("No processor stanza found in {0}")]
    NoProcessors(PathBuf),

    /// A collector name given on the command line is not registered
    #[error("Unknown collector: {0}")]
    UnknownCollector(String),

    /// A collector failed as a whole
    #[error("[{name}] {message}")]
    Collector { name: String, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Snapshot serialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Unsupported operation on this platform
    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),
}

impl HostFactsError {
    /// Create an I/O error with path context.
    ///
    /// `NotFound` kinds are folded into [`HostFactsError::NotFound`].
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::NotFound(path)
        } else {
            Self::Io { path, source }
        }
    }

    /// Create a parse error
    pub fn parse(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Parse {
            input: input.into(),
            reason: reason.into(),
        }
    }

    /// Create a collector failure
    pub fn collector(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Collector {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError(message.into())
    }

    /// Check if this error means the source simply does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Get the path associated with this error, if any
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::Io { path, .. } | Self::NotFound(path) | Self::NoProcessors(path) => Some(path),
            _ => None,
        }
    }
}

/// Result type alias for HostFacts operations
pub type Result<T> = std::result::Result<T, HostFactsError>;

/// Extension trait for adding path context to std::io::Result
pub trait IoResultExt<T> {
    /// Add path context to an I/O error
    fn with_path(self, path: impl Into<PathBuf>) -> Result<T>;
}

impl<T> IoResultExt<T> for std::io::Result<T> {
    fn with_path(self, path: impl Into<PathBuf>) -> Result<T> {
        self.map_err(|e| HostFactsError::io(path, e))
    }
}
