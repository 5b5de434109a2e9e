use core::result::Result as CoreResult;
use std::io::Error as IoError;
use std::path::PathBuf;

use glob::PatternError;
use serde_json::Error as SerdeJsonError;
use thiserror::Error;
use toml::de::Error as TomlError;
use toml::ser::Error as TomlSerError;

/// Result type for stencil operations.
pub type Result<T> = CoreResult<T, Error>;

/// Errors that can occur while validating a template corpus.
#[derive(Debug, Error)]
pub enum Error {
    /// An I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] IoError),

    /// JSON serialization or deserialization failed.
    #[error("JSON serialization error: {0}")]
    Json(#[from] SerdeJsonError),

    /// TOML deserialization failed.
    #[error("TOML deserialization error: {0}")]
    Toml(#[from] TomlError),

    /// TOML serialization failed.
    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] TomlSerError),

    /// An exclude pattern is not a valid glob.
    #[error("Invalid exclude pattern: {0}")]
    Pattern(#[from] PatternError),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A configured search path does not exist.
    #[error("Search path does not exist: {}", .0.display())]
    SearchPathMissing(PathBuf),

    /// The report could not be persisted.
    #[error("Failed to write report to {}: {source}", path.display())]
    ReportWrite {
        /// Destination that could not be written
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: IoError,
    },

    /// An integration probe failed internally.
    #[error("Probe error: {0}")]
    Probe(String),

    /// A spawned task panicked or was cancelled.
    #[error("Task failed: {0}")]
    Task(String),

    /// A caller-supplied section pattern is not a valid regex.
    #[error("Invalid pattern for section {name}: {reason}")]
    SectionPattern {
        /// Section the pattern belongs to
        name: String,
        /// Regex compiler message
        reason: String,
    },
}

impl Error {
    /// Whether this error must abort the run instead of being recorded as a result.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::ReportWrite { .. })
    }
}
