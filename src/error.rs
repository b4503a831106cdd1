//! Error types for nearfind.
//!
//! The selection core never returns errors; its precondition violations are
//! programmer errors and panic. Everything here originates at the boundary:
//! loading files, parsing rows, reading configuration.

use std::path::PathBuf;

/// Result type alias for nearfind operations.
pub type Result<T> = std::result::Result<T, NearfindError>;

/// Error type for all fallible operations in nearfind.
#[derive(Debug, thiserror::Error)]
pub enum NearfindError {
    /// Underlying I/O failure while writing a report.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A file could not be opened or read.
    #[error("cannot read {}: {source}", path.display())]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed CSV content without file context.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Malformed CSV content in a named file.
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[cfg(feature = "toml")]
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Well-formed input with a value the engine cannot use.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A query referenced a category the finder does not know.
    #[error("unknown category: {0}")]
    UnknownCategory(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
