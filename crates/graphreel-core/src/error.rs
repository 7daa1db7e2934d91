//! Error types for Graphreel Core

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using Graphreel's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Graphreel error types
#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse snapshot {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid snapshot {path}: {reason}")]
    InvalidSnapshot { path: PathBuf, reason: String },

    #[error("Snapshot not found: {0}")]
    SnapshotNotFound(PathBuf),

    #[error("No snapshots matching '{prefix}<N>.json' in {dir}")]
    NoSnapshots { dir: PathBuf, prefix: String },

    #[error("Configuration error: {0}")]
    Config(String),
}
