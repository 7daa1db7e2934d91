//! Render error types

use thiserror::Error;

/// Result type alias for render operations
pub type RenderResult<T> = std::result::Result<T, RenderError>;

/// Render-specific error types
#[derive(Error, Debug)]
pub enum RenderError {
    #[error(transparent)]
    Core(#[from] graphreel_core::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("DGS parse error at line {line}: {message}")]
    DgsParse { line: usize, message: String },

    #[error("Sink error: {0}")]
    Sink(String),
}
